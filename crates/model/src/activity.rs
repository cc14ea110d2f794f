//! The persisted unit of authored content: a titled, ordered element list
//! plus metadata.

use crate::element::CanvasElement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

/// Unique identifier for an activity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(uuid::Uuid);

impl ActivityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(Self)
    }

    pub fn to_uuid_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of exercise an activity plays as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActivityKind {
    Matching,
    VisualSchedule,
    AacBoard,
    Sequencing,
    SocialStory,
    YesNoCards,
    Phonics,
}

/// Languages an activity can be authored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Bengali,
    Marathi,
    Gujarati,
    Punjabi,
}

impl Language {
    /// BCP 47 tag handed to the narration backend.
    pub fn narration_tag(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Kannada => "kn-IN",
            Language::Malayalam => "ml-IN",
            Language::Bengali => "bn-IN",
            Language::Marathi => "mr-IN",
            Language::Gujarati => "gu-IN",
            Language::Punjabi => "pa-IN",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Who a user session belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Tutor,
    Family,
}

/// An ordered collection of elements plus metadata.
///
/// Activities are owned by whichever collaborator holds the activity list;
/// the editor and player only ever operate on copies they were handed.
/// A new save produces a new value rather than mutating a referenced one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    pub kind: ActivityKind,
    pub language: Language,
    #[serde(default)]
    pub description: String,
    pub elements: Vec<CanvasElement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Activity {
    pub fn new(
        title: impl Into<String>,
        kind: ActivityKind,
        language: Language,
        author_id: impl Into<String>,
        elements: Vec<CanvasElement>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ActivityId::new(),
            title: title.into(),
            kind,
            language,
            description: String::new(),
            elements,
            created_at: now,
            updated_at: now,
            author_id: author_id.into(),
            is_published: false,
            tags: Vec::new(),
        }
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Ids are expected to be unique within one activity's element list.
    pub fn has_unique_element_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.elements.iter().all(|el| seen.insert(el.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanvasPoint, CanvasSize, ElementKind};

    #[test]
    fn kind_tokens_are_kebab_case() {
        let json = serde_json::to_value(ActivityKind::VisualSchedule).unwrap();
        assert_eq!(json, "visual-schedule");
        let parsed: ActivityKind = serde_json::from_value(serde_json::json!("aac-board")).unwrap();
        assert_eq!(parsed, ActivityKind::AacBoard);
    }

    #[test]
    fn kind_parses_from_display_form() {
        use std::str::FromStr;
        assert_eq!(
            ActivityKind::from_str("yes-no-cards").unwrap(),
            ActivityKind::YesNoCards
        );
    }

    #[test]
    fn narration_tags_cover_every_language() {
        assert_eq!(Language::Hindi.narration_tag(), "hi-IN");
        assert_eq!(Language::Tamil.narration_tag(), "ta-IN");
        assert_eq!(Language::default().narration_tag(), "en-IN");
    }

    #[test]
    fn duplicate_element_ids_are_detected() {
        let el = CanvasElement::new(
            ElementKind::Text,
            CanvasPoint::new(0.0, 0.0),
            CanvasSize::new(10.0, 10.0),
            "hi",
        );
        let mut activity = Activity::new(
            "Test",
            ActivityKind::Matching,
            Language::English,
            "tutor-1",
            vec![el.clone()],
        );
        assert!(activity.has_unique_element_ids());

        activity.elements.push(el);
        assert!(!activity.has_unique_element_ids());
    }

    #[test]
    fn activity_roundtrips_through_json() {
        let activity = Activity::new(
            "Fruits",
            ActivityKind::Matching,
            Language::Hindi,
            "tutor-1",
            vec![],
        );
        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
    }
}
