use model::{ActivityKind, CanvasElement, CanvasPoint, CanvasSize, ElementKind, ElementStyle, Hsla};

/// A starting point for a new activity.
#[derive(Clone, Copy, Debug)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ActivityKind,
    pub description: &'static str,
    pub thumbnail: &'static str,
}

static TEMPLATES: &[Template] = &[
    Template {
        id: "matching-1",
        name: "Picture Matching",
        kind: ActivityKind::Matching,
        description: "Match pictures with their pairs - drag and drop activity",
        thumbnail: "🎯",
    },
    Template {
        id: "schedule-1",
        name: "Daily Routine",
        kind: ActivityKind::VisualSchedule,
        description: "Visual schedule for daily activities",
        thumbnail: "📅",
    },
    Template {
        id: "aac-1",
        name: "Basic Needs AAC",
        kind: ActivityKind::AacBoard,
        description: "Communication board for basic needs",
        thumbnail: "💬",
    },
    Template {
        id: "sequence-1",
        name: "Story Sequencing",
        kind: ActivityKind::Sequencing,
        description: "Arrange pictures in correct order",
        thumbnail: "🔢",
    },
    Template {
        id: "social-1",
        name: "Social Story",
        kind: ActivityKind::SocialStory,
        description: "Create social stories with pictures and text",
        thumbnail: "📖",
    },
    Template {
        id: "yesno-1",
        name: "Yes/No Cards",
        kind: ActivityKind::YesNoCards,
        description: "Simple yes/no response cards",
        thumbnail: "✅",
    },
];

pub fn starter_templates() -> &'static [Template] {
    TEMPLATES
}

pub fn template_by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl Template {
    /// Seed elements for a fresh canvas. The matching template opens with
    /// three zones and three draggables laid out; the rest start blank.
    pub fn seed_elements(&self) -> Vec<CanvasElement> {
        match self.kind {
            ActivityKind::Matching => matching_seed(),
            _ => Vec::new(),
        }
    }
}

fn matching_seed() -> Vec<CanvasElement> {
    let tokens = ["🍎", "🍌", "🥭"];
    let mut elements = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let y = 60.0 + 160.0 * i as f32;
        elements.push(
            CanvasElement::new(
                ElementKind::Shape,
                CanvasPoint::new(520.0, y),
                CanvasSize::new(120.0, 120.0),
                "rectangle",
            )
            .with_style(
                ElementStyle::new()
                    .with_background(Hsla::new(0.0, 0.0, 0.9, 0.5))
                    .with_border(Hsla::new(0.7, 0.6, 0.5, 1.0), 3.0)
                    .with_corner_radius(12.0),
            )
            .as_drop_zone(),
        );
        elements.push(
            CanvasElement::new(
                ElementKind::Image,
                CanvasPoint::new(80.0, y + 20.0),
                CanvasSize::new(80.0, 80.0),
                *token,
            )
            .with_style(
                ElementStyle::new()
                    .with_background(Hsla::white())
                    .with_border(Hsla::new(0.0, 0.0, 0.85, 1.0), 2.0)
                    .with_corner_radius(12.0),
            ),
        );
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_templates_with_unique_ids() {
        assert_eq!(starter_templates().len(), 6);
        let mut seen = std::collections::HashSet::new();
        assert!(starter_templates().iter().all(|t| seen.insert(t.id)));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(template_by_id("aac-1").unwrap().kind, ActivityKind::AacBoard);
        assert!(template_by_id("nope").is_none());
    }

    #[test]
    fn matching_template_seeds_zones_and_items() {
        let elements = template_by_id("matching-1").unwrap().seed_elements();
        let zones = elements.iter().filter(|el| el.is_drop_zone).count();
        let items = elements.iter().filter(|el| !el.is_drop_zone).count();
        assert_eq!(zones, 3);
        assert_eq!(items, 3);
    }

    #[test]
    fn other_templates_start_blank() {
        assert!(template_by_id("social-1").unwrap().seed_elements().is_empty());
    }
}
