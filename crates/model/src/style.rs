use crate::color::Hsla;
use serde::{Deserialize, Serialize};

/// Optional visual attributes for an element.
///
/// Every field is individually optional; `None` means "use default
/// rendering" for that attribute. The whole bag is skipped in serialized
/// form when nothing is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Hsla>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Hsla>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Hsla>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_background(mut self, color: Hsla) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border(mut self, color: Hsla, width: f32) -> Self {
        self.border_color = Some(color);
        self.border_width = Some(width);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn with_font(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_color(mut self, color: Hsla) -> Self {
        self.font_color = Some(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted_from_json() {
        let style = ElementStyle::new().with_font(20.0);
        let json: serde_json::Value = serde_json::to_value(style).unwrap();

        assert_eq!(json["font_size"], 20.0);
        assert!(json.get("background").is_none());
        assert!(json.get("border_color").is_none());
        assert!(json.get("corner_radius").is_none());
    }

    #[test]
    fn empty_style_deserializes_from_empty_object() {
        let style: ElementStyle = serde_json::from_str("{}").unwrap();
        assert!(style.is_default());
    }
}
