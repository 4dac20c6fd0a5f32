//! Colours for the catalog pages.

use egui::Color32;
use shared::domain::ModelType;

pub const CARD_BORDER: Color32 = Color32::from_rgb(254, 215, 170);
pub const CARD_FILL: Color32 = Color32::WHITE;
pub const ACCENT: Color32 = Color32::from_rgb(234, 88, 12);
pub const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(107, 114, 128);
pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);

/// Badge colours for a model type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeBadge {
    pub fill: Color32,
    pub text: Color32,
}

pub fn type_badge(model_type: ModelType) -> TypeBadge {
    let (fill, text) = match model_type {
        ModelType::Nlp => ((239, 246, 255), (30, 64, 175)),
        ModelType::TabularData => ((240, 253, 244), (22, 101, 52)),
        ModelType::ComputerVision => ((250, 245, 255), (107, 33, 168)),
        ModelType::SpeechRecognition => ((254, 252, 232), (133, 77, 14)),
        ModelType::Other => ((249, 250, 251), (31, 41, 55)),
    };
    TypeBadge {
        fill: Color32::from_rgb(fill.0, fill.1, fill.2),
        text: Color32::from_rgb(text.0, text.1, text.2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_distinct_badge() {
        let badges: Vec<_> = ModelType::ALL.into_iter().map(type_badge).collect();
        for (i, a) in badges.iter().enumerate() {
            for b in &badges[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn other_falls_back_to_gray() {
        assert_eq!(
            type_badge(ModelType::Other).text,
            Color32::from_rgb(31, 41, 55)
        );
    }
}
