use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ModelId);

/// Category a catalog entry is filed under. The wire tag is the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "NLP")]
    Nlp,
    TabularData,
    ComputerVision,
    SpeechRecognition,
    Other,
}

impl ModelType {
    pub const ALL: [ModelType; 5] = [
        ModelType::Nlp,
        ModelType::TabularData,
        ModelType::ComputerVision,
        ModelType::SpeechRecognition,
        ModelType::Other,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ModelType::Nlp => "NLP",
            ModelType::TabularData => "TabularData",
            ModelType::ComputerVision => "ComputerVision",
            ModelType::SpeechRecognition => "SpeechRecognition",
            ModelType::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelType::Nlp => "Natural Language Processing (NLP)",
            ModelType::TabularData => "Tabular Data",
            ModelType::ComputerVision => "Computer Vision",
            ModelType::SpeechRecognition => "Speech Recognition",
            ModelType::Other => "Other",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model type tag: {0:?}")]
pub struct ParseModelTypeError(pub String);

impl FromStr for ModelType {
    type Err = ParseModelTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        ModelType::ALL
            .into_iter()
            .find(|kind| kind.tag() == raw)
            .ok_or_else(|| ParseModelTypeError(raw.to_string()))
    }
}

/// A catalog entry as returned by the backend. Entries are never edited in
/// place; the only mutation is whole-record deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub description: String,
    pub model_type: ModelType,
    pub github_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_link: Option<String>,
    pub submitter_linkedin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_tags_round_trip_through_from_str() {
        for kind in ModelType::ALL {
            assert_eq!(kind.tag().parse::<ModelType>(), Ok(kind));
        }
        assert!("Vision".parse::<ModelType>().is_err());
    }

    #[test]
    fn model_type_serializes_as_bare_tag() {
        assert_eq!(
            serde_json::to_string(&ModelType::Nlp).expect("json"),
            "\"NLP\""
        );
        let parsed: ModelType = serde_json::from_str("\"ComputerVision\"").expect("json");
        assert_eq!(parsed, ModelType::ComputerVision);
    }

    #[test]
    fn missing_article_link_deserializes_as_none() {
        let model: Model = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "resnet",
            "description": "image classifier",
            "model_type": "ComputerVision",
            "github_link": "https://github.com/example/resnet",
            "submitter_linkedin": "https://linkedin.com/in/example"
        }))
        .expect("model");
        assert_eq!(model.id, ModelId(7));
        assert_eq!(model.article_link, None);
    }
}
