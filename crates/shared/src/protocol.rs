use serde::{Deserialize, Serialize};

use crate::domain::{ModelId, ModelType};

pub const MODELS_ROUTE: &str = "/models";
pub const HEALTHZ_ROUTE: &str = "/healthz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateModelRequest {
    pub name: String,
    pub description: String,
    pub model_type: ModelType,
    pub github_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_link: Option<String>,
    pub submitter_linkedin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateModelResponse {
    pub id: ModelId,
}

/// Query string for `GET /models`; an absent `model_type` lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListModelsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,
}

pub fn model_route(model_id: ModelId) -> String {
    format!("{MODELS_ROUTE}/{}", model_id.0)
}
