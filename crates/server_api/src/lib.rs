use shared::{
    domain::{Model, ModelId, ModelType},
    error::{ApiError, ErrorCode},
    protocol::CreateModelRequest,
};
use storage::Storage;
use tracing::info;
use url::Url;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn list_models(
    ctx: &ApiContext,
    model_type: Option<ModelType>,
) -> Result<Vec<Model>, ApiError> {
    let models = match model_type {
        Some(model_type) => ctx.storage.list_models_by_type(model_type).await,
        None => ctx.storage.list_models().await,
    };
    models.map_err(internal)
}

pub async fn get_model(ctx: &ApiContext, model_id: ModelId) -> Result<Model, ApiError> {
    ctx.storage
        .load_model(model_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("model {model_id} not found")))
}

pub async fn create_model(
    ctx: &ApiContext,
    request: CreateModelRequest,
) -> Result<ModelId, ApiError> {
    let request = validate_create_request(request)?;
    let model_id = ctx
        .storage
        .insert_model(&request)
        .await
        .map_err(internal)?;
    info!(
        model_id = model_id.0,
        model_type = %request.model_type,
        "model submitted"
    );
    Ok(model_id)
}

pub async fn delete_model(ctx: &ApiContext, model_id: ModelId) -> Result<(), ApiError> {
    let removed = ctx
        .storage
        .delete_model(model_id)
        .await
        .map_err(internal)?;
    if !removed {
        return Err(ApiError::not_found(format!("model {model_id} not found")));
    }
    info!(model_id = model_id.0, "model deleted");
    Ok(())
}

/// Trims every field, drops an empty article link, and rejects blank
/// required fields or links that are not absolute http(s) URLs.
pub fn validate_create_request(request: CreateModelRequest) -> Result<CreateModelRequest, ApiError> {
    let name = required("name", &request.name)?;
    let description = required("description", &request.description)?;
    let github_link = required_link("github_link", &request.github_link)?;
    let submitter_linkedin = required_link("submitter_linkedin", &request.submitter_linkedin)?;
    let article_link = match request.article_link.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(link("article_link", raw)?),
    };

    Ok(CreateModelRequest {
        name,
        description,
        model_type: request.model_type,
        github_link,
        article_link,
        submitter_linkedin,
    })
}

fn required(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn required_link(field: &str, value: &str) -> Result<String, ApiError> {
    let value = required(field, value)?;
    link(field, &value)
}

fn link(field: &str, value: &str) -> Result<String, ApiError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err(ApiError::validation(format!(
            "{field} must be an absolute http(s) URL"
        ))),
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}
