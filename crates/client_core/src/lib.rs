use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Model, ModelId, ModelType},
    protocol::CreateModelRequest,
};

pub mod error;
pub mod form;
pub mod list_view;
pub mod routes;
pub mod transport;

pub use error::CatalogError;
pub use form::{CreateModelForm, FormError, FormField, SubmitOutcome};
pub use list_view::{
    ConfirmDelete, DeleteOutcome, DeleteTicket, DisplayState, FetchOutcome, FetchTicket, ListView,
    ListViewController, ModelCard, ViewState,
};
pub use routes::Route;
pub use transport::HttpCatalogClient;

/// Remote catalog the client reads from and writes to. Implementations own
/// persistence, validation and id assignment; every failure surfaces as a
/// [`CatalogError`].
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_all_models(&self) -> Result<Vec<Model>, CatalogError>;
    async fn get_models_by_type(&self, model_type: ModelType) -> Result<Vec<Model>, CatalogError>;
    async fn create_model(&self, request: CreateModelRequest) -> Result<ModelId, CatalogError>;
    async fn delete_model(&self, model_id: ModelId) -> Result<(), CatalogError>;
}

#[async_trait]
impl<T> CatalogService for Arc<T>
where
    T: CatalogService + ?Sized,
{
    async fn get_all_models(&self) -> Result<Vec<Model>, CatalogError> {
        (**self).get_all_models().await
    }

    async fn get_models_by_type(&self, model_type: ModelType) -> Result<Vec<Model>, CatalogError> {
        (**self).get_models_by_type(model_type).await
    }

    async fn create_model(&self, request: CreateModelRequest) -> Result<ModelId, CatalogError> {
        (**self).create_model(request).await
    }

    async fn delete_model(&self, model_id: ModelId) -> Result<(), CatalogError> {
        (**self).delete_model(model_id).await
    }
}

/// Filtered read when a type is given, full listing otherwise.
pub async fn fetch_models<S>(
    service: &S,
    filter: Option<ModelType>,
) -> Result<Vec<Model>, CatalogError>
where
    S: CatalogService + ?Sized,
{
    match filter {
        Some(model_type) => service.get_models_by_type(model_type).await,
        None => service.get_all_models().await,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
