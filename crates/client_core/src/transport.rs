//! HTTP implementation of [`CatalogService`] against the catalog server.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Model, ModelId, ModelType},
    error::{ApiError, ApiException},
    protocol::{model_route, CreateModelRequest, CreateModelResponse, ListModelsQuery, MODELS_ROUTE},
};
use tracing::debug;
use url::Url;

use crate::{error::CatalogError, CatalogService};

#[derive(Clone)]
pub struct HttpCatalogClient {
    http: Client,
    server_url: String,
}

impl HttpCatalogClient {
    pub fn new(server_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, CatalogError> {
        let trimmed = server_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|err| CatalogError::InvalidServerUrl {
            url: server_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            http,
            server_url: trimmed.to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn list(&self, query: ListModelsQuery) -> Result<Vec<Model>, CatalogError> {
        let response = self
            .http
            .get(format!("{}{MODELS_ROUTE}", self.server_url))
            .query(&query)
            .send()
            .await?;
        let models: Vec<Model> = decode(check_status(response).await?).await?;
        debug!(
            count = models.len(),
            model_type = ?query.model_type,
            "fetched models"
        );
        Ok(models)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn get_all_models(&self) -> Result<Vec<Model>, CatalogError> {
        self.list(ListModelsQuery::default()).await
    }

    async fn get_models_by_type(&self, model_type: ModelType) -> Result<Vec<Model>, CatalogError> {
        self.list(ListModelsQuery {
            model_type: Some(model_type),
        })
        .await
    }

    async fn create_model(&self, request: CreateModelRequest) -> Result<ModelId, CatalogError> {
        let response = self
            .http
            .post(format!("{}{MODELS_ROUTE}", self.server_url))
            .json(&request)
            .send()
            .await?;
        let created: CreateModelResponse = decode(check_status(response).await?).await?;
        Ok(created.id)
    }

    async fn delete_model(&self, model_id: ModelId) -> Result<(), CatalogError> {
        let response = self
            .http
            .delete(format!("{}{}", self.server_url, model_route(model_id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => Err(CatalogError::Rejected {
            status: status.as_u16(),
            source: ApiException::from(api_error),
        }),
        Err(_) => Err(CatalogError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        }),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| CatalogError::InvalidResponse(err.to_string()))
}
