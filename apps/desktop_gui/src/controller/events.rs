//! Backend-to-UI events for the desktop GUI controller.

use client_core::{CatalogError, DeleteTicket, FetchTicket};
use shared::domain::{Model, ModelId};

pub enum UiEvent {
    Info(String),
    ModelsFetched {
        ticket: FetchTicket,
        result: Result<Vec<Model>, CatalogError>,
    },
    ModelDeleted {
        ticket: DeleteTicket,
        result: Result<(), CatalogError>,
    },
    ModelCreated(Result<ModelId, CatalogError>),
    BackendUnavailable(String),
}
