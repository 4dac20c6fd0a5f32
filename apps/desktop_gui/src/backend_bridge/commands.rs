//! Backend commands queued from UI to backend worker.

use client_core::{DeleteTicket, FetchTicket};
use shared::protocol::CreateModelRequest;

pub enum BackendCommand {
    FetchModels { ticket: FetchTicket },
    DeleteModel { ticket: DeleteTicket },
    CreateModel { request: CreateModelRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchModels { .. } => "fetch_models",
            BackendCommand::DeleteModel { .. } => "delete_model",
            BackendCommand::CreateModel { .. } => "create_model",
        }
    }
}
