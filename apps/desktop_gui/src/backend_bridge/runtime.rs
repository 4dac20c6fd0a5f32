//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{fetch_models, CatalogService, HttpCatalogClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match HttpCatalogClient::new(&server_url) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(err.to_string()));
                tracing::error!(server_url = %server_url, "invalid catalog server url: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Connected to {}",
            client.server_url()
        )));

        runtime.block_on(async move {
            // Each command runs on its own task so a slow fetch never holds up
            // a newer one; the list view discards whichever lands stale.
            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(client.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event receiver dropped");
                    }
                });
            }
            tracing::info!("backend command queue closed");
        });
    });
}

async fn run_command<S>(service: &S, cmd: BackendCommand) -> UiEvent
where
    S: CatalogService + ?Sized,
{
    match cmd {
        BackendCommand::FetchModels { ticket } => {
            let result = fetch_models(service, ticket.filter()).await;
            UiEvent::ModelsFetched { ticket, result }
        }
        BackendCommand::DeleteModel { ticket } => {
            let result = service.delete_model(ticket.model_id()).await;
            UiEvent::ModelDeleted { ticket, result }
        }
        BackendCommand::CreateModel { request } => {
            UiEvent::ModelCreated(service.create_model(request).await)
        }
    }
}
