//! Backend worker: a dedicated thread running a tokio runtime that owns the
//! `LibrarianClient`. Commands arrive over a crossbeam channel; client events
//! are forwarded back to the UI as [`UiEvent`]s.

use std::{sync::Arc, thread};

use client_core::{ClientEvent, GatewayConfig, LibrarianClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub server_url: String,
    pub error_field: String,
}

pub fn spawn_backend_thread(
    config: RuntimeConfig,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendStartupFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let gateway_config = match GatewayConfig::new(&config.server_url) {
                Ok(gateway_config) => gateway_config.with_error_field(&config.error_field),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::BackendStartupFailed(format!(
                        "invalid backend endpoint {}: {err}",
                        config.server_url
                    )));
                    tracing::error!("invalid backend endpoint: {err:#}");
                    return;
                }
            };
            let client = LibrarianClient::connect(gateway_config);

            spawn_event_forwarder(&client, ui_tx.clone());

            // Matches the original client's fetch-on-load behavior.
            client.refresh_documents().await;
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                match cmd {
                    BackendCommand::RefreshDocuments => {
                        tokio::spawn(async move {
                            client.refresh_documents().await;
                        });
                    }
                    BackendCommand::SubmitQuery { text } => {
                        // Queries and uploads run on separate tasks so the two
                        // sessions can be in flight simultaneously.
                        tokio::spawn(async move {
                            client.set_query_text(text).await;
                            if !client.submit_query().await {
                                tracing::debug!("query submission rejected (blank or pending)");
                            }
                        });
                    }
                    BackendCommand::UploadDocument { file } => {
                        tokio::spawn(async move {
                            if !client.start_upload(Some(file)).await {
                                tracing::debug!("upload rejected (another upload in flight)");
                            }
                        });
                    }
                    BackendCommand::AcknowledgeUploadError => {
                        tokio::spawn(async move {
                            client.acknowledge_upload_error().await;
                        });
                    }
                }
            }
        });
    });
}

fn spawn_event_forwarder(client: &Arc<LibrarianClient>, ui_tx: Sender<UiEvent>) {
    let mut events = client.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            let ui_event = match event {
                ClientEvent::QueryPending => UiEvent::QueryPending,
                ClientEvent::QuerySettled(result) => UiEvent::QuerySettled(result),
                ClientEvent::DocumentsRefreshed { count } => UiEvent::DocumentCount(count),
                ClientEvent::UploadStarted => UiEvent::UploadStarted,
                ClientEvent::UploadCompleted => UiEvent::UploadFinished,
                ClientEvent::UploadFailed { message } => UiEvent::UploadFailed(message),
            };
            let _ = ui_tx.try_send(ui_event);
        }
    });
}
