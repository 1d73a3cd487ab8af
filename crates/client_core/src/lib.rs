//! Client-side session controller for the verified-RAG backend.
//!
//! Owns the query and upload state machines plus the document registry, and
//! drives the request lifecycle against the gateway. All transitions happen
//! on the caller's task; gateway calls are the only suspension points, and
//! each session permits at most one outstanding call by construction.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, warn};

pub mod gateway;
pub mod query;
pub mod registry;
pub mod upload;

pub use gateway::{BackendGateway, GatewayConfig, HttpGateway, UploadFile, DEFAULT_ERROR_FIELD};
pub use query::{
    ConfidenceBand, QueryPhase, QuerySession, VerificationResult, CONNECTIVITY_FAILURE_ANSWER,
};
pub use registry::DocumentRegistry;
pub use shared::{
    domain::{Document, DocumentId},
    error::GatewayError,
};
pub use upload::{UploadPhase, UploadSession};

/// Notifications for the presentation layer. Rejected submissions are silent
/// no-ops and deliberately produce no event.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A submission was accepted and is now in flight.
    QueryPending,
    QuerySettled(VerificationResult),
    DocumentsRefreshed { count: usize },
    UploadStarted,
    /// Upload finished and the registry was refreshed; the upload panel can
    /// close.
    UploadCompleted,
    UploadFailed { message: String },
}

pub struct LibrarianClient {
    gateway: Arc<dyn BackendGateway>,
    query: Mutex<QuerySession>,
    upload: Mutex<UploadSession>,
    registry: RwLock<DocumentRegistry>,
    events: broadcast::Sender<ClientEvent>,
}

impl LibrarianClient {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            gateway,
            query: Mutex::new(QuerySession::new()),
            upload: Mutex::new(UploadSession::new()),
            registry: RwLock::new(DocumentRegistry::new()),
            events,
        })
    }

    /// Production constructor: HTTP gateway against the configured endpoint.
    pub fn connect(config: GatewayConfig) -> Arc<Self> {
        Self::new(Arc::new(HttpGateway::new(config)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn set_query_text(&self, text: impl Into<String>) {
        self.query.lock().await.set_query_text(text);
    }

    pub async fn query_session(&self) -> QuerySession {
        self.query.lock().await.clone()
    }

    pub async fn upload_phase(&self) -> UploadPhase {
        self.upload.lock().await.phase().clone()
    }

    pub async fn document_count(&self) -> usize {
        self.registry.read().await.count()
    }

    pub async fn documents(&self) -> Vec<Document> {
        self.registry.read().await.documents().to_vec()
    }

    /// Submits the current query text. Returns whether the submission was
    /// accepted; a blank query or one already pending is a rejected no-op
    /// that issues no network call.
    pub async fn submit_query(self: &Arc<Self>) -> bool {
        let text = {
            let mut session = self.query.lock().await;
            match session.begin_submit() {
                Some(text) => text,
                None => return false,
            }
        };
        let _ = self.events.send(ClientEvent::QueryPending);

        info!(chars = text.len(), "query: submitting");
        let result = match self.gateway.submit_query(&text).await {
            Ok(result) => result,
            Err(err) => {
                warn!("query: gateway failure: {err}");
                let mut session = self.query.lock().await;
                session.settle_failure(&err);
                let settled = session.settled_result().cloned();
                drop(session);
                if let Some(result) = settled {
                    let _ = self.events.send(ClientEvent::QuerySettled(result));
                }
                return true;
            }
        };

        self.query.lock().await.settle(result.clone());
        let _ = self.events.send(ClientEvent::QuerySettled(result));
        true
    }

    /// Starts an upload. `None` (no file selected) and uploads begun while
    /// another is in flight are rejected no-ops. On success the registry is
    /// refreshed before completion is signaled.
    pub async fn start_upload(self: &Arc<Self>, file: Option<UploadFile>) -> bool {
        let Some(file) = file else {
            return false;
        };

        if !self.upload.lock().await.begin() {
            return false;
        }
        let _ = self.events.send(ClientEvent::UploadStarted);

        info!(filename = %file.filename, bytes = file.bytes.len(), "upload: starting");
        match self.gateway.upload_document(file).await {
            Ok(()) => {
                self.upload.lock().await.finish_ok();
                self.refresh_documents().await;
                let _ = self.events.send(ClientEvent::UploadCompleted);
            }
            Err(err) => {
                let message = err.detail().to_string();
                warn!("upload: failed: {message}");
                self.upload.lock().await.finish_err(message.clone());
                let _ = self.events.send(ClientEvent::UploadFailed { message });
            }
        }
        true
    }

    pub async fn acknowledge_upload_error(&self) {
        self.upload.lock().await.acknowledge_error();
    }

    /// Refreshes the document registry. Failures keep the stale list and are
    /// logged only; the count display is informational, not decision-critical.
    pub async fn refresh_documents(self: &Arc<Self>) {
        match self.gateway.list_documents().await {
            Ok(documents) => {
                let count = documents.len();
                self.registry.write().await.replace(documents);
                let _ = self.events.send(ClientEvent::DocumentsRefreshed { count });
            }
            Err(err) => {
                warn!("registry: refresh failed, keeping cached list: {err}");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
