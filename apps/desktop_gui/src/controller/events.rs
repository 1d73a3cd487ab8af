//! Backend-to-UI events and display helpers for the desktop client.

use client_core::{ConfidenceBand, VerificationResult};

pub enum UiEvent {
    BackendReady,
    BackendStartupFailed(String),
    QueryPending,
    QuerySettled(VerificationResult),
    DocumentCount(usize),
    UploadStarted,
    UploadFinished,
    UploadFailed(String),
}

/// Faithfulness score rendered the way the result card shows it: a whole
/// percentage. Out-of-range backend values pass through unclamped.
pub fn format_faithfulness(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

pub fn confidence_color(band: ConfidenceBand) -> egui::Color32 {
    match band {
        ConfidenceBand::High => egui::Color32::from_rgb(52, 211, 153),
        ConfidenceBand::Low => egui::Color32::from_rgb(251, 191, 36),
    }
}

pub fn status_label(backend_ready: bool, query_pending: bool) -> &'static str {
    if !backend_ready {
        "Starting"
    } else if query_pending {
        "Analyzing"
    } else {
        "Ready"
    }
}
