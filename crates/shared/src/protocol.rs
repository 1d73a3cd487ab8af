use serde::{Deserialize, Serialize};

/// JSON body for `POST {base}/query/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Raw verification reply as the backend sends it. Every field is optional:
/// the client validates structure before surfacing anything, so a partially
/// populated reply never panics a deserialize path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReply {
    pub answer: Option<String>,
    pub faithfulness_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_citation: Option<String>,
}

/// Citation strings the backend emits to mean "no citation available".
/// These must never be rendered verbatim.
pub const CITATION_SENTINELS: [&str; 2] = ["None", "System Error"];

/// Sentinel written into synthetic failure results so the single result
/// rendering path treats them as citation-free.
pub const SYSTEM_ERROR_CITATION: &str = "System Error";
