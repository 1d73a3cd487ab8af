//! Query session lifecycle: one question in flight at a time, results
//! validated before they reach the presentation layer, failures folded into
//! the same rendering shape as successful answers.

use shared::{
    error::GatewayError,
    protocol::{VerificationReply, CITATION_SENTINELS, SYSTEM_ERROR_CITATION},
};

/// User-facing sentence shown when the backend cannot be reached. The
/// technical detail travels in the explanation field, not here.
pub const CONNECTIVITY_FAILURE_ANSWER: &str = "Connection failed. Is the backend server running?";

/// Display band for the faithfulness score. The 0.8 threshold matches the
/// presentation's high-confidence styling cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Low,
}

/// A structurally validated verification outcome. Built from the wire reply
/// via [`VerificationResult::from_wire`] or synthesized for failures via
/// [`VerificationResult::failure`].
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub answer: String,
    pub faithfulness_score: f64,
    pub explanation: Option<String>,
    source_citation: Option<String>,
}

impl VerificationResult {
    /// Validates a raw backend reply. An answer is mandatory; a missing
    /// faithfulness score maps to 0.0, the lowest-confidence category. The
    /// score is deliberately not clamped.
    pub fn from_wire(reply: VerificationReply) -> Result<Self, GatewayError> {
        let answer = reply.answer.ok_or_else(|| GatewayError::Query {
            message: "backend reply is missing the answer field".to_string(),
        })?;
        Ok(Self {
            answer,
            faithfulness_score: reply.faithfulness_score.unwrap_or(0.0),
            explanation: reply.explanation,
            source_citation: reply.source_citation,
        })
    }

    /// Synthetic low-faithfulness result representing a failed query, so the
    /// single result rendering path also renders failures. The citation is
    /// the system-error sentinel, which [`Self::citation`] hides.
    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            answer: CONNECTIVITY_FAILURE_ANSWER.to_string(),
            faithfulness_score: 0.0,
            explanation: Some(detail.into()),
            source_citation: Some(SYSTEM_ERROR_CITATION.to_string()),
        }
    }

    /// The citation to display, with absent values and the backend's
    /// "no citation" sentinels both mapped to `None`.
    pub fn citation(&self) -> Option<&str> {
        let citation = self.source_citation.as_deref()?;
        if citation.is_empty() || CITATION_SENTINELS.contains(&citation) {
            return None;
        }
        Some(citation)
    }

    pub fn confidence(&self) -> ConfidenceBand {
        if self.faithfulness_score > 0.8 {
            ConfidenceBand::High
        } else {
            ConfidenceBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Pending,
    Settled(VerificationResult),
}

/// Mutable per-session query state. Transitions run to completion on the
/// caller's task; the only suspension point is the gateway call between
/// [`QuerySession::begin_submit`] and [`QuerySession::settle`].
#[derive(Debug, Clone, Default)]
pub struct QuerySession {
    query_text: String,
    phase: QueryPhase,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, QueryPhase::Pending)
    }

    pub fn settled_result(&self) -> Option<&VerificationResult> {
        match &self.phase {
            QueryPhase::Settled(result) => Some(result),
            _ => None,
        }
    }

    /// Allowed in any phase and never changes the phase itself: editing the
    /// text after a result keeps the old answer visible until the next
    /// submission replaces it.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Attempts the Idle/Settled -> Pending transition. Returns the trimmed
    /// query text to send, or `None` when the submission is rejected:
    /// already pending, or blank after trimming. Entering Pending clears any
    /// previous result immediately.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.is_pending() {
            return None;
        }
        let trimmed = self.query_text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.phase = QueryPhase::Pending;
        Some(text)
    }

    pub fn settle(&mut self, result: VerificationResult) {
        self.phase = QueryPhase::Settled(result);
    }

    pub fn settle_failure(&mut self, error: &GatewayError) {
        self.settle(VerificationResult::failure(error.detail()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled_reply(answer: &str, score: f64, citation: Option<&str>) -> VerificationReply {
        VerificationReply {
            answer: Some(answer.to_string()),
            faithfulness_score: Some(score),
            explanation: None,
            source_citation: citation.map(str::to_string),
        }
    }

    #[test]
    fn blank_query_never_leaves_idle() {
        let mut session = QuerySession::new();
        assert_eq!(session.begin_submit(), None);
        assert_eq!(session.phase(), &QueryPhase::Idle);

        session.set_query_text("   \t  ");
        assert_eq!(session.begin_submit(), None);
        assert_eq!(session.phase(), &QueryPhase::Idle);
    }

    #[test]
    fn submit_trims_and_enters_pending() {
        let mut session = QuerySession::new();
        session.set_query_text("  What is a binary search tree?  ");
        assert_eq!(
            session.begin_submit().as_deref(),
            Some("What is a binary search tree?")
        );
        assert!(session.is_pending());
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut session = QuerySession::new();
        session.set_query_text("first question");
        assert!(session.begin_submit().is_some());
        assert_eq!(session.begin_submit(), None);
        assert!(session.is_pending());
    }

    #[test]
    fn settled_session_is_resubmittable() {
        let mut session = QuerySession::new();
        session.set_query_text("question");
        session.begin_submit().expect("accepted");
        session.settle(
            VerificationResult::from_wire(settled_reply("answer", 0.92, Some("Chapter 4")))
                .expect("valid"),
        );
        assert!(session.settled_result().is_some());

        session.set_query_text("another question");
        assert!(session.begin_submit().is_some());
        assert!(session.is_pending());
        assert!(session.settled_result().is_none());
    }

    #[test]
    fn editing_text_keeps_previous_result_visible() {
        let mut session = QuerySession::new();
        session.set_query_text("question");
        session.begin_submit().expect("accepted");
        session.settle(
            VerificationResult::from_wire(settled_reply("old answer", 0.9, None)).expect("valid"),
        );

        session.set_query_text("a new question, not yet submitted");
        let result = session.settled_result().expect("still visible");
        assert_eq!(result.answer, "old answer");
    }

    #[test]
    fn validated_result_carries_backend_fields() {
        let result = VerificationResult::from_wire(settled_reply(
            "A node-based structure...",
            0.92,
            Some("Chapter 4"),
        ))
        .expect("valid");
        assert_eq!(result.answer, "A node-based structure...");
        assert_eq!(result.faithfulness_score, 0.92);
        assert_eq!(result.citation(), Some("Chapter 4"));
        assert_eq!(result.confidence(), ConfidenceBand::High);
    }

    #[test]
    fn missing_answer_is_a_query_error() {
        let reply = VerificationReply {
            faithfulness_score: Some(0.5),
            ..Default::default()
        };
        assert!(matches!(
            VerificationResult::from_wire(reply),
            Err(GatewayError::Query { .. })
        ));
    }

    #[test]
    fn missing_score_maps_to_lowest_confidence() {
        let reply = VerificationReply {
            answer: Some("answer".to_string()),
            ..Default::default()
        };
        let result = VerificationResult::from_wire(reply).expect("valid");
        assert_eq!(result.faithfulness_score, 0.0);
        assert_eq!(result.confidence(), ConfidenceBand::Low);
    }

    #[test]
    fn citation_sentinels_read_as_absent() {
        for sentinel in ["None", "System Error", ""] {
            let result = VerificationResult::from_wire(settled_reply("a", 0.9, Some(sentinel)))
                .expect("valid");
            assert_eq!(result.citation(), None, "sentinel {sentinel:?}");
        }
        let absent =
            VerificationResult::from_wire(settled_reply("a", 0.9, None)).expect("valid");
        assert_eq!(absent.citation(), None);
    }

    #[test]
    fn failure_settles_as_low_faithfulness_result() {
        let mut session = QuerySession::new();
        session.set_query_text("question");
        session.begin_submit().expect("accepted");
        session.settle_failure(&GatewayError::Query {
            message: "connection refused".to_string(),
        });

        let result = session.settled_result().expect("settled");
        assert_eq!(result.answer, CONNECTIVITY_FAILURE_ANSWER);
        assert_eq!(result.faithfulness_score, 0.0);
        assert_eq!(result.citation(), None);
        assert_eq!(result.explanation.as_deref(), Some("connection refused"));
    }
}
