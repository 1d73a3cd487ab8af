//! Upload workflow state. Independent of the query session; both may be
//! non-idle at the same time.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    /// Normalized failure message awaiting user acknowledgment.
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    phase: UploadPhase,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading)
    }

    /// Attempts the transition into `Uploading`. Rejected while an upload is
    /// already in flight, which is what makes one-upload-at-a-time hold.
    pub fn begin(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.phase = UploadPhase::Uploading;
        true
    }

    /// Successful uploads land back in `Idle`; completion is signaled to the
    /// presentation layer through events, not through a dedicated phase.
    pub fn finish_ok(&mut self) {
        self.phase = UploadPhase::Idle;
    }

    pub fn finish_err(&mut self, message: impl Into<String>) {
        self.phase = UploadPhase::Error(message.into());
    }

    /// User acknowledged the error banner.
    pub fn acknowledge_error(&mut self) {
        if matches!(self.phase, UploadPhase::Error(_)) {
            self.phase = UploadPhase::Idle;
        }
    }
}
