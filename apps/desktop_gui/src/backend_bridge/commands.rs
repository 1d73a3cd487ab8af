use client_core::UploadFile;

/// Commands queued from the UI thread to the backend worker. Each maps to a
/// single `LibrarianClient` call; validation (blank query, upload already in
/// flight) lives in the client, not here.
pub enum BackendCommand {
    RefreshDocuments,
    SubmitQuery { text: String },
    UploadDocument { file: UploadFile },
    AcknowledgeUploadError,
}
