use serde::{Deserialize, Serialize};

/// Backend-assigned document identifier. Opaque to the client; the backend
/// happens to use integers today but nothing here should depend on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub i64);

/// One entry in the ingested-document registry. Created server-side on a
/// successful upload; the client only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
}
