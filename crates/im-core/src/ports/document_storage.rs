use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::registration::{DocumentSlot, DocumentUpload};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStorageError {
    #[error("document `{0}` is empty")]
    EmptyDocument(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Proof that a document was accepted by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReceipt {
    pub session_id: Uuid,
    pub slot: DocumentSlot,
    pub file_name: String,
    pub byte_len: usize,
    pub digest: String,
    pub stored_at: DateTime<Utc>,
}

/// Storage for files uploaded during a registration attempt.
#[async_trait]
pub trait DocumentStoragePort: Send + Sync {
    /// Store `upload` for `slot`, replacing anything previously stored there.
    async fn store(
        &self,
        session_id: Uuid,
        slot: DocumentSlot,
        upload: DocumentUpload,
    ) -> Result<DocumentReceipt, DocumentStorageError>;

    /// Drop whatever is stored for `slot`. Idempotent.
    async fn discard(&self, session_id: Uuid, slot: DocumentSlot) -> Result<(), DocumentStorageError>;
}
