//! In-memory document store
//!
//! Keeps a receipt per `(session, slot)`; the bytes themselves are only
//! hashed, never retained.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use im_core::ports::{DocumentReceipt, DocumentStorageError, DocumentStoragePort};
use im_core::registration::DocumentUpload;
use im_core::DocumentSlot;

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    receipts: Mutex<HashMap<(Uuid, DocumentSlot), DocumentReceipt>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipt(&self, session_id: Uuid, slot: DocumentSlot) -> Option<DocumentReceipt> {
        self.receipts().get(&(session_id, slot)).cloned()
    }

    /// Receipts stored for `session_id`, ordered by slot.
    pub fn receipts_for(&self, session_id: Uuid) -> Vec<DocumentReceipt> {
        let mut receipts: Vec<_> = self
            .receipts()
            .values()
            .filter(|receipt| receipt.session_id == session_id)
            .cloned()
            .collect();
        receipts.sort_by_key(|receipt| receipt.slot);
        receipts
    }

    fn receipts(&self) -> MutexGuard<'_, HashMap<(Uuid, DocumentSlot), DocumentReceipt>> {
        self.receipts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStoragePort for InMemoryDocumentStore {
    async fn store(
        &self,
        session_id: Uuid,
        slot: DocumentSlot,
        upload: DocumentUpload,
    ) -> Result<DocumentReceipt, DocumentStorageError> {
        if upload.bytes.is_empty() {
            return Err(DocumentStorageError::EmptyDocument(upload.file_name));
        }

        let receipt = DocumentReceipt {
            session_id,
            slot,
            byte_len: upload.bytes.len(),
            digest: hex::encode(blake3::hash(&upload.bytes).as_bytes()),
            file_name: upload.file_name,
            stored_at: Utc::now(),
        };
        debug!(%session_id, ?slot, digest = %receipt.digest, "document stored");
        self.receipts().insert((session_id, slot), receipt.clone());
        Ok(receipt)
    }

    async fn discard(&self, session_id: Uuid, slot: DocumentSlot) -> Result<(), DocumentStorageError> {
        if self.receipts().remove(&(session_id, slot)).is_some() {
            debug!(%session_id, ?slot, "document discarded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(bytes: &[u8]) -> DocumentUpload {
        DocumentUpload {
            file_name: "passport.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn store_records_digest_and_replaces_previous() {
        let store = InMemoryDocumentStore::new();
        let session = Uuid::new_v4();

        store
            .store(session, DocumentSlot::Identity, upload(b"first"))
            .await
            .unwrap();
        let receipt = store
            .store(session, DocumentSlot::Identity, upload(b"second"))
            .await
            .unwrap();

        assert_eq!(receipt.byte_len, 6);
        assert_eq!(receipt.digest, blake3::hash(b"second").to_hex().to_string());
        assert_eq!(store.receipts_for(session), vec![receipt]);
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .store(Uuid::new_v4(), DocumentSlot::Additional, upload(b""))
            .await
            .unwrap_err();
        assert_eq!(err, DocumentStorageError::EmptyDocument("passport.pdf".into()));
    }

    #[tokio::test]
    async fn discard_is_idempotent_and_scoped_to_session() {
        let store = InMemoryDocumentStore::new();
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        store.store(mine, DocumentSlot::Identity, upload(b"a")).await.unwrap();
        store.store(theirs, DocumentSlot::Identity, upload(b"b")).await.unwrap();

        store.discard(mine, DocumentSlot::Identity).await.unwrap();
        store.discard(mine, DocumentSlot::Identity).await.unwrap();

        assert!(store.receipt(mine, DocumentSlot::Identity).is_none());
        assert!(store.receipt(theirs, DocumentSlot::Identity).is_some());
    }
}
