// ./infrastructure/src/persistence/in_memory_repository.rs
use application::{ApplicationError, DocumentRepository, IdGenerator};
use async_trait::async_trait;
use dashmap::DashMap;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

// --- Document Repository Implementation ---

/// Keyed in-memory document store.
///
/// Concurrent saves to the same identifier resolve last-writer-wins.
/// Iteration order over the map is unspecified but stable while no writes
/// occur, so repeated identical searches return results in the same order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    documents: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    async fn save(&self, document: &Document) -> Result<(), ApplicationError> {
        debug!(doc_id = %document.id().as_str(), "Saving document to in-memory store");
        // Insert the document (wrapped in Arc); an existing entry is replaced whole
        self.documents
            .insert(document.id().clone(), Arc::new(document.clone()));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id.as_str(), "Getting document from in-memory store");
        Ok(self.documents.get(id).map(|doc_ref| (**doc_ref).clone()))
    }

    /// Linear scan: every stored document is evaluated against the request.
    #[instrument(skip(self, request))]
    async fn find_matching(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Document>, ApplicationError> {
        let matched: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| request.matches(entry.value()))
            .map(|entry| (**entry.value()).clone())
            .collect();
        debug!(
            total = self.documents.len(),
            matched = matched.len(),
            "Scanned in-memory store"
        );
        Ok(matched)
    }
}

// --- Identifier Generator Implementation ---

/// Sequential identifier source backed by an atomic counter: "1", "2", ...
///
/// Counter state is not preserved across process restarts, and nothing
/// prevents a caller-supplied numeric identifier from colliding with a
/// later generated one.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> DocumentId {
        let next = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        DocumentId::new(next.to_string())
    }
}
