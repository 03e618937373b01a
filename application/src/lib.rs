use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Author, Document, DocumentId, DomainError, SearchRequest};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
    #[error("Domain validation error: {0}")]
    DomainError(#[from] DomainError), // Propagate domain errors cleanly
}

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing and retrieving documents.
///
/// Absent lookups are `Ok(None)`, never an error. The in-memory
/// implementation cannot fail; the `Result` surface exists so other
/// backends can.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Inserts or overwrites the entry keyed by the document's identifier.
    async fn save(&self, document: &Document) -> Result<(), ApplicationError>;
    /// Retrieves a document by its identifier.
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns every stored document the request accepts.
    async fn find_matching(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Document>, ApplicationError>;
}

/// Source of fresh, store-unique document identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> DocumentId;
}

// --- Request Models (Data Transfer Objects - DTOs) ---

/// Request to save a document. When `id` is absent or empty, a generated
/// identifier is assigned before storing.
#[derive(Deserialize, Debug, Clone)]
pub struct SaveDocumentRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

// --- Application Services (Use Cases) ---

/// Service exposing the repository's save / find / search operations.
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepository>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            repository,
            id_generator,
        }
    }

    /// Upserts a document and returns the stored state, identifier populated.
    ///
    /// Overwriting an existing identifier fully replaces the previous entry;
    /// there is no field-level merge.
    #[instrument(skip(self, request), fields(doc_id = ?request.id))]
    pub async fn save_document(
        &self,
        request: SaveDocumentRequest,
    ) -> Result<Document, ApplicationError> {
        let id = match request.id.filter(|id| !id.is_empty()) {
            Some(id) => DocumentId::new(id),
            None => {
                let id = self.id_generator.next_id();
                debug!(doc_id = %id.as_str(), "Assigned generated identifier");
                id
            }
        };

        let document = Document::new(
            id,
            request.title,
            request.content,
            request.author,
            request.created,
        )?;
        self.repository.save(&document).await?;
        info!(doc_id = %document.id().as_str(), "Document saved");
        Ok(document)
    }

    /// Exact-match lookup. An identifier never saved yields `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn find_document(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        self.repository.get(&DocumentId::new(id.to_string())).await
    }

    /// Returns the subset of stored documents satisfying all set criteria.
    #[instrument(skip(self, request))]
    pub async fn search_documents(
        &self,
        request: SearchRequest,
    ) -> Result<Vec<Document>, ApplicationError> {
        let start = Instant::now();
        let documents = self.repository.find_matching(&request).await?;
        info!(
            hits = documents.len(),
            time_ms = start.elapsed().as_millis() as u64,
            "Search completed"
        );
        Ok(documents)
    }
}
