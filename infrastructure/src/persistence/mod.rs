pub mod in_memory_repository;

// Re-export the store and the identifier source
pub use in_memory_repository::{InMemoryDocumentRepository, SequentialIdGenerator};
