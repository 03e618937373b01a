use chrono::{DateTime, Utc}; // Timezone-independent creation instants
use serde::{Deserialize, Serialize};
use thiserror::Error; // For domain-specific errors

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Document identifier cannot be empty")]
    EmptyDocumentId,
}

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

// --- Author ---

/// Author reference carried on every document. A plain value: nothing
/// validates it against a separate author registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record: identifier, title, content, author and creation instant.
///
/// Title, content and author are mandatory at construction, so every search
/// predicate always has a value to inspect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    title: String,
    content: String,
    author: Author,
    created: DateTime<Utc>,
}

impl Document {
    /// Creates a document. The identifier must be non-empty; it is the key
    /// under which the store holds the document.
    pub fn new(
        id: DocumentId,
        title: String,
        content: String,
        author: Author,
        created: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id.as_str().is_empty() {
            return Err(DomainError::EmptyDocumentId);
        }
        Ok(Self {
            id,
            title,
            content,
            author,
            created,
        })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

// --- Search Request ---

/// Optional-field filter descriptor evaluated against each stored document.
///
/// A criterion left as `None` (or set to an empty list) is skipped entirely:
/// it neither includes nor excludes any document. Set criteria combine with
/// logical AND across dimensions; a multi-valued dimension is satisfied by
/// any one of its listed values.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SearchRequest {
    /// Case-sensitive title prefixes (match-any).
    #[serde(default)]
    pub title_prefixes: Option<Vec<String>>,
    /// Case-sensitive content substrings (match-any).
    #[serde(default)]
    pub contains_contents: Option<Vec<String>>,
    /// Exact author identifiers (match-any).
    #[serde(default)]
    pub author_ids: Option<Vec<String>>,
    /// Inclusive lower bound on the creation instant.
    #[serde(default)]
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the creation instant.
    #[serde(default)]
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// True when every set criterion accepts the document.
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(prefixes) = set_values(&self.title_prefixes) {
            if !prefixes
                .iter()
                .any(|prefix| document.title().starts_with(prefix.as_str()))
            {
                return false;
            }
        }
        if let Some(substrings) = set_values(&self.contains_contents) {
            if !substrings
                .iter()
                .any(|substring| document.content().contains(substring.as_str()))
            {
                return false;
            }
        }
        if let Some(author_ids) = set_values(&self.author_ids) {
            if !author_ids.iter().any(|id| id == &document.author().id) {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if document.created() < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if document.created() > to {
                return false;
            }
        }
        true
    }
}

/// Treats `None` and `Some(empty)` alike: an unset criterion.
fn set_values(values: &Option<Vec<String>>) -> Option<&Vec<String>> {
    values.as_ref().filter(|list| !list.is_empty())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created_at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap()
    }

    fn test_document(title: &str, content: &str, author_id: &str, hour: u32) -> Document {
        Document::new(
            DocumentId::new(format!("{title}-{author_id}")),
            title.to_string(),
            content.to_string(),
            Author::new(author_id, format!("Author{author_id}")),
            created_at(hour),
        )
        .expect("valid test document")
    }

    #[test]
    fn document_creation_rejects_empty_id() {
        let result = Document::new(
            DocumentId::new(String::new()),
            "Title1".to_string(),
            "Content1".to_string(),
            Author::new("1", "Author1"),
            created_at(12),
        );
        assert_eq!(result, Err(DomainError::EmptyDocumentId));
    }

    #[test]
    fn empty_request_matches_everything() {
        let doc = test_document("Title1", "Content1", "1", 12);
        assert!(SearchRequest::default().matches(&doc));
    }

    #[test]
    fn empty_criterion_list_is_skipped() {
        let doc = test_document("Title1", "Content1", "1", 12);
        let request = SearchRequest {
            title_prefixes: Some(vec![]),
            ..Default::default()
        };
        assert!(request.matches(&doc));
    }

    #[test]
    fn title_prefix_is_case_sensitive_and_match_any() {
        let doc = test_document("Title1", "Content1", "1", 12);
        let matching = SearchRequest {
            title_prefixes: Some(vec!["Nope".to_string(), "Title".to_string()]),
            ..Default::default()
        };
        assert!(matching.matches(&doc));

        let wrong_case = SearchRequest {
            title_prefixes: Some(vec!["title".to_string()]),
            ..Default::default()
        };
        assert!(!wrong_case.matches(&doc));

        let not_a_prefix = SearchRequest {
            title_prefixes: Some(vec!["itle".to_string()]),
            ..Default::default()
        };
        assert!(!not_a_prefix.matches(&doc));
    }

    #[test]
    fn content_substring_matches_anywhere() {
        let doc = test_document("Title1", "AnotherContent", "1", 12);
        let request = SearchRequest {
            contains_contents: Some(vec!["Content".to_string()]),
            ..Default::default()
        };
        assert!(request.matches(&doc));

        let missing = SearchRequest {
            contains_contents: Some(vec!["content".to_string()]),
            ..Default::default()
        };
        assert!(!missing.matches(&doc));
    }

    #[test]
    fn author_id_requires_exact_membership() {
        let doc = test_document("Title1", "Content1", "1", 12);
        let matching = SearchRequest {
            author_ids: Some(vec!["2".to_string(), "1".to_string()]),
            ..Default::default()
        };
        assert!(matching.matches(&doc));

        let other_author = SearchRequest {
            author_ids: Some(vec!["2".to_string()]),
            ..Default::default()
        };
        assert!(!other_author.matches(&doc));
    }

    #[test]
    fn created_bounds_are_inclusive() {
        let doc = test_document("Title1", "Content1", "1", 12);
        let exact = SearchRequest {
            created_from: Some(created_at(12)),
            created_to: Some(created_at(12)),
            ..Default::default()
        };
        assert!(exact.matches(&doc));

        let too_late = SearchRequest {
            created_from: Some(created_at(13)),
            ..Default::default()
        };
        assert!(!too_late.matches(&doc));

        let too_early = SearchRequest {
            created_to: Some(created_at(11)),
            ..Default::default()
        };
        assert!(!too_early.matches(&doc));
    }

    #[test]
    fn criteria_combine_with_and() {
        let doc = test_document("Title1", "Content1", "1", 12);
        let both_satisfied = SearchRequest {
            title_prefixes: Some(vec!["Title".to_string()]),
            author_ids: Some(vec!["1".to_string()]),
            ..Default::default()
        };
        assert!(both_satisfied.matches(&doc));

        let one_fails = SearchRequest {
            title_prefixes: Some(vec!["Title".to_string()]),
            author_ids: Some(vec!["2".to_string()]),
            ..Default::default()
        };
        assert!(!one_fails.matches(&doc));
    }

    #[test]
    fn search_request_deserializes_with_all_fields_optional() {
        let request: SearchRequest = serde_json::from_str("{}").expect("empty request");
        assert!(request.title_prefixes.is_none());
        assert!(request.contains_contents.is_none());
        assert!(request.author_ids.is_none());
        assert!(request.created_from.is_none());
        assert!(request.created_to.is_none());

        let request: SearchRequest = serde_json::from_str(
            r#"{"title_prefixes": ["Title"], "created_from": "2024-05-10T12:00:00Z"}"#,
        )
        .expect("partial request");
        assert_eq!(request.title_prefixes, Some(vec!["Title".to_string()]));
        assert_eq!(request.created_from, Some(created_at(12)));
    }
}
