//! In-memory repository implementation.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use spacetravelling_core::post::{Document, DocumentRef};
use spacetravelling_core::storage::{ContentRepository, RepositoryError, Result};

/// Accepted fixture layouts: a bare array of documents or a saved search response.
#[derive(Deserialize)]
#[serde(untagged)]
enum Fixture {
    Documents(Vec<Document>),
    SearchResponse { results: Vec<Document> },
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    documents: Arc<RwLock<Vec<Document>>>,
    failure: Arc<RwLock<Option<RepositoryError>>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
            ..Self::default()
        }
    }

    /// Loads documents from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixtures from {}", path.display()))?;

        let documents = match fixture {
            Fixture::Documents(documents) => documents,
            Fixture::SearchResponse { results } => results,
        };

        Ok(Self::with_documents(documents))
    }

    /// Adds a document, replacing any document of the same type with the same UID.
    pub async fn upsert(&self, document: Document) {
        let mut documents = self.documents.write().await;
        match documents
            .iter_mut()
            .find(|d| d.document_type == document.document_type && d.uid == document.uid)
        {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    /// Removes the document with the given UID.
    pub async fn remove(&self, uid: &str) {
        self.documents.write().await.retain(|d| d.uid != uid);
    }

    /// Makes every following call fail with `error` until [`Self::recover`] is called.
    pub async fn fail_with(&self, error: RepositoryError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Number of `get_by_uid` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn check_failure(&self) -> Result<()> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn query_by_type(&self, document_type: &str) -> Result<Vec<DocumentRef>> {
        self.check_failure().await?;

        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| d.document_type == document_type)
            .map(|d| DocumentRef {
                id: d.id.clone(),
                uid: Some(d.uid.clone()),
                document_type: d.document_type.clone(),
            })
            .collect())
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<Document>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;

        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|d| d.document_type == document_type && d.uid == uid)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use spacetravelling_core::storage::POSTS_DOCUMENT_TYPE;

    use super::*;

    fn post(uid: &str) -> Document {
        Document::new(uid, uid, "Ana", "https://example.com/banner.png")
    }

    #[tokio::test]
    async fn test_query_by_type_keeps_order() {
        let repo = InMemoryRepository::with_documents(vec![post("b"), post("a"), post("c")]);

        let refs = repo.query_by_type(POSTS_DOCUMENT_TYPE).await.unwrap();

        let uids: Vec<_> = refs.iter().filter_map(|r| r.uid.as_deref()).collect();
        assert_eq!(uids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_query_by_type_filters_type() {
        let mut page = post("about");
        page.document_type = "page".to_string();
        let repo = InMemoryRepository::with_documents(vec![post("hello"), page]);

        let refs = repo.query_by_type(POSTS_DOCUMENT_TYPE).await.unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].uid.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_get_by_uid() {
        let repo = InMemoryRepository::with_documents(vec![post("hello")]);

        let found = repo.get_by_uid(POSTS_DOCUMENT_TYPE, "hello").await.unwrap();
        let missing = repo.get_by_uid(POSTS_DOCUMENT_TYPE, "nope").await.unwrap();

        assert_eq!(found.map(|d| d.uid), Some("hello".to_string()));
        assert!(missing.is_none());
        assert_eq!(repo.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_upsert_and_remove() {
        let repo = InMemoryRepository::new();

        repo.upsert(post("hello")).await;
        let mut updated = post("hello");
        updated.data.title = "Updated".to_string();
        repo.upsert(updated).await;

        let found = repo.get_by_uid(POSTS_DOCUMENT_TYPE, "hello").await.unwrap();
        assert_eq!(found.unwrap().data.title, "Updated");
        assert_eq!(repo.query_by_type(POSTS_DOCUMENT_TYPE).await.unwrap().len(), 1);

        repo.remove("hello").await;
        assert!(repo
            .get_by_uid(POSTS_DOCUMENT_TYPE, "hello")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_fail_with_and_recover() {
        let repo = InMemoryRepository::with_documents(vec![post("hello")]);

        repo.fail_with(RepositoryError::QueryFailed("boom".into()))
            .await;
        assert_eq!(
            repo.query_by_type(POSTS_DOCUMENT_TYPE).await,
            Err(RepositoryError::QueryFailed("boom".into()))
        );

        repo.recover().await;
        assert!(repo.query_by_type(POSTS_DOCUMENT_TYPE).await.is_ok());
    }

    #[tokio::test]
    async fn test_from_json_file_accepts_search_response() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "page": 1,
                "total_pages": 1,
                "results": [
                    {{ "id": "1", "uid": "hello", "type": "posts", "data": {{ "title": "Hello" }} }}
                ]
            }}"#
        )
        .unwrap();

        let repo = InMemoryRepository::from_json_file(file.path()).unwrap();

        let document = repo
            .get_by_uid(POSTS_DOCUMENT_TYPE, "hello")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.data.title, "Hello");
    }

    #[tokio::test]
    async fn test_from_json_file_accepts_document_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "id": "1", "uid": "a", "type": "posts", "data": {{}} }}]"#
        )
        .unwrap();

        let repo = InMemoryRepository::from_json_file(file.path()).unwrap();

        assert_eq!(repo.query_by_type(POSTS_DOCUMENT_TYPE).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_from_json_file_document_without_type_is_a_post() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "id": "1", "uid": "untyped", "data": {{}} }}]"#).unwrap();

        let repo = InMemoryRepository::from_json_file(file.path()).unwrap();

        let listed = repo.query_by_type(POSTS_DOCUMENT_TYPE).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].uid.as_deref(), Some("untyped"));
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let result = InMemoryRepository::from_json_file("/definitely/not/here.json");
        assert!(result.is_err());
    }
}
