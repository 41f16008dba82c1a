use async_trait::async_trait;

use crate::post::{Document, DocumentRef};

use super::Result;

/// Custom type under which blog posts are stored in the CMS.
pub const POSTS_DOCUMENT_TYPE: &str = "posts";

/// Read access to published CMS documents.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists every published document of the given custom type.
    async fn query_by_type(&self, document_type: &str) -> Result<Vec<DocumentRef>>;

    /// Fetches a single document of the given type by its UID (slug).
    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<Document>>;
}
