//! [`ContentRepository`] implementation backed by the Prismic API.

use async_trait::async_trait;
use spacetravelling_core::{
    post::{Document, DocumentRef},
    storage::{ContentRepository, Result},
};

use crate::client::PrismicClient;

#[async_trait]
impl ContentRepository for PrismicClient {
    async fn query_by_type(&self, document_type: &str) -> Result<Vec<DocumentRef>> {
        Ok(self.query_all_by_type(document_type).await?)
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<Document>> {
        Ok(self.fetch_by_uid(document_type, uid).await?)
    }
}
