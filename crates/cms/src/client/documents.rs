//! Document search operations.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use spacetravelling_core::post::{Document, DocumentRef};

use super::{query, PrismicClient};
use crate::error::Result;

/// Largest page size the search API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u32,
    pub total_pages: u32,
    pub results: Vec<T>,
}

impl<T> SearchResponse<T> {
    /// Returns true when there are pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

impl PrismicClient {
    /// Run one search query against the given ref.
    pub async fn search<T: DeserializeOwned>(
        &self,
        reference: &str,
        predicates: &[String],
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse<T>> {
        let mut url = self.url(&["documents", "search"]);
        url.query_pairs_mut()
            .append_pair("ref", reference)
            .append_pair("q", &query::combine(predicates))
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());

        tracing::debug!(%url, "Querying Prismic");

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// List every published document of a custom type, following pagination.
    pub async fn query_all_by_type(&self, document_type: &str) -> Result<Vec<DocumentRef>> {
        let reference = self.master_ref().await?;
        let predicates = [query::document_type(document_type)];

        let mut documents = Vec::new();
        let mut page = 1;
        loop {
            let response: SearchResponse<DocumentRef> = self
                .search(&reference, &predicates, page, MAX_PAGE_SIZE)
                .await?;
            let has_next = response.has_next_page();
            documents.extend(response.results);

            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(documents)
    }

    /// Fetch the document of a custom type with the given UID.
    pub async fn fetch_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<Document>> {
        let reference = self.master_ref().await?;
        let predicates = [query::uid(document_type, uid)];

        let response: SearchResponse<Document> =
            self.search(&reference, &predicates, 1, 1).await?;

        Ok(response.results.into_iter().next())
    }
}
