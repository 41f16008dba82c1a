use std::path::PathBuf;

use serde::Serialize;

use crate::storage::{ContentRepository, Result, POSTS_DOCUMENT_TYPE};

use super::types::DocumentRef;

/// A post page to pre-render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StaticPath {
    pub slug: String,
}

impl StaticPath {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }

    /// URL path the page is served under.
    pub fn url_path(&self) -> String {
        format!("/post/{}", self.slug)
    }

    /// File the page is exported to, relative to the output directory.
    pub fn output_file(&self) -> PathBuf {
        PathBuf::from("post").join(&self.slug).join("index.html")
    }
}

/// Returns true for slugs that are safe to use as a URL segment and a directory name.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Maps listed documents to the paths to pre-render.
///
/// Documents without a valid UID are skipped; duplicates keep their first position.
pub fn static_paths(documents: &[DocumentRef]) -> Vec<StaticPath> {
    let mut paths: Vec<StaticPath> = Vec::with_capacity(documents.len());

    for uid in documents.iter().filter_map(|doc| doc.uid.as_deref()) {
        if is_valid_slug(uid) && !paths.iter().any(|path| path.slug == uid) {
            paths.push(StaticPath::new(uid));
        }
    }

    paths
}

/// Queries every published post and returns the paths to pre-render.
pub async fn enumerate_static_paths(repo: &dyn ContentRepository) -> Result<Vec<StaticPath>> {
    let documents = repo.query_by_type(POSTS_DOCUMENT_TYPE).await?;
    Ok(static_paths(&documents))
}
