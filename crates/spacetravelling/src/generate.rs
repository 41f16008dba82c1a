//! Page generation: fetch a post, build its view and render it.

use spacetravelling_core::{
    post::{build_post_page, PostPage, RenderOptions},
    storage::{ContentRepository, RepositoryError, POSTS_DOCUMENT_TYPE},
};
use thiserror::Error;

use crate::render::render_page;

/// Errors that can occur while generating a page.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Failed to render template: {0}")]
    Render(#[from] askama::Error),
}

/// Outcome of generating the page for one slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// The rendered HTML document.
    Page(String),
    /// No post has this slug.
    NotFound,
    /// The post exists but has no publication date yet.
    Unpublished,
}

/// Fetches the post with the given slug and renders its page.
pub async fn generate_page(
    repo: &dyn ContentRepository,
    slug: &str,
    options: &RenderOptions,
) -> Result<Generated, GenerationError> {
    let Some(document) = repo.get_by_uid(POSTS_DOCUMENT_TYPE, slug).await? else {
        return Ok(Generated::NotFound);
    };

    match build_post_page(Some(&document), false, options) {
        PostPage::Loading => Ok(Generated::Unpublished),
        page => Ok(Generated::Page(render_page(&page, options)?)),
    }
}
