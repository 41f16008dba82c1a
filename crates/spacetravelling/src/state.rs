//! Shared application state and incremental page regeneration.
//!
//! Every handler gets a cheap clone of [`AppState`]. Pages are generated
//! once at startup and then regenerated in the background whenever a
//! request hits an entry older than the revalidation interval.

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use spacetravelling_core::{
    post::{enumerate_static_paths, FallbackMode, RenderOptions},
    storage::ContentRepository,
};

use crate::{
    cache::{PageCache, PageContent},
    config::Config,
    generate::{generate_page, Generated, GenerationError},
};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ContentRepository>,
    pub pages: PageCache,
    pub render_options: Arc<RenderOptions>,
    pub fallback: FallbackMode,
    pub revalidate: Duration,
    pub public_dir: PathBuf,
    /// Slugs with a regeneration currently running.
    regenerating: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    /// Creates the application state from configuration.
    pub fn new(repo: Arc<dyn ContentRepository>, config: &Config) -> anyhow::Result<Self> {
        let render_options = config.render_options()?;

        Ok(Self {
            repo,
            pages: PageCache::new(config.page_cache_max_entries),
            render_options: Arc::new(render_options),
            fallback: config.fallback,
            revalidate: config.revalidate(),
            public_dir: config.public_dir.clone(),
            regenerating: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Generates every listed post and pins it in the page cache.
    ///
    /// Pinned pages are never evicted, so every listed post stays servable
    /// even with fallback disabled. Posts that fail to generate are logged
    /// and skipped. Returns the number of pages stored.
    pub async fn prerender(&self) -> Result<usize, GenerationError> {
        let paths = enumerate_static_paths(self.repo.as_ref()).await?;
        tracing::info!(count = paths.len(), "Pre-rendering posts");
        if paths.len() > self.pages.capacity() {
            tracing::warn!(
                count = paths.len(),
                page_cache_max_entries = self.pages.capacity(),
                "More posts than PAGE_CACHE_MAX_ENTRIES, pre-rendered pages are kept beyond the limit"
            );
        }

        let mut rendered = 0;
        for path in &paths {
            match self.generate_into_cache(&path.slug, true).await {
                Ok(Some(PageContent::Html(_))) => rendered += 1,
                Ok(_) => tracing::warn!(slug = %path.slug, "Listed post has no page"),
                Err(e) => tracing::warn!(slug = %path.slug, error = %e, "Failed to pre-render post"),
            }
        }

        Ok(rendered)
    }

    /// Generates the page for a slug and updates the cache with the result.
    ///
    /// A published post replaces the cached page. A deleted post leaves a
    /// not-found marker. An unpublished post clears the entry and returns
    /// `None`. On error the cache is left untouched.
    pub async fn regenerate(&self, slug: &str) -> Result<Option<PageContent>, GenerationError> {
        self.generate_into_cache(slug, false).await
    }

    async fn generate_into_cache(
        &self,
        slug: &str,
        pin: bool,
    ) -> Result<Option<PageContent>, GenerationError> {
        match generate_page(self.repo.as_ref(), slug, &self.render_options).await? {
            Generated::Page(html) => {
                tracing::debug!(%slug, pin, "Generated page");
                let html: Arc<str> = html.into();
                if pin {
                    self.pages.pin_html(slug, html.clone()).await;
                } else {
                    self.pages.insert_html(slug, html.clone()).await;
                }
                Ok(Some(PageContent::Html(html)))
            }
            Generated::NotFound => {
                tracing::debug!(%slug, "Post not found");
                self.pages.insert_not_found(slug).await;
                Ok(Some(PageContent::NotFound))
            }
            Generated::Unpublished => {
                tracing::debug!(%slug, "Post has no publication date yet");
                self.pages.remove(slug).await;
                Ok(None)
            }
        }
    }

    /// Starts a background regeneration for a slug unless one is already running.
    ///
    /// Returns `true` if a new regeneration was spawned.
    pub fn ensure_regeneration(&self, slug: &str) -> bool {
        {
            let Ok(mut regenerating) = self.regenerating.lock() else {
                tracing::error!("Regeneration set lock poisoned");
                return false;
            };
            if !regenerating.insert(slug.to_string()) {
                return false;
            }
        }

        let state = self.clone();
        let slug = slug.to_string();
        tokio::spawn(async move {
            if let Err(e) = state.regenerate(&slug).await {
                tracing::warn!(%slug, error = %e, "Background regeneration failed, keeping cached page");
            }
            if let Ok(mut regenerating) = state.regenerating.lock() {
                regenerating.remove(&slug);
            }
        });

        true
    }

    /// Returns `true` while a background regeneration for the slug is running.
    #[cfg(test)]
    pub fn is_regenerating(&self, slug: &str) -> bool {
        self.regenerating
            .lock()
            .map(|regenerating| regenerating.contains(slug))
            .unwrap_or(false)
    }
}
