//! In-memory page cache implementation with LRU eviction.
//!
//! Entries never expire on their own. Each one remembers when it was
//! generated so the server can decide whether it is stale and schedule a
//! regeneration while it keeps serving the old markup.
//!
//! Pages rendered at startup are pinned and never evicted. Pages generated
//! on demand and not-found markers live in two separate LRUs, so requests
//! for unknown slugs can only evict other markers.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::RwLock;

/// What was produced the last time a slug was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// A fully rendered HTML page.
    Html(Arc<str>),
    /// The slug has no document. Remembered so repeated misses don't hit the CMS.
    NotFound,
}

/// A single cache entry.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub content: PageContent,
    pub generated_at: Instant,
}

impl CachedPage {
    /// Creates an entry generated now.
    pub fn new(content: PageContent) -> Self {
        Self {
            content,
            generated_at: Instant::now(),
        }
    }

    /// Time elapsed since the entry was generated.
    pub fn age(&self) -> Duration {
        self.generated_at.elapsed()
    }
}

#[derive(Debug)]
struct Entries {
    /// Pre-rendered pages, kept for the lifetime of the process.
    pinned: HashMap<String, CachedPage>,
    /// Pages generated on demand.
    pages: LruCache<String, CachedPage>,
    /// Not-found markers.
    missing: LruCache<String, CachedPage>,
}

/// In-memory page cache keyed by slug.
///
/// Thread-safe cache using `Arc<RwLock<_>>` for concurrent access.
/// `max_entries` bounds the on-demand pages and the not-found markers
/// separately; pinned pages are not counted against it.
#[derive(Debug, Clone)]
pub struct PageCache {
    entries: Arc<RwLock<Entries>>,
    capacity: NonZeroUsize,
}

impl PageCache {
    /// Creates a new page cache.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(RwLock::new(Entries {
                pinned: HashMap::new(),
                pages: LruCache::new(capacity),
                missing: LruCache::new(capacity),
            })),
            capacity,
        }
    }

    /// Maximum number of on-demand pages (and, separately, not-found markers).
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the cached entry for a slug, marking it as recently used.
    pub async fn get(&self, slug: &str) -> Option<CachedPage> {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.pinned.get(slug) {
            return Some(entry.clone());
        }
        if let Some(entry) = entries.pages.get(slug) {
            return Some(entry.clone());
        }
        entries.missing.get(slug).cloned()
    }

    /// Stores a pre-rendered page that is never evicted.
    pub async fn pin_html(&self, slug: &str, html: impl Into<Arc<str>>) {
        let mut entries = self.entries.write().await;
        entries.pages.pop(slug);
        entries.missing.pop(slug);
        entries.pinned.insert(
            slug.to_string(),
            CachedPage::new(PageContent::Html(html.into())),
        );
    }

    /// Stores a rendered page for a slug, replacing any previous entry.
    ///
    /// A pinned page stays pinned.
    pub async fn insert_html(&self, slug: &str, html: impl Into<Arc<str>>) {
        let entry = CachedPage::new(PageContent::Html(html.into()));
        let mut entries = self.entries.write().await;
        entries.missing.pop(slug);
        if let Some(pinned) = entries.pinned.get_mut(slug) {
            *pinned = entry;
        } else {
            entries.pages.put(slug.to_string(), entry);
        }
    }

    /// Remembers that a slug has no document, dropping any page it had.
    pub async fn insert_not_found(&self, slug: &str) {
        let mut entries = self.entries.write().await;
        entries.pinned.remove(slug);
        entries.pages.pop(slug);
        entries
            .missing
            .put(slug.to_string(), CachedPage::new(PageContent::NotFound));
    }

    /// Drops every entry for a slug.
    pub async fn remove(&self, slug: &str) {
        let mut entries = self.entries.write().await;
        entries.pinned.remove(slug);
        entries.pages.pop(slug);
        entries.missing.pop(slug);
    }

    /// Number of cached entries, markers included.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.pinned.len() + entries.pages.len() + entries.missing.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
