//! In-memory page cache with LRU eviction.

mod cache;

pub use cache::{CachedPage, PageCache, PageContent};
