//! Rendered page cache.
//!
//! Pages live in memory only. The server regenerates stale entries in the
//! background, so a restart starts again from the pre-rendered set.

pub mod memory;

pub use memory::{CachedPage, PageCache, PageContent};
