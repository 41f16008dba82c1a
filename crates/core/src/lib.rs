//! spacetravelling_core - pure logic for rendering blog posts.
//!
//! Everything here is free of I/O: the CMS document model, the reading-time
//! estimator, the rich text serializer, the page view builder and the
//! rules that decide how unknown slugs are served. Network access lives
//! behind the [`storage::ContentRepository`] trait.

pub mod post;
pub mod serde;
pub mod storage;
