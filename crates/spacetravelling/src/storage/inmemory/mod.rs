//! In-memory content repository.
//!
//! Stores documents in a `Vec` wrapped in `Arc<RwLock<_>>`, keeping the
//! order they were added in. Useful to serve or export a site from a JSON
//! fixture file without a Prismic repository.
//!
//! # Example
//!
//! ```rust,ignore
//! use spacetravelling::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::from_json_file("fixtures/posts.json")?;
//! ```

#![allow(dead_code)]

mod repository;

pub use repository::InMemoryRepository;
