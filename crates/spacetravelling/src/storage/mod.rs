//! Content repository implementations local to the server.
//!
//! The Prismic-backed repository lives in `spacetravelling_cms`. This module
//! holds the in-memory repository used for fixtures and tests.

pub mod inmemory;
