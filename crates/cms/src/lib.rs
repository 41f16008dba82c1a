//! spacetravelling_cms - Prismic client for the spacetravelling blog.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;
mod repository;

pub use client::PrismicClient;
pub use error::{ClientError, Result};
