pub mod error;
pub mod health;
pub mod post;

pub use error::AppError;
