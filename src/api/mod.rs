//! REST route definitions

pub mod error;
pub mod health;
pub mod members;

pub use error::ApiError;
