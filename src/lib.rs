pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod query;

pub use error::{RebarError, Result};
