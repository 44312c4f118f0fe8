//! # Domain Layer
//!
//! Message vocabulary, result envelopes, and the gateway error taxonomy.
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
