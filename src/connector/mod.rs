//! # Connector Layer
//!
//! Adapters binding the application ports to the outside world: the HTTP
//! provider client, the SSE fragment stream, transcript stores, and the CLI
//! container/router.

pub mod adapter;
pub mod api;
pub mod storage;

pub use adapter::*;
pub use api::*;
pub use storage::*;
