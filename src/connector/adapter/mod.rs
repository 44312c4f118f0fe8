mod mock_client;
mod openrouter_client;
mod sse;

pub use mock_client::*;
pub use openrouter_client::*;
pub use sse::*;
