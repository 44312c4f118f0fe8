mod chat_client;
mod image_client;
mod transcript_store;

pub use chat_client::*;
pub use image_client::*;
pub use transcript_store::*;
