mod chat;
mod compose;
mod diagram;
mod image;
mod stream_chat;

pub use chat::*;
pub use compose::*;
pub use diagram::*;
pub use image::*;
pub use stream_chat::*;
