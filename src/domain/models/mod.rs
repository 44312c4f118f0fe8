mod chat_result;
mod diagram;
mod image;
mod turn;

pub use chat_result::*;
pub use diagram::*;
pub use image::*;
pub use turn::*;
