pub mod chat_controller;
pub mod diagram_controller;
pub mod image_controller;
pub mod stream_controller;

pub use chat_controller::ChatController;
pub use diagram_controller::DiagramController;
pub use image_controller::ImageController;
pub use stream_controller::StreamController;
