use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, DiagramController, ImageController, StreamController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    stream_controller: StreamController<'a>,
    diagram_controller: DiagramController<'a>,
    image_controller: ImageController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            stream_controller: StreamController::new(container),
            diagram_controller: DiagramController::new(container),
            image_controller: ImageController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat { prompt } => self.chat_controller.chat(prompt).await,
            Commands::Stream { prompt } => self.stream_controller.stream(prompt).await,
            Commands::Diagram { prompt, output } => {
                self.diagram_controller.diagram(prompt, output).await
            }
            Commands::Image { prompt } => self.image_controller.image(prompt).await,
        }
    }
}
