use anyhow::Result;

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, prompt: String) -> Result<String> {
        let use_case = self.container.chat_use_case();
        let result = use_case.execute(&prompt).await?;
        Ok(result.into_content())
    }
}
