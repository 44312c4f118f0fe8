use anyhow::Result;

use super::super::Container;

pub struct ImageController<'a> {
    container: &'a Container,
}

impl<'a> ImageController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn image(&self, prompt: String) -> Result<String> {
        let use_case = self.container.image_use_case();
        let image = use_case.execute(&prompt).await?;
        Ok(image.into_url())
    }
}
