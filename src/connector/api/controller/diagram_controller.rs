use std::path::PathBuf;

use anyhow::Result;

use super::super::Container;

pub struct DiagramController<'a> {
    container: &'a Container,
}

impl<'a> DiagramController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn diagram(&self, prompt: String, output: Option<PathBuf>) -> Result<String> {
        let use_case = self.container.diagram_use_case();
        let source = use_case.execute(&prompt).await?;

        match output {
            Some(path) => {
                std::fs::write(&path, source.as_str())?;
                Ok(format!("Diagram written to {}", path.display()))
            }
            None => Ok(source.into_string()),
        }
    }
}
