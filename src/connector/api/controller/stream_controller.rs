use std::io::Write;

use anyhow::Result;
use futures_util::StreamExt;

use super::super::Container;

pub struct StreamController<'a> {
    container: &'a Container,
}

impl<'a> StreamController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Forward fragments to stdout as they arrive; the trailing newline is
    /// the terminal signal. Output already happened, so the router gets an
    /// empty string back.
    pub async fn stream(&self, prompt: String) -> Result<String> {
        let use_case = self.container.stream_chat_use_case();
        let mut fragments = use_case.execute(&prompt).await?;

        let mut stdout = std::io::stdout();
        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => {
                    stdout.write_all(text.as_bytes())?;
                    stdout.flush()?;
                }
                Err(e) => {
                    println!();
                    return Err(e.into());
                }
            }
        }
        println!();

        Ok(String::new())
    }
}
