use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send one chat message and print the complete response
    Chat {
        prompt: String,
    },

    /// Stream a chat response to stdout as it is generated
    Stream {
        prompt: String,
    },

    /// Generate mermaid diagram source for a description
    Diagram {
        prompt: String,

        /// Write the diagram source to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an image and print its URL
    Image {
        prompt: String,
    },
}
