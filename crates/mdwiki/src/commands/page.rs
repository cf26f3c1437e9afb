//! `mdwiki render`, `mdwiki code` and `mdwiki raw` commands.

use std::path::PathBuf;

use clap::Args;

use crate::context::{Wiki, WikiArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for single-file commands.
#[derive(Args)]
pub(crate) struct FileArgs {
    /// File to render.
    file: PathBuf,
}

impl FileArgs {
    /// Render a Markdown page with its table of contents.
    pub(crate) async fn render(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let wiki = Wiki::from_args(wiki, false, output)?;
        let html = wiki.renderer.render_file(&self.file).await?;
        output.content(&html)?;
        Ok(())
    }

    /// Render a source file as a highlighted code block.
    pub(crate) async fn code(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let wiki = Wiki::from_args(wiki, false, output)?;
        let html = wiki.renderer.render_code(&self.file).await?;
        output.content(&html)?;
        Ok(())
    }

    /// Print a file without rendering it.
    pub(crate) async fn raw(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let wiki = Wiki::from_args(wiki, false, output)?;
        let text = wiki.renderer.render_raw(&self.file).await?;
        output.content(text.trim_end_matches('\n'))?;
        Ok(())
    }
}
