//! `mdwiki toc` command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::context::{Wiki, WikiArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown page to read headings from.
    file: PathBuf,

    /// Leave out a level 1 heading at the start of the page.
    #[arg(long)]
    skip_first: bool,
}

impl TocArgs {
    pub(crate) async fn execute(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let wiki = Wiki::from_args(wiki, false, output)?;
        let content = wiki.renderer.render_raw(&self.file).await?;
        let html = wiki
            .renderer
            .render_table_of_contents(&content, self.skip_first)?;

        if html.is_empty() {
            output.info("Page has fewer than two headings, no table of contents");
        } else {
            output.content(&html)?;
        }
        Ok(())
    }
}
