//! `mdwiki search` command implementation.

use clap::Args;
use mdwiki_renderer::Renderer;
use serde::Serialize;

use crate::context::{Wiki, WikiArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search query.
    query: String,

    /// Print the summary and HTML as a JSON object.
    #[arg(long)]
    json: bool,
}

/// Search page as printed with `--json`.
#[derive(Debug, Serialize)]
struct SearchPage<'a> {
    query: &'a str,
    summary: &'a str,
    html: &'a str,
}

impl SearchArgs {
    pub(crate) async fn execute(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let mut wiki = Wiki::from_args(wiki, true, output)?;
        let (summary, html) = search(&mut wiki.renderer, &self.query).await?;

        if self.json {
            let page = SearchPage {
                query: &self.query,
                summary: &summary,
                html: &html,
            };
            output.content(&serde_json::to_string_pretty(&page)?)?;
        } else {
            output.highlight(&summary);
            output.content(&html)?;
        }
        Ok(())
    }
}

/// Render the result page for `query`, returning the summary and HTML.
async fn search(renderer: &mut Renderer, query: &str) -> Result<(String, String), CliError> {
    let html = renderer.render_search(query).await?;
    let summary = renderer.search_summary().unwrap_or_default().to_owned();
    Ok((summary, html))
}
