//! `mdwiki index` command implementation.

use crate::context::{Wiki, WikiArgs};
use crate::error::CliError;
use crate::output::Output;

pub(crate) async fn execute(wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
    let wiki = Wiki::from_args(wiki, true, output)?;
    let html = wiki.renderer.render_index().await?;
    output.content(&html)?;
    Ok(())
}
