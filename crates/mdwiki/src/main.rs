//! mdwiki CLI - Markdown wiki renderer.
//!
//! Provides commands for:
//! - `render`, `code`, `raw`: render a single file
//! - `toc`: print the table of contents of a page
//! - `index`: print the site index
//! - `search`: render a search result page
//! - `export`: write the whole wiki as static HTML

mod commands;
mod context;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, FileArgs, SearchArgs, TocArgs};
use context::WikiArgs;
use error::CliError;
use output::Output;

/// mdwiki - Markdown wiki renderer.
#[derive(Parser)]
#[command(name = "mdwiki", version, about)]
struct Cli {
    #[command(flatten)]
    wiki: WikiArgs,

    /// Enable verbose output (directive expansion, scan statistics).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown page with its table of contents.
    Render(FileArgs),
    /// Render a source file as a highlighted code block.
    Code(FileArgs),
    /// Print a file without rendering it.
    Raw(FileArgs),
    /// Render the table of contents of a Markdown page.
    Toc(TocArgs),
    /// Render the index of all pages.
    Index,
    /// Render the search result page for a query.
    Search(SearchArgs),
    /// Export the wiki as a static HTML site.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Commands::Render(args) => args.render(&cli.wiki, output).await,
            Commands::Code(args) => args.code(&cli.wiki, output).await,
            Commands::Raw(args) => args.raw(&cli.wiki, output).await,
            Commands::Toc(args) => args.execute(&cli.wiki, output).await,
            Commands::Index => commands::index::execute(&cli.wiki, output).await,
            Commands::Search(args) => args.execute(&cli.wiki, output).await,
            Commands::Export(args) => args.execute(&cli.wiki, output).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_args_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mdwiki",
            "search",
            "install guide",
            "--json",
            "--base-path",
            "/wiki",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.wiki.base_path.as_deref(), Some("/wiki"));
        assert!(matches!(cli.command, Commands::Search(_)));
    }

    #[test]
    fn test_parse_toc_skip_first() {
        let cli = Cli::try_parse_from(["mdwiki", "toc", "page.md", "--skip-first"]).unwrap();
        assert!(matches!(cli.command, Commands::Toc(_)));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["mdwiki"]).is_err());
    }
}
