//! `mdwiki export` command implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;
use ignore::WalkBuilder;
use mdwiki_config::Config;
use mdwiki_renderer::Indexer;

use crate::context::{Wiki, WikiArgs};
use crate::error::CliError;
use crate::output::Output;

/// File name of the generated site index.
const INDEX_PAGE: &str = "index.html";

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Number of files written by an export.
#[derive(Debug, Default, PartialEq, Eq)]
struct ExportStats {
    pages: usize,
    assets: usize,
}

impl ExportArgs {
    pub(crate) async fn execute(self, wiki: &WikiArgs, output: &Output) -> Result<(), CliError> {
        let mut cli_settings = wiki.cli_settings();
        cli_settings.export = Some(true);
        cli_settings.output_dir = self.output_dir;
        let config = Config::load(wiki.config.as_deref(), Some(&cli_settings))?;
        let wiki = Wiki::load(config, true, output)?;

        output.info(&format!(
            "Source: {}",
            wiki.config.wiki_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            wiki.config.export_resolved.output_dir.display()
        ));

        let stats = export_site(&wiki).await?;

        output.success(&format!(
            "Exported {} pages and {} other files to {}",
            stats.pages,
            stats.assets,
            wiki.config.export_resolved.output_dir.display()
        ));
        Ok(())
    }
}

/// Render every page to HTML and copy the remaining files.
///
/// A site index is written as `index.html` unless the wiki has its own
/// `index.md`.
async fn export_site(wiki: &Wiki) -> Result<ExportStats, CliError> {
    let source_dir = &wiki.config.wiki_resolved.source_dir;
    let output_dir = &wiki.config.export_resolved.output_dir;
    let mut stats = ExportStats::default();

    let references = wiki.indexer.get_files()?;
    let mut pages = HashSet::with_capacity(references.len());
    for reference in &references {
        let source = source_dir.join(reference);
        let html = wiki.renderer.render_file(&source).await?;
        write_file(&output_dir.join(page_path(reference)), html.as_bytes()).await?;
        tracing::info!(page = %reference, "Exported page");
        pages.insert(source);
        stats.pages += 1;
    }

    if !references.iter().any(|r| page_path(r) == Path::new(INDEX_PAGE)) {
        let html = wiki.renderer.render_index().await?;
        write_file(&output_dir.join(INDEX_PAGE), html.as_bytes()).await?;
    }

    let exclude = output_dir.clone();
    let walker = WalkBuilder::new(source_dir)
        .hidden(true)
        .require_git(false)
        .filter_entry(move |entry| !entry.path().starts_with(&exclude))
        .build();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) || pages.contains(path) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(source_dir) else {
            continue;
        };
        let target = output_dir.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(path, &target).await?;
        stats.assets += 1;
    }

    Ok(stats)
}

/// Output path of a page, relative to the output directory.
fn page_path(reference: &str) -> PathBuf {
    Path::new(reference).with_extension("html")
}

async fn write_file(path: &Path, content: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mdwiki_config::CliSettings;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_wiki(root: &Path) -> Wiki {
        let config_path = root.join("mdwiki.toml");
        fs::write(&config_path, "[wiki]\nsource_dir = \"docs\"\n").unwrap();
        let settings = CliSettings {
            export: Some(true),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();
        Wiki::load(config, true, &Output::new()).unwrap()
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("guide.md"), PathBuf::from("guide.html"));
        assert_eq!(page_path("a/b/c.markdown"), PathBuf::from("a/b/c.html"));
    }

    #[tokio::test]
    async fn test_export_site() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("guide/img")).unwrap();
        fs::write(
            docs.join("home.md"),
            "# Home\n\nSee [setup](guide/setup.md) and [about](about.md).\n",
        )
        .unwrap();
        fs::write(docs.join("guide/setup.md"), "# Setup\n").unwrap();
        fs::write(docs.join("guide/img/shot.png"), b"\x89PNG").unwrap();

        let wiki = load_wiki(dir.path());
        let stats = export_site(&wiki).await.unwrap();
        assert_eq!(stats, ExportStats { pages: 2, assets: 1 });

        let site = dir.path().join("site");
        let home = fs::read_to_string(site.join("home.html")).unwrap();
        assert!(home.contains(r#"<a href="about.html">about</a>"#));
        assert!(home.contains(r#"<a href="guide/setup.md">setup</a>"#));
        assert!(site.join("guide/setup.html").is_file());
        assert_eq!(
            fs::read(site.join("guide/img/shot.png")).unwrap(),
            b"\x89PNG"
        );

        let index = fs::read_to_string(site.join(INDEX_PAGE)).unwrap();
        assert!(index.contains(r#"<a href="/home.html">Home</a>"#));
    }

    #[tokio::test]
    async fn test_export_keeps_own_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.md"), "Welcome\n").unwrap();

        let wiki = load_wiki(dir.path());
        export_site(&wiki).await.unwrap();

        let index = fs::read_to_string(dir.path().join("site").join(INDEX_PAGE)).unwrap();
        assert_eq!(index, "<p>Welcome</p>");
    }

    #[tokio::test]
    async fn test_export_skips_output_inside_source() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("site")).unwrap();
        fs::write(docs.join("page.md"), "Text\n").unwrap();
        fs::write(docs.join("site/stale.css"), "body {}").unwrap();

        let config_path = dir.path().join("mdwiki.toml");
        fs::write(
            &config_path,
            "[wiki]\nsource_dir = \"docs\"\n[export]\noutput_dir = \"docs/site\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();
        let wiki = Wiki::load(config, true, &Output::new()).unwrap();

        let stats = export_site(&wiki).await.unwrap();
        assert_eq!(stats.assets, 0);
    }
}
