//! Shared wiki setup for all commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdwiki_config::{CliSettings, Config};
use mdwiki_index::FsIndexer;
use mdwiki_renderer::{Indexer, RenderOptions, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Configuration arguments shared by all commands.
#[derive(Args, Debug, Default)]
pub(crate) struct WikiArgs {
    /// Path to configuration file (default: auto-discover mdwiki.toml).
    #[arg(short, long, global = true, env = "MDWIKI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long, global = true)]
    pub source_dir: Option<PathBuf>,

    /// URL prefix for pages in the site index (overrides config).
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// Rewrite internal links to .html targets (overrides config).
    #[arg(long, global = true)]
    pub export_links: bool,
}

impl WikiArgs {
    /// CLI settings from these arguments.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            base_path: self.base_path.clone(),
            export: self.export_links.then_some(true),
            output_dir: None,
        }
    }
}

/// Loaded configuration with the renderer built from it.
pub(crate) struct Wiki {
    pub config: Config,
    pub indexer: Arc<FsIndexer>,
    pub renderer: Renderer,
}

impl Wiki {
    /// Load configuration and index the source directory.
    ///
    /// With `require_index` unset, an unreadable source directory is
    /// reported as a warning and pages render against an empty index.
    pub(crate) fn load(
        config: Config,
        require_index: bool,
        output: &Output,
    ) -> Result<Self, CliError> {
        let source_dir = config.wiki_resolved.source_dir.clone();
        let indexer = match FsIndexer::new(&source_dir) {
            Ok(indexer) => indexer,
            Err(e) if !require_index => {
                output.warning(&format!("Warning: site index unavailable: {e}"));
                FsIndexer::empty(source_dir)
            }
            Err(e) => return Err(e.into()),
        };
        let indexer = Arc::new(indexer);

        let options = RenderOptions::new(
            config.wiki_resolved.base_path.clone(),
            config.wiki_resolved.export,
        );
        let renderer = Renderer::new(Arc::clone(&indexer) as Arc<dyn Indexer>, options);

        Ok(Self {
            config,
            indexer,
            renderer,
        })
    }

    /// Load configuration from `args` and index the source directory.
    pub(crate) fn from_args(
        args: &WikiArgs,
        require_index: bool,
        output: &Output,
    ) -> Result<Self, CliError> {
        let config = Config::load(args.config.as_deref(), Some(&args.cli_settings()))?;
        Self::load(config, require_index, output)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_settings() {
        let args = WikiArgs {
            base_path: Some("/wiki".to_owned()),
            export_links: true,
            ..Default::default()
        };
        let settings = args.cli_settings();
        assert_eq!(settings.base_path.as_deref(), Some("/wiki"));
        assert_eq!(settings.export, Some(true));
        assert_eq!(settings.source_dir, None);
    }

    #[test]
    fn test_cli_settings_export_not_forced_off() {
        assert_eq!(WikiArgs::default().cli_settings().export, None);
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/guide.md"), "# Guide").unwrap();
        let config_path = dir.path().join("mdwiki.toml");
        fs::write(
            &config_path,
            "[wiki]\nsource_dir = \"pages\"\nbase_path = \"/kb\"\n",
        )
        .unwrap();

        let args = WikiArgs {
            config: Some(config_path),
            ..Default::default()
        };
        let wiki = Wiki::from_args(&args, true, &Output::new()).unwrap();
        assert_eq!(wiki.indexer.len(), 1);
        assert_eq!(wiki.renderer.options().base_path, "/kb");
        assert!(!wiki.renderer.options().export);
        assert_eq!(wiki.config.wiki_resolved.source_dir, dir.path().join("pages"));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("mdwiki.toml");
        fs::write(&config_path, "").unwrap();
        let args = WikiArgs {
            config: Some(config_path),
            ..Default::default()
        };

        assert!(Wiki::from_args(&args, true, &Output::new()).is_err());
        let wiki = Wiki::from_args(&args, false, &Output::new()).unwrap();
        assert!(wiki.indexer.is_empty());
    }
}
