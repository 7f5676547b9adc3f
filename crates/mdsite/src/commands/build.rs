//! `mdsite build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdsite_build::{BuildContext, BuildPaths, SiteBuilder};
use mdsite_config::{CliSettings, Config};
use mdsite_renderer::CmarkEngine;
use mdsite_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// URL prefix replacing the leading `/` of root-relative links (default: /docs).
    base_path: Option<String>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// HTML template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Static assets directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory, deleted and recreated on every build (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Render pages in parallel.
    #[arg(long)]
    parallel: bool,

    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            template: self.template,
            static_dir: self.static_dir,
            output_dir: self.output_dir,
            base_path: self.base_path,
            parallel: self.parallel.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");
        let settings = config.build_resolved;

        output.field("Content", settings.content_dir.display());
        output.field("Template", settings.template.display());
        output.field("Output", settings.output_dir.display());
        if !settings.static_dir.exists() {
            output.warning(&format!(
                "no static directory at {}, skipping assets",
                settings.static_dir.display()
            ));
        }

        let ctx = BuildContext::new(
            Arc::new(FsStorage::new()),
            Arc::new(CmarkEngine::new()),
            settings.base_path,
            settings.output_dir.clone(),
        );
        let paths = BuildPaths {
            content_dir: settings.content_dir,
            template: settings.template,
            static_dir: settings.static_dir,
        };

        let report = SiteBuilder::new(ctx, paths)
            .with_parallel(settings.parallel)
            .build()?;

        output.build_summary(&report, &settings.output_dir);
        Ok(())
    }
}
