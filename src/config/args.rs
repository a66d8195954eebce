use crate::config::toml_config::TomlConfig;
use crate::config::{delay_from_seconds, validate_provider};
use crate::core::catalog::ZoneCatalog;
use crate::core::generator::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_MARGIN};
use crate::core::snapshot::SnapshotFormat;
use crate::core::transition::DEFAULT_TRANSITION_DELAY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "floor-plan")]
#[command(about = "Places employees on the office floor plan and renders the layout")]
pub struct CliConfig {
    /// Position list shown first (.json or .csv)
    #[arg(long, default_value = "data/initialPositions.json")]
    pub initial: String,

    /// Position list shown after the transition delay (.json or .csv)
    #[arg(long, default_value = "data/updatedPositions.json")]
    pub updated: String,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long)]
    pub canvas_width: Option<f64>,

    #[arg(long)]
    pub canvas_height: Option<f64>,

    #[arg(long)]
    pub margin: Option<f64>,

    /// Seconds before the updated positions replace the initial ones
    #[arg(long)]
    pub delay: Option<f64>,

    /// Seed for reproducible layouts
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        let canvas = config.canvas.get_or_insert_with(Default::default);
        if let Some(width) = self.canvas_width {
            canvas.width = Some(width);
        }
        if let Some(height) = self.canvas_height {
            canvas.height = Some(height);
        }
        if let Some(margin) = self.margin {
            canvas.margin = Some(margin);
        }
        if let Some(delay) = self.delay {
            config
                .transition
                .get_or_insert_with(Default::default)
                .delay_seconds = Some(delay);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn canvas_width(&self) -> f64 {
        self.canvas_width.unwrap_or(DEFAULT_CANVAS_WIDTH)
    }

    fn canvas_height(&self) -> f64 {
        self.canvas_height.unwrap_or(DEFAULT_CANVAS_HEIGHT)
    }

    fn margin(&self) -> f64 {
        self.margin.unwrap_or(DEFAULT_MARGIN)
    }

    fn transition_delay(&self) -> Duration {
        delay_from_seconds(self.delay)
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl CliConfig {
    /// Checks the file and directory flags only. Canvas and delay flags are
    /// judged after they are merged with the configuration file.
    pub fn validate_paths(&self) -> Result<()> {
        validate_file_extensions(
            "snapshots",
            &[self.initial.clone(), self.updated.clone()],
            &SnapshotFormat::EXTENSIONS,
        )?;
        validate_path("output_path", &self.output_path)?;
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(
            self,
            self.delay.unwrap_or(DEFAULT_TRANSITION_DELAY.as_secs_f64()),
        )?;
        self.validate_paths()
    }
}

/// Merges the optional TOML file with the command-line flags (flags win) and
/// validates the result. Without `--config` the flags apply to the built-in
/// defaults. The catalog is `None` when the standard zones should be used.
pub fn resolve(cli: &CliConfig) -> Result<(TomlConfig, Option<ZoneCatalog>)> {
    cli.validate_paths()?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let catalog = config.zone_catalog()?;
    Ok((config, catalog))
}
