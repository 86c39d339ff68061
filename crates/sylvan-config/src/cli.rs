//! Command-line argument parsing for Sylvan.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Sylvan configuration overrides.
///
/// CLI values override settings loaded from `config.ron`. Binaries flatten
/// this into their own argument struct.
#[derive(Args, Debug, Default)]
pub struct CliArgs {
    /// Draw billboards instead of trunk and crown geometry.
    #[arg(long)]
    pub billboards: Option<bool>,

    /// Forest density for every backend, in trees per square meter.
    #[arg(long)]
    pub trees_per_square_meter: Option<f64>,

    /// Preferred distance between trees along a tree row, in meters.
    #[arg(long)]
    pub tree_row_spacing: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(billboards) = args.billboards {
            self.trees.use_billboards = billboards;
        }
        if let Some(density) = args.trees_per_square_meter {
            self.trees.trees_per_square_meter = Some(density);
        }
        if let Some(spacing) = args.tree_row_spacing {
            self.trees.tree_row_spacing = spacing;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
