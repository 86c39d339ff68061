//! Demo binary that places and renders the trees of a small sample map.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p sylvan-demo` to print a POV-Ray scene to stdout.
//! Run with `cargo run -p sylvan-demo -- --backend both --output trees.pov`
//! to also draw the immediate geometry and write the scene to a file.

mod sample;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sylvan_config::{CliArgs, Config, ConfigError, default_config_dir};
use sylvan_trees::{PovWriter, PrimitiveRecorder, SceneRenderer, TreeModule};
use thiserror::Error;
use tracing::{error, info};

/// Which backends to render through.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BackendArg {
    Immediate,
    Scene,
    Both,
}

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "sylvan-demo", about = "Procedural tree placement demo")]
struct DemoArgs {
    #[command(flatten)]
    sylvan: CliArgs,

    /// Backend(s) to render through.
    #[arg(long, value_enum, default_value_t = BackendArg::Scene)]
    backend: BackendArg,

    /// Write the scene here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write scene to {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: io::Error,
    },
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let config_dir = match args.sylvan.config.clone() {
        Some(dir) => Some(dir),
        None => default_config_dir().ok(),
    };

    // Load or create config, then apply CLI overrides
    let mut config = config_dir
        .as_deref()
        .map(Config::load_or_create)
        .transpose()
        .unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            None
        })
        .unwrap_or_default();
    config.apply_cli_overrides(&args.sylvan);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    sylvan_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &DemoArgs, config: &Config) -> Result<(), DemoError> {
    config.trees.validate()?;

    let map = sample::sample_map();
    let module = TreeModule::new(config.trees.clone());
    let objects = module.apply_to(&map);
    info!(
        "Map: {} nodes, {} way segments, {} areas, {} tree features",
        map.nodes.len(),
        map.way_segments.len(),
        map.areas.len(),
        objects.len()
    );

    if matches!(args.backend, BackendArg::Immediate | BackendArg::Both) {
        let mut renderer = module.immediate_renderer(PrimitiveRecorder::default());
        let stats = module.render(&objects, &map.boundary, &sample::hill_elevation, &mut renderer);
        let recorder = renderer.into_target();
        info!(
            "Immediate: {} trees, {} columns, {} billboards",
            stats.trees,
            recorder.columns().count(),
            recorder.billboards().count()
        );
    }

    if matches!(args.backend, BackendArg::Scene | BackendArg::Both) {
        let mut renderer = SceneRenderer::new(PovWriter::new());
        let stats = module.render(&objects, &map.boundary, &sample::hill_elevation, &mut renderer);
        let scene = renderer.into_target();
        info!("Scene: {} trees in {} features", stats.trees, stats.features);

        match &args.output {
            Some(path) => std::fs::write(path, scene.as_str()).map_err(|source| DemoError::Output {
                path: path.display().to_string(),
                source,
            })?,
            None => {
                let mut stdout = io::stdout().lock();
                scene
                    .write_to(&mut stdout)
                    .and_then(|()| stdout.flush())
                    .map_err(|source| DemoError::Output {
                        path: "<stdout>".to_string(),
                        source,
                    })?;
            }
        }
    }

    info!("Placements computed: {}", module.cache().computations());
    Ok(())
}
