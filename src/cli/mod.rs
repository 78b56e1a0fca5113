//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod sprite;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{self, CliOverrides, PathiconConfig};
use crate::icons::{expand_sources, load_icon_files};
use crate::models::IconConfig;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path has an icon file extension (.json or .json5).
pub fn is_icon_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json") | Some("json5"))
}

/// picon - Validate, list and render stroke-path icon sets
#[derive(Parser)]
#[command(name = "picon")]
#[command(about = "picon - Validate, list and render stroke-path icon sets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate icon configuration files
    Validate {
        /// Icon files (.json or .json5)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the hidden symbol sheet for a set of icons
    Sprite {
        /// Icon files; defaults to `[icons].sources` from pathicon.toml
        files: Vec<PathBuf>,

        /// Path to pathicon.toml (discovered when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the markup to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when any icon file is invalid
        #[arg(long)]
        strict: bool,

        /// Glob patterns replacing `[icons].sources` (repeatable)
        #[arg(long = "sources", value_name = "GLOB")]
        sources: Vec<String>,
    },

    /// Render one icon element and print its markup
    Render {
        /// Icon name
        icon: String,

        /// Icon files; defaults to `[icons].sources` from pathicon.toml
        files: Vec<PathBuf>,

        /// Path to pathicon.toml (discovered when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Icon size (CSS length)
        #[arg(long)]
        size: Option<String>,

        /// Stroke color (CSS color)
        #[arg(long)]
        color: Option<String>,

        /// Draw-in duration (CSS time)
        #[arg(long)]
        duration: Option<String>,

        /// Animation trigger: "hover"
        #[arg(long)]
        animation: Option<String>,

        /// Per-layer timing, e.g. "outline:1s:0s,detail:0.5s:0.2s"
        #[arg(long)]
        layers: Option<String>,

        /// Render as if the user prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,

        /// Glob patterns replacing `[icons].sources` (repeatable)
        #[arg(long = "sources", value_name = "GLOB")]
        sources: Vec<String>,
    },

    /// List icon names
    List {
        /// Icon files; defaults to `[icons].sources` from pathicon.toml
        files: Vec<PathBuf>,

        /// Path to pathicon.toml (discovered when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Glob patterns replacing `[icons].sources` (repeatable)
        #[arg(long = "sources", value_name = "GLOB")]
        sources: Vec<String>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { files, strict, json } => {
            validate::run_validate(&files, strict, json)
        }
        Commands::Sprite { files, config, output, strict, sources } => {
            let overrides = CliOverrides {
                strict: strict.then_some(true),
                sources: source_override(sources),
                ..Default::default()
            };
            sprite::run_sprite(&files, config.as_deref(), output.as_deref(), &overrides)
        }
        Commands::Render {
            icon,
            files,
            config,
            size,
            color,
            duration,
            animation,
            layers,
            reduced_motion,
            sources,
        } => {
            let overrides = CliOverrides {
                size,
                color,
                duration,
                sources: source_override(sources),
                ..Default::default()
            };
            render::run_render(
                &icon,
                &files,
                config.as_deref(),
                &overrides,
                animation.as_deref(),
                layers.as_deref(),
                reduced_motion,
            )
        }
        Commands::List { files, config, sources } => {
            let overrides = CliOverrides { sources: source_override(sources), ..Default::default() };
            sprite::run_list(&files, config.as_deref(), &overrides)
        }
    }
}

/// `--sources` replaces the configured patterns only when given.
fn source_override(sources: Vec<String>) -> Option<Vec<String>> {
    (!sources.is_empty()).then_some(sources)
}

/// Configuration plus the directory its relative paths resolve against.
pub(crate) struct Project {
    pub config: PathiconConfig,
    pub root: PathBuf,
}

/// Load pathicon.toml (explicit or discovered) and apply CLI overrides.
pub(crate) fn load_project(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Project, ExitCode> {
    let found = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => config::find_config(),
    };

    let mut project = match &found {
        Some(path) => match config::load_config(Some(path)) {
            Ok(config) => Project {
                config,
                root: config::project_root(path).map(Path::to_path_buf).unwrap_or_default(),
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(ExitCode::from(EXIT_INVALID_ARGS));
            }
        },
        None => Project {
            config: config::default_config(),
            root: std::env::current_dir().unwrap_or_default(),
        },
    };

    config::merge_cli_overrides(&mut project.config, overrides);
    Ok(project)
}

/// Load every icon file named on the command line, or the configured sources.
///
/// Invalid files are reported and skipped, or fail the command in strict
/// mode. Earlier files win on duplicate names.
pub(crate) fn load_icons(files: &[PathBuf], project: &Project) -> Result<IconConfig, ExitCode> {
    let paths = if files.is_empty() {
        let sources: Vec<PathBuf> = expand_sources(&project.root, &project.config.icons.sources)
            .into_iter()
            .filter(|p| is_icon_file(p))
            .collect();
        if sources.is_empty() {
            eprintln!("Error: No icon files found (pass files or set [icons].sources)");
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        sources
    } else {
        files.to_vec()
    };

    let mut merged = IconConfig::default();
    let mut failed = false;
    for (path, result) in load_icon_files(&paths) {
        match result {
            Ok(config) => merged.merge(config),
            Err(e) => {
                failed = true;
                if project.config.validate.strict {
                    eprintln!("Error: {}: {}", path.display(), e);
                } else {
                    eprintln!("Warning: skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    if failed && project.config.validate.strict {
        return Err(ExitCode::from(EXIT_ERROR));
    }
    Ok(merged)
}
