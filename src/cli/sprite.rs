//! Sprite sheet and list command implementations

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::dom::Document;
use crate::registry::IconRegistry;

use super::{load_icons, load_project, EXIT_ERROR, EXIT_SUCCESS};

fn load_registry(
    files: &[PathBuf],
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<IconRegistry, ExitCode> {
    let project = load_project(config_path, overrides)?;
    let icons = load_icons(files, &project)?;
    let registry = IconRegistry::new(&Document::new());
    registry.load_config(&icons);
    Ok(registry)
}

/// Execute the sprite command
pub fn run_sprite(
    files: &[PathBuf],
    config_path: Option<&Path>,
    output: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let registry = match load_registry(files, config_path, overrides) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    if registry.is_empty() {
        eprintln!("Error: No icons loaded");
        return ExitCode::from(EXIT_ERROR);
    }

    let markup = registry.sprite_markup();
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", markup)) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            println!("Saved: {} ({} icons)", path.display(), registry.len());
        }
        None => println!("{}", markup),
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the list command
pub fn run_list(files: &[PathBuf], config_path: Option<&Path>, overrides: &CliOverrides) -> ExitCode {
    let registry = match load_registry(files, config_path, overrides) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    for name in registry.names() {
        println!("{}", name);
    }

    ExitCode::from(EXIT_SUCCESS)
}
