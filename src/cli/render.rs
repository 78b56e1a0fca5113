//! Render command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::element::{Displayed, IconElement, RenderWarning};
use crate::host::Host;
use crate::registry::IconRegistry;

use super::{load_icons, load_project, EXIT_SUCCESS};

/// Execute the render command
#[allow(clippy::too_many_arguments)]
pub fn run_render(
    icon: &str,
    files: &[PathBuf],
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    animation: Option<&str>,
    layers: Option<&str>,
    reduced_motion: bool,
) -> ExitCode {
    let project = match load_project(config_path, overrides) {
        Ok(project) => project,
        Err(code) => return code,
    };
    let icons = match load_icons(files, &project) {
        Ok(icons) => icons,
        Err(code) => return code,
    };

    let host = Host::with_reduced_motion(reduced_motion);
    let registry = IconRegistry::new(host.document());
    registry.load_config(&icons);

    let element =
        IconElement::with_defaults(&registry, &host, project.config.defaults.render_defaults());
    element.set_attribute("icon", icon);
    if let Some(animation) = animation {
        element.set_attribute("animation", animation);
    }
    if let Some(layers) = layers {
        element.set_attribute("layers", layers);
    }
    element.connected();

    if let Displayed::Placeholder(name) = element.displayed() {
        eprintln!("Warning: {}", RenderWarning::icon_not_found(&name).message);
    }

    println!("{}", element.to_markup());
    ExitCode::from(EXIT_SUCCESS)
}
