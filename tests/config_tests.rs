//! Integration tests for project configuration and icon file loading

use std::fs;
use std::path::Path;

use pathicon::config::{
    find_config_from, load_config, merge_cli_overrides, project_root, CliOverrides, ConfigError,
};
use pathicon::dom::Document;
use pathicon::element::IconElement;
use pathicon::host::Host;
use pathicon::icons::{expand_sources, load_icon_file, load_icon_files, IconFileError};
use pathicon::models::IconConfig;
use pathicon::registry::IconRegistry;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("should create parent dirs");
    }
    fs::write(path, content).expect("should write file");
}

fn project() -> TempDir {
    let temp = TempDir::new().expect("should create temp dir");
    write(
        temp.path(),
        "pathicon.toml",
        r#"
[defaults]
size = "20px"
stagger = "80ms"

[icons]
sources = ["icons/**/*.json", "icons/**/*.json5"]
"#,
    );
    write(temp.path(), "icons/base.json", r#"{"icons": {"check": {"paths": ["M20 6 9 17l-5-5"]}}}"#);
    write(
        temp.path(),
        "icons/extra/nav.json5",
        "{ icons: { check: { paths: ['M0 0'] }, menu: { paths: ['M4 6h16', 'M4 12h16', 'M4 18h16'] } } }",
    );
    temp
}

#[test]
fn test_project_discovery_and_source_expansion() {
    let temp = project();
    let nested = temp.path().join("icons").join("extra");

    let config_path = find_config_from(nested).expect("should find pathicon.toml");
    let config = load_config(Some(&config_path)).expect("should load config");
    let root = project_root(&config_path).expect("should have parent");

    let files = expand_sources(root, &config.icons.sources);
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("icons/base.json"));
    assert!(files[1].ends_with("icons/extra/nav.json5"));
}

#[test]
fn test_loaded_sources_register_first_file_wins() {
    let temp = project();
    let config_path = temp.path().join("pathicon.toml");
    let config = load_config(Some(&config_path)).expect("should load config");
    let files = expand_sources(temp.path(), &config.icons.sources);

    let mut merged = IconConfig::default();
    for (_, result) in load_icon_files(&files) {
        merged.merge(result.expect("should load icon file"));
    }

    let registry = IconRegistry::new(&Document::new());
    registry.load_config(&merged);
    assert_eq!(registry.names(), vec!["check", "menu"]);
    assert_eq!(
        registry.get("check").map(|d| d.paths),
        Some(vec!["M20 6 9 17l-5-5".to_string()])
    );
    assert_eq!(registry.get("menu").map(|d| d.paths.len()), Some(3));
}

#[test]
fn test_config_defaults_seed_elements() {
    let temp = project();
    let mut config =
        load_config(Some(&temp.path().join("pathicon.toml"))).expect("should load config");
    merge_cli_overrides(
        &mut config,
        &CliOverrides { color: Some("navy".to_string()), ..Default::default() },
    );

    let host = Host::new();
    let registry = IconRegistry::new(host.document());
    let element = IconElement::with_defaults(&registry, &host, config.defaults.render_defaults());
    element.connected();

    assert_eq!(element.style_variable("--pathicon-size").as_deref(), Some("20px"));
    assert_eq!(element.style_variable("--pathicon-stagger").as_deref(), Some("80ms"));
    assert_eq!(element.style_variable("--pathicon-color").as_deref(), Some("navy"));
}

#[test]
fn test_invalid_config_reports_fields() {
    let temp = TempDir::new().expect("should create temp dir");
    write(temp.path(), "pathicon.toml", "[defaults]\ncolor = \"\"\n[icons]\nsources = []\n");

    match load_config(Some(&temp.path().join("pathicon.toml"))) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].contains("defaults.color"));
            assert!(errors[1].contains("icons.sources"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_invalid_icon_file_lists_issues() {
    let temp = TempDir::new().expect("should create temp dir");
    write(
        temp.path(),
        "bad.json",
        r#"{"icons": {"ok": {"paths": ["M1 1"], "layers": [{"duration": -5, "opacity": 2}]}}}"#,
    );

    match load_icon_file(&temp.path().join("bad.json")) {
        Err(IconFileError::Invalid(issues)) => {
            assert_eq!(issues.len(), 2);
            assert!(issues.iter().all(|i| i.path.starts_with("icons.ok.layers[0]")));
        }
        other => panic!("expected invalid icon file, got {other:?}"),
    }
}
