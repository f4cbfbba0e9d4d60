//! Tests for service settings loading.

use std::fs;

use scriptgraph_config::{ConfigError, ServiceSettings};
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn defaults() {
    let settings = ServiceSettings::default();
    assert_eq!(settings.portal_context, "/portal");
    assert_eq!(settings.handler, "scripts");
    assert!(!settings.development);
    assert!(settings.log_level.is_none());
}

#[test]
#[serial]
fn file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scriptgraph.toml");
    fs::write(&path, "portal_context = \"/site\"\nversion = \"5.0\"\ndevelopment = true\n").unwrap();

    let settings = ServiceSettings::load(Some(&path)).unwrap();
    assert_eq!(settings.portal_context, "/site");
    assert_eq!(settings.version, "5.0");
    assert!(settings.development);
    assert_eq!(settings.handler, "scripts");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scriptgraph.toml");
    fs::write(&path, "handler = \"js\"\n").unwrap();

    unsafe {
        std::env::set_var("SCRIPTGRAPH_HANDLER", "bundles");
    }
    let settings = ServiceSettings::load(Some(&path));
    unsafe {
        std::env::remove_var("SCRIPTGRAPH_HANDLER");
    }
    assert_eq!(settings.unwrap().handler, "bundles");
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let err = ServiceSettings::load(Some(std::path::Path::new("/no/such/scriptgraph.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
#[serial]
fn relative_portal_context_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scriptgraph.toml");
    fs::write(&path, "portal_context = \"portal\"\n").unwrap();
    assert!(matches!(
        ServiceSettings::load(Some(&path)),
        Err(ConfigError::InvalidPath { .. })
    ));
}
