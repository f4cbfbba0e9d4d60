//! Tests for native AMD fileset scanning.

use std::fs;

use scriptgraph::{FetchMode, ModuleContent, ModuleSource, ResourceId};
use scriptgraph_config::{AmdFileset, ConfigError, DescriptorFile};
use serde_json::json;
use tempfile::TempDir;

fn context_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    let amd = dir.path().join("js/amd");
    fs::create_dir_all(amd.join("widgets")).unwrap();
    fs::create_dir_all(amd.join("test")).unwrap();
    fs::write(amd.join("main.js"), "define([], function() {});").unwrap();
    fs::write(amd.join("widgets/date-picker.js"), "define([], function() {});").unwrap();
    fs::write(amd.join("widgets/readme.txt"), "not a script").unwrap();
    fs::write(amd.join("test/spec.js"), "define([], function() {});").unwrap();
    dir
}

#[test]
fn fileset_scan_yields_native_amd_modules() {
    let root = context_root();
    let fileset = AmdFileset {
        directory: "/js/amd/".into(),
        includes: vec![],
        excludes: vec!["test/**".into()],
    };

    let descriptors = fileset.scan(root.path()).unwrap();
    let ids: Vec<_> = descriptors.iter().map(|d| d.id.clone()).collect();
    assert_eq!(
        ids,
        vec![ResourceId::shared("main"), ResourceId::shared("widgets/date-picker")]
    );

    let picker = &descriptors[1];
    assert_eq!(picker.fetch_mode, FetchMode::OnLoad);
    assert!(picker.native_amd);
    assert_eq!(picker.alias.as_deref(), Some("widgetsDatePicker"));
    assert_eq!(
        picker.modules[0].source,
        ModuleSource::Local {
            contents: vec![ModuleContent::Path("/js/amd/widgets/date-picker.js".into())],
            resource_bundle: None,
        }
    );
    assert_eq!(picker.modules[0].priority, i32::MAX);
}

#[test]
fn includes_restrict_the_scan() {
    let root = context_root();
    let fileset = AmdFileset {
        directory: "/js/amd".into(),
        includes: vec!["widgets/*.js".into()],
        excludes: vec![],
    };
    let descriptors = fileset.scan(root.path()).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].id, ResourceId::shared("widgets/date-picker"));
}

#[test]
fn descriptor_file_appends_amd_modules_last() {
    let root = context_root();
    let file = DescriptorFile::from_value(json!({
        "scripts": [ { "name": "base" } ],
        "amd": { "fileset": [ { "directory": "/js/amd", "excludes": ["test/**"] } ] }
    }))
    .unwrap();

    let resources = file.into_resources("/app", root.path()).unwrap();
    assert_eq!(resources.descriptors.len(), 3);
    assert_eq!(resources.descriptors[0].id, ResourceId::shared("base"));
}

#[test]
fn missing_fileset_directory_is_reported() {
    let root = TempDir::new().unwrap();
    let fileset = AmdFileset {
        directory: "/nope".into(),
        ..AmdFileset::default()
    };
    assert!(matches!(fileset.scan(root.path()), Err(ConfigError::NotFound(_))));
}
