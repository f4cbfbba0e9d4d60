//! Configuration for scriptgraph: descriptor files that declare script
//! resources, native AMD fileset scanning, and service settings.

pub mod amd;
pub mod descriptor_file;
pub mod error;
pub mod resources;
pub mod settings;

pub use amd::{AmdFileset, to_module_alias};
pub use descriptor_file::{
    AdapterPart, AmdSection, DEFAULT_DESCRIPTOR, DependsEntry, DescriptorFile, ResourceEntry, ScopedEntry,
    ScriptEntry, StaticEntry, find_descriptor,
};
pub use error::{ConfigError, Result};
pub use resources::{ScriptResources, StaticScriptResource};
pub use settings::{SETTINGS_FILE, ServiceSettings};
