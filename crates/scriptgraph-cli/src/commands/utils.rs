//! Input discovery and registration shared by the commands.

use std::fs;
use std::path::{Path, PathBuf};

use scriptgraph_config::{DEFAULT_DESCRIPTOR, DescriptorFile, ScriptResources, ServiceSettings, find_descriptor};
use scriptgraph_service::{FsScriptSource, ScriptService};

use crate::cli::InputArgs;
use crate::error::{CliError, Result};

/// One descriptor input, located on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// The descriptor file.
    pub descriptor: PathBuf,
    /// Directory the context is served from.
    pub root: PathBuf,
    pub context_path: String,
}

/// Locate the descriptor of `path` and pick its context path.
///
/// A directory is searched for `scripts.toml` / `scripts.json`. The context
/// path defaults to `/<directory name>` for default-named descriptors and to
/// `/<file stem>` otherwise.
pub fn locate(path: &Path, context: Option<&str>) -> Result<Input> {
    let descriptor = if path.is_dir() {
        find_descriptor(path).ok_or_else(|| CliError::DescriptorNotFound(path.to_path_buf()))?
    } else if path.is_file() {
        path.to_path_buf()
    } else {
        return Err(CliError::DescriptorNotFound(path.to_path_buf()));
    };

    let root = match descriptor.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let context_path = match context {
        Some(context) => context.to_string(),
        None => format!("/{}", default_context_name(&descriptor, &root)?),
    };

    Ok(Input {
        descriptor,
        root,
        context_path,
    })
}

fn default_context_name(descriptor: &Path, root: &Path) -> Result<String> {
    let file_name = descriptor.file_name().and_then(|n| n.to_str());
    let is_default = matches!(file_name, Some(DEFAULT_DESCRIPTOR | "scripts.json"));

    let name = if is_default {
        fs::canonicalize(root)?
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
    } else {
        descriptor.file_stem().and_then(|n| n.to_str()).map(str::to_string)
    };

    name.ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "cannot derive a context path from {}, pass --context",
            descriptor.display()
        ))
    })
}

/// Locate every input of `args`. `--context` only applies to a single input.
pub fn locate_all(args: &InputArgs) -> Result<Vec<Input>> {
    if args.context.is_some() && args.inputs.len() > 1 {
        return Err(CliError::InvalidArgument(
            "--context needs exactly one input".to_string(),
        ));
    }
    args.inputs
        .iter()
        .map(|path| locate(path, args.context.as_deref()).map_err(|err| err.for_input(path)))
        .collect()
}

/// A service reading module files from each input's root.
pub fn new_service(settings: ServiceSettings, inputs: &[Input]) -> ScriptService<FsScriptSource> {
    let mut source = FsScriptSource::new();
    for input in inputs {
        source.insert(input.context_path.clone(), input.root.clone());
    }
    ScriptService::new(settings, source)
}

/// Load and register one input.
pub fn register(service: &ScriptService<FsScriptSource>, input: &Input) -> Result<ScriptResources> {
    let resources = DescriptorFile::load(&input.descriptor)?.into_resources(&input.context_path, &input.root)?;
    service.register(&resources)?;
    tracing::debug!(
        "Registered {} as '{}'",
        input.descriptor.display(),
        input.context_path
    );
    Ok(resources)
}

/// Register every input, stopping at the first failure.
pub fn load_service(args: &InputArgs, settings: ServiceSettings) -> Result<ScriptService<FsScriptSource>> {
    let inputs = locate_all(args)?;
    let service = new_service(settings, &inputs);
    for input in &inputs {
        register(&service, input).map_err(|err| err.for_input(&input.descriptor))?;
    }
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_input_uses_its_name() {
        let temp = TempDir::new().unwrap();
        let web = temp.path().join("web");
        fs::create_dir(&web).unwrap();
        fs::write(web.join("scripts.toml"), "").unwrap();

        let input = locate(&web, None).unwrap();
        assert_eq!(input.descriptor, web.join("scripts.toml"));
        assert_eq!(input.root, web);
        assert_eq!(input.context_path, "/web");
    }

    #[test]
    fn named_file_uses_its_stem() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("portal-ui.json");
        fs::write(&file, "{}").unwrap();

        let input = locate(&file, None).unwrap();
        assert_eq!(input.context_path, "/portal-ui");
        assert_eq!(locate(&file, Some("/custom")).unwrap().context_path, "/custom");
    }

    #[test]
    fn missing_descriptor() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            locate(temp.path(), None),
            Err(CliError::DescriptorNotFound(_))
        ));
        assert!(matches!(
            locate(&temp.path().join("nope.toml"), None),
            Err(CliError::DescriptorNotFound(_))
        ));
    }

    #[test]
    fn context_override_needs_single_input() {
        let args = InputArgs {
            inputs: vec![PathBuf::from("a"), PathBuf::from("b")],
            context: Some("/x".into()),
        };
        assert!(matches!(locate_all(&args), Err(CliError::InvalidArgument(_))));
    }
}
