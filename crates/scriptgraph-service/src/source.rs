//! Where module text comes from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Reads the files local modules point at.
pub trait ScriptSource: Send + Sync {
    /// Text of `path` inside the context `context_path`, or `None` when the
    /// context is not deployed or the file does not exist.
    fn read(&self, context_path: &str, path: &str, locale: Option<&str>) -> io::Result<Option<String>>;
}

/// Serves each context from a directory on disk.
///
/// With a locale, `/js/app.js` is first looked up as `/js/app_<locale>.js`.
#[derive(Debug, Clone, Default)]
pub struct FsScriptSource {
    roots: IndexMap<String, PathBuf>,
}

impl FsScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context_path: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.insert(context_path, root);
        self
    }

    pub fn insert(&mut self, context_path: impl Into<String>, root: impl Into<PathBuf>) {
        self.roots.insert(context_path.into(), root.into());
    }

    fn read_file(path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl ScriptSource for FsScriptSource {
    fn read(&self, context_path: &str, path: &str, locale: Option<&str>) -> io::Result<Option<String>> {
        let Some(root) = self.roots.get(context_path) else {
            tracing::warn!("No root directory known for context '{}'", context_path);
            return Ok(None);
        };
        let file = root.join(path.trim_start_matches('/'));

        if let Some(locale) = locale {
            if let (Some(stem), Some(ext)) = (file.file_stem(), file.extension()) {
                let localized = file.with_file_name(format!(
                    "{}_{}.{}",
                    stem.to_string_lossy(),
                    locale,
                    ext.to_string_lossy()
                ));
                if let Some(text) = Self::read_file(&localized)? {
                    return Ok(Some(text));
                }
            }
        }

        let text = Self::read_file(&file)?;
        if text.is_none() {
            tracing::warn!("Script {} of context '{}' does not exist", path, context_path);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_localized_variant_first() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js/app.js"), "default").unwrap();
        fs::write(dir.path().join("js/app_fr.js"), "french").unwrap();

        let source = FsScriptSource::new().with_context("/app", dir.path());
        assert_eq!(source.read("/app", "/js/app.js", Some("fr")).unwrap().as_deref(), Some("french"));
        assert_eq!(source.read("/app", "/js/app.js", Some("de")).unwrap().as_deref(), Some("default"));
        assert_eq!(source.read("/app", "/js/app.js", None).unwrap().as_deref(), Some("default"));
        assert_eq!(source.read("/app", "/js/none.js", None).unwrap(), None);
        assert_eq!(source.read("/other", "/js/app.js", None).unwrap(), None);
    }
}
