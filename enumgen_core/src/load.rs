//! Loading the module whose declarations are scanned.
//!
//! Files are kept as source text. Syntax trees are not `Send`, so every
//! pipeline stage parses the text it is handed on its own thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LoadError;

/// One source file of the scanned module.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Where the text was read from.
    pub path: PathBuf,
    /// The full source text.
    pub text: Arc<str>,
}

impl SourceFile {
    /// Wraps already-read source text. `path` is only used for reporting.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Parses the file.
    pub fn syntax(&self) -> Result<syn::File, LoadError> {
        syn::parse_file(&self.text).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// The files of one module directory.
#[derive(Debug, Clone)]
pub struct Package {
    /// Directory name, used to label the generated file.
    pub name: String,
    /// Files sorted by path.
    pub files: Vec<SourceFile>,
}

impl Package {
    /// A package assembled from in-memory files.
    pub fn new(name: impl Into<String>, files: Vec<SourceFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// Reads every `*.rs` file directly inside `dir` and checks that each one
    /// parses.
    ///
    /// `exclude` names a file to skip, normally the previous output of the
    /// generator itself. A relative `exclude` is resolved against `dir`; only
    /// the file at that exact location is skipped.
    pub fn load(dir: &Path, exclude: Option<&Path>) -> Result<Self, LoadError> {
        let exclude = exclude.map(|ex| resolve(&dir.join(ex)));
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| LoadError::Dir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }
            if exclude.as_deref().is_some_and(|ex| resolve(path) == ex) {
                debug!("skipping previous output {}", path.display());
                continue;
            }
            paths.push(path.to_path_buf());
        }
        paths.sort();

        if paths.is_empty() {
            return Err(LoadError::Empty {
                path: dir.to_path_buf(),
            });
        }

        let files = paths
            .into_par_iter()
            .map(|path| {
                let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
                let file = SourceFile::new(path, text);
                file.syntax()?;
                Ok(file)
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let name = package_name(dir);
        info!("loaded package {} ({} files)", name, files.len());
        Ok(Self { name, files })
    }
}

/// `path` canonicalized when it exists, as given otherwise.
fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn package_name(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "crate".to_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn loads_sorted_rust_files_only() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("b.rs"), "struct B;").unwrap();
        fs::write(tmp.path().join("a.rs"), "struct A;").unwrap();
        fs::write(tmp.path().join("notes.txt"), "not rust").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/c.rs"), "struct C;").unwrap();

        let package = Package::load(tmp.path(), None).unwrap();
        let names: Vec<_> = package
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.rs", "b.rs"]);
        assert_eq!(&*package.files[0].text, "struct A;");
        assert_eq!(
            package.name,
            fs::canonicalize(tmp.path()).unwrap().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn skips_excluded_output() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("lib.rs"), "struct A;").unwrap();
        fs::write(tmp.path().join("enum_gen.rs"), "this is { not rust").unwrap();

        let package = Package::load(tmp.path(), Some(Path::new("enum_gen.rs"))).unwrap();
        assert_eq!(package.files.len(), 1);
    }

    #[test]
    fn same_name_elsewhere_is_not_excluded() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("lib.rs"), "struct A;").unwrap();
        fs::create_dir(tmp.path().join("gen")).unwrap();

        let package = Package::load(tmp.path(), Some(Path::new("gen/lib.rs"))).unwrap();
        assert_eq!(package.files.len(), 1);

        let elsewhere = tempdir().unwrap();
        let package = Package::load(tmp.path(), Some(&elsewhere.path().join("lib.rs"))).unwrap();
        assert_eq!(package.files.len(), 1);
    }

    #[test]
    fn absolute_exclude_inside_dir_is_skipped() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("lib.rs"), "struct A;").unwrap();
        fs::write(tmp.path().join("enum_gen.rs"), "this is { not rust").unwrap();

        let out = fs::canonicalize(tmp.path()).unwrap().join("enum_gen.rs");
        let package = Package::load(tmp.path(), Some(&out)).unwrap();
        assert_eq!(package.files.len(), 1);
    }

    #[test]
    fn parse_failure_names_the_file() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("broken.rs"), "struct {").unwrap();

        let err = Package::load(tmp.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref path, .. } if path.ends_with("broken.rs")));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = tempdir().unwrap();
        let err = Package::load(tmp.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempdir().unwrap();
        let err = Package::load(&tmp.path().join("absent"), None).unwrap_err();
        assert!(matches!(err, LoadError::Dir { .. }));
    }
}
