//! Input file discovery.

use crate::error::FunnelError;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// Something that can list the files of one kind for a funnel run.
pub trait FileLister {
    fn list(&self) -> Result<Vec<PathBuf>, FunnelError>;
}

/// Lists explicit files as given, and the matching files under directories.
///
/// Explicit files keep their command-line order. Files found under a directory
/// are sorted by path so grid order is stable across runs.
#[derive(Debug, Clone)]
pub struct PathLister {
    roots: Vec<PathBuf>,
    suffix: String,
}

impl PathLister {
    pub fn new(roots: Vec<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            roots,
            suffix: suffix.into(),
        }
    }
}

impl FileLister for PathLister {
    fn list(&self) -> Result<Vec<PathBuf>, FunnelError> {
        let mut files = Vec::new();
        for root in &self.roots {
            if root.is_file() {
                files.push(root.clone());
                continue;
            }
            if !root.is_dir() {
                return Err(FunnelError::io(
                    root,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                ));
            }

            let mut found: Vec<PathBuf> = WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.file_name().to_string_lossy().ends_with(&self.suffix))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            debug!(root = %root.display(), files = found.len(), suffix = %self.suffix, "Scanned directory");
            files.extend(found);
        }
        Ok(files)
    }
}

impl FileLister for Vec<PathBuf> {
    fn list(&self) -> Result<Vec<PathBuf>, FunnelError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.readable_model", "a.readable_model", "notes.txt", "c.inv_hash"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("d.readable_model"), "x").unwrap();

        let lister = PathLister::new(vec![dir.path().to_path_buf()], ".readable_model");
        let names: Vec<String> = lister
            .list()
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "a.readable_model".to_string(),
                "b.readable_model".to_string(),
                format!("nested{}d.readable_model", std::path::MAIN_SEPARATOR),
            ]
        );
    }

    #[test]
    fn test_explicit_files_keep_order_and_ignore_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let z = dir.path().join("z.txt");
        let a = dir.path().join("a.txt");
        std::fs::write(&z, "x").unwrap();
        std::fs::write(&a, "x").unwrap();

        let lister = PathLister::new(vec![z.clone(), a.clone()], ".readable_model");
        assert_eq!(lister.list().unwrap(), vec![z, a]);
    }

    #[test]
    fn test_missing_root_is_error() {
        let lister = PathLister::new(vec![PathBuf::from("/no/such/dir")], ".inv_hash");
        assert!(matches!(lister.list(), Err(FunnelError::Io { .. })));
    }
}
