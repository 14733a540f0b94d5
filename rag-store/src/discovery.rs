//! Corpus discovery: recursive, extension-filtered file enumeration.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

/// Enumerates all files under `root` (recursively) whose extension matches
/// `extension` (without the leading dot, case-insensitive).
///
/// The result is sorted by path so ingestion assigns deterministic ids.
///
/// # Errors
/// Returns the underlying I/O error if a directory cannot be read.
pub fn corpus_files(root: impl AsRef<Path>, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let root = root.as_ref();
    trace!("discovery::corpus_files root={:?} ext={extension}", root);

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!("discovery::corpus_files -> {} files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_matching_files_recursively_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("sub/c.md"), "c").unwrap();
        fs::write(dir.path().join("ignore.txt"), "x").unwrap();

        let files = corpus_files(dir.path(), "md").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(corpus_files(dir.path(), "md").unwrap().is_empty());
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("UP.MD"), "x").unwrap();
        assert_eq!(corpus_files(dir.path(), "md").unwrap().len(), 1);
    }
}
