use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Checks if a file exists at the given path
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read a whole file as UTF-8 text
pub fn file_get(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write `content` to `path` without ever leaving a partial file behind.
///
/// The data goes to a uniquely named temporary file in the destination
/// directory, which is then renamed over the destination.
pub fn file_write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        file_write_atomic(&path, "mode: rule\n").unwrap();
        assert!(file_exists(&path));
        assert_eq!(file_get(&path).unwrap(), "mode: rule\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_leaves_other_temp_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let foreign = dir.path().join("config.yaml.tmp");
        fs::write(&foreign, "other run\n").unwrap();

        file_write_atomic(&path, "first: 1\n").unwrap();
        file_write_atomic(&path, "second: 2\n").unwrap();

        assert_eq!(file_get(&path).unwrap(), "second: 2\n");
        assert_eq!(file_get(&foreign).unwrap(), "other run\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "old: true\n").unwrap();

        file_write_atomic(&path, "new: true\n").unwrap();
        assert_eq!(file_get(&path).unwrap(), "new: true\n");
    }

    #[test]
    fn test_write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.yaml");

        let err = file_write_atomic(&path, "a: 1\n").unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_get_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_get(&dir.path().join("nope.yaml")).is_err());
    }
}
