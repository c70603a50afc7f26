//! File-backed storage: one `<key>.json` file per key

use crate::error::StorageError;
use crate::storage::KeyValueStorage;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path holding `key`
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced so a key can never
    /// escape the storage directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| io_error(&self.dir, err))?;

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|err| io_error(&path, err))?;
        log::debug!("Storage: wrote {:?}", path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_or;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("photos").unwrap(), None);
        storage.set("photos", r#"[{"id":1}]"#).unwrap();

        assert!(dir.path().join("nested/photos.json").exists());
        assert_eq!(
            storage.get("photos").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove("nothing").unwrap();

        storage.set("k", "1").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_key_cannot_escape_directory() {
        let storage = FileStorage::new("/tmp/store");
        assert_eq!(
            storage.path_for("../etc/passwd"),
            PathBuf::from("/tmp/store/___etc_passwd.json")
        );
    }

    #[test]
    fn test_values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        FileStorage::new(dir.path()).set("token", r#""abc""#).unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(load_or(&reopened, "token", String::new()), "abc");
    }
}
