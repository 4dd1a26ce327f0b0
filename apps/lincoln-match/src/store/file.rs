use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStore, StoreError, StoreKey};

/// Profile-directory store: one file per key.
///
/// Writes go to a temporary file in the same directory and are renamed over
/// the target, so readers see either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the profile directory at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_raw(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        debug!(key = %key, bytes = value.len(), "Persisted value");
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchedCourse;
    use crate::store::StoreExt;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let courses = vec![MatchedCourse::new("Architecture", "Design buildings")];
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.save(StoreKey::MatchedCourses, &courses).unwrap();
            store.save_text(StoreKey::UserEmail, "ada@example.com").unwrap();
        }
        let reopened = FileStore::open(dir.path()).unwrap();
        let loaded: Option<Vec<MatchedCourse>> = reopened.load(StoreKey::MatchedCourses);
        assert_eq!(loaded, Some(courses));
        assert_eq!(
            reopened.load_text(StoreKey::UserEmail).as_deref(),
            Some("ada@example.com")
        );
    }

    #[test]
    fn test_overwrite_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save_text(StoreKey::StudentName, "A much longer name").unwrap();
        store.save_text(StoreKey::StudentName, "Bo").unwrap();
        assert_eq!(store.load_text(StoreKey::StudentName).as_deref(), Some("Bo"));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save_text(StoreKey::UserEmail, "a@b.c").unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["userEmail".to_string()]);
    }

    #[test]
    fn test_remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.clear(StoreKey::EmailConsent).unwrap();
    }

    #[test]
    fn test_corrupted_file_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("matchedCourses"), b"[{\"name\":").unwrap();
        let loaded: Option<Vec<MatchedCourse>> = store.load(StoreKey::MatchedCourses);
        assert!(loaded.is_none());
    }
}
