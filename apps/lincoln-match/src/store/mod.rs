//! Persistence Store: device-local key/value storage for the match session
//! and the email consent record.
//!
//! Values never expire. Reads fail soft: a missing entry, an I/O failure or a
//! value that no longer deserializes all come back as `None` (with a warning in
//! the log), so a corrupted profile degrades to "no data" instead of an error.
//! Writes are synchronous and either land completely or report `StoreError`.

pub mod file;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Default shown when the matching flow never recorded a name.
pub const DEFAULT_STUDENT_NAME: &str = "Student";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Keys
// ────────────────────────────────────────────────────────────────────────────

/// Logical keys, one value each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Raw email string; its presence alone marks the user as captured.
    UserEmail,
    /// JSON `EmailConsentRecord`.
    EmailConsent,
    /// JSON array of `MatchedCourse`.
    MatchedCourses,
    /// Raw display name.
    StudentName,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::UserEmail,
        StoreKey::EmailConsent,
        StoreKey::MatchedCourses,
        StoreKey::StudentName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::UserEmail => "userEmail",
            StoreKey::EmailConsent => "emailConsent",
            StoreKey::MatchedCourses => "matchedCourses",
            StoreKey::StudentName => "studentName",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// Raw string storage. Implement this to plug in a different backend; the typed
/// helpers in `StoreExt` come for free.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn put_raw(&self, key: StoreKey, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;
}

/// Typed save/load/clear on top of any `KeyValueStore`.
pub trait StoreExt: KeyValueStore {
    /// Serializes `value` as JSON and stores it under `key`.
    fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json)
    }

    /// Loads and deserializes `key`. Never fails: unreadable or malformed
    /// values are logged and reported as absent.
    fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = self.load_text(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding stored value that failed to deserialize");
                None
            }
        }
    }

    /// Stores a raw string without JSON quoting.
    fn save_text(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.put_raw(key, value)
    }

    fn load_text(&self, key: StoreKey) -> Option<String> {
        match self.get_raw(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored value; treating as absent");
                None
            }
        }
    }

    fn clear(&self, key: StoreKey) -> Result<(), StoreError> {
        self.remove(key)
    }

    fn contains(&self, key: StoreKey) -> bool {
        self.load_text(key).is_some()
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

/// Returns the stored student name, or `"Student"` when none was recorded.
pub fn load_student_name(store: &dyn KeyValueStore) -> String {
    store
        .load_text(StoreKey::StudentName)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STUDENT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchedCourse;

    #[test]
    fn test_round_trip_matched_courses() {
        let store = MemoryStore::new();
        let courses = vec![
            MatchedCourse::new("Computer Science", "Software and systems")
                .with_entry_grades("ABB")
                .with_interests(["coding", "AI"]),
            MatchedCourse::new("Psychology", "Mind and behaviour")
                .with_link("https://www.lincoln.ac.uk/course/psyc/"),
        ];
        store.save(StoreKey::MatchedCourses, &courses).unwrap();
        let loaded: Option<Vec<MatchedCourse>> = store.load(StoreKey::MatchedCourses);
        assert_eq!(loaded, Some(courses));
    }

    #[test]
    fn test_load_missing_key_is_absent() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<MatchedCourse>> = store.load(StoreKey::MatchedCourses);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_json_is_absent_not_error() {
        let store = MemoryStore::new();
        store
            .save_text(StoreKey::MatchedCourses, "{not json")
            .unwrap();
        let loaded: Option<Vec<MatchedCourse>> = store.load(StoreKey::MatchedCourses);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_clear_removes_entry_and_is_idempotent() {
        let store = MemoryStore::new();
        store.save_text(StoreKey::UserEmail, "a@b.c").unwrap();
        store.clear(StoreKey::UserEmail).unwrap();
        assert!(!store.contains(StoreKey::UserEmail));
        store.clear(StoreKey::UserEmail).unwrap();
    }

    #[test]
    fn test_student_name_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_student_name(&store), "Student");
        store.save_text(StoreKey::StudentName, "Ada").unwrap();
        assert_eq!(load_student_name(&store), "Ada");
    }

    #[test]
    fn test_key_names_match_profile_layout() {
        let names: Vec<&str> = StoreKey::ALL.iter().map(StoreKey::as_str).collect();
        assert_eq!(
            names,
            vec!["userEmail", "emailConsent", "matchedCourses", "studentName"]
        );
    }
}
