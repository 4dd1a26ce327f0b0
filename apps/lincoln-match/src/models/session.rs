//! Match Session: the courses a user matched with, plus a browsing cursor.
//!
//! The course list is persisted under `matchedCourses`; the cursor is view
//! state and starts at 0 on every restore. An empty list is never a session.

use tracing::{debug, warn};

use crate::models::MatchedCourse;
use crate::store::{KeyValueStore, StoreError, StoreExt, StoreKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSession {
    courses: Vec<MatchedCourse>,
    current_index: usize,
}

impl MatchSession {
    /// Builds a session positioned on the first course.
    ///
    /// Returns `None` when `courses` is empty or any course lacks a name.
    pub fn new(courses: Vec<MatchedCourse>) -> Option<Self> {
        if courses.is_empty() || !courses.iter().all(MatchedCourse::has_name) {
            return None;
        }
        Some(Self {
            courses,
            current_index: 0,
        })
    }

    /// Reads the stored match set. Missing, malformed or empty data all mean
    /// "no session"; the caller sends the user back to matching.
    pub fn restore(store: &dyn KeyValueStore) -> Option<Self> {
        let courses: Vec<MatchedCourse> = store.load(StoreKey::MatchedCourses)?;
        let session = Self::new(courses);
        if session.is_none() {
            warn!("Stored match set is empty or has unnamed courses; ignoring it");
        }
        session
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.save(StoreKey::MatchedCourses, &self.courses)
    }

    /// Drops the stored match set (the user restarts matching).
    pub fn forget(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.clear(StoreKey::MatchedCourses)
    }

    pub fn courses(&self) -> &[MatchedCourse] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> &MatchedCourse {
        &self.courses[self.current_index]
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.courses.len()
    }

    /// Moves forward one course. No-op on the last course.
    pub fn next(&mut self) -> &MatchedCourse {
        if !self.is_last() {
            self.current_index += 1;
        }
        self.current()
    }

    /// Moves back one course. No-op on the first course.
    pub fn previous(&mut self) -> &MatchedCourse {
        if !self.is_first() {
            self.current_index -= 1;
        }
        self.current()
    }

    /// Jumps to `index`. Out-of-range indices leave the cursor where it was and
    /// return `false`.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.courses.len() {
            debug!(index, len = self.courses.len(), "Ignoring out-of-range jump");
            return false;
        }
        self.current_index = index;
        true
    }

    /// One-based "n / total" position label.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.courses.len())
    }

    pub fn course_names(&self) -> Vec<String> {
        self.courses.iter().map(|c| c.name.clone()).collect()
    }
}
