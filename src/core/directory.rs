//! core::directory
//!
//! The student directory.
//!
//! # Invariants
//!
//! - Student ids are unique; [`StudentDirectory::insert`] refuses a second
//!   student with an id already present.
//! - A student's registered courses contain no duplicates. The directory
//!   itself only hands out `&mut Student`; the membership check lives in the
//!   engine, which is the only caller of the mutating helpers.
//!
//! Lookups are a linear scan. Callers must not assume sub-linear cost.

use thiserror::Error;

use super::types::{CourseId, StudentId};

/// Errors from directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("student {0} already exists")]
    DuplicateStudent(StudentId),
}

/// A student record and its registered courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: String,
    /// Registered course ids, oldest registration first.
    courses: Vec<CourseId>,
}

impl Student {
    fn new(id: StudentId, name: String) -> Self {
        Self {
            id,
            name,
            courses: Vec::new(),
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered course ids, most recent registration first.
    pub fn courses(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.courses.iter().rev().copied()
    }

    /// Number of registered courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Check whether the student is registered for `course`.
    pub fn is_registered(&self, course: CourseId) -> bool {
        self.courses.contains(&course)
    }

    /// Record a registration.
    ///
    /// Returns `false` (and leaves the set untouched) if the course is
    /// already registered.
    pub(crate) fn register(&mut self, course: CourseId) -> bool {
        if self.is_registered(course) {
            return false;
        }
        self.courses.push(course);
        true
    }

    /// Drop a registration.
    ///
    /// Returns `false` if the course was not registered.
    pub(crate) fn unregister(&mut self, course: CourseId) -> bool {
        match self.courses.iter().position(|&c| c == course) {
            Some(index) => {
                self.courses.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Unordered collection of students keyed by id.
///
/// Enumeration is most-recently-added first.
#[derive(Debug, Default)]
pub struct StudentDirectory {
    students: Vec<Student>,
}

impl StudentDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a student with no registered courses.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateStudent`] if `id` is already present.
    /// The directory is left unchanged in that case.
    pub fn insert(&mut self, id: StudentId, name: impl Into<String>) -> Result<(), DirectoryError> {
        if self.find(id).is_some() {
            return Err(DirectoryError::DuplicateStudent(id));
        }
        self.students.push(Student::new(id, name.into()));
        Ok(())
    }

    /// Look up a student by id.
    pub fn find(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Iterate students, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
