//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`StudentId`] - Student identifier
//! - [`CourseId`] - Course identifier
//! - [`RegistrationRequest`] - A pending (student, course) enrollment request
//! - [`UndoRecord`] - A reversible record of one completed registration
//!
//! # Identifiers
//!
//! Student and course identifiers are both plain integers in the domain, but
//! they are kept as distinct types so that a course id can never be looked up
//! in the student directory by accident.
//!
//! # Examples
//!
//! ```
//! use registrar::core::types::{CourseId, StudentId};
//!
//! let student: StudentId = "42".parse().unwrap();
//! assert_eq!(student, StudentId::new(42));
//!
//! assert!("forty-two".parse::<CourseId>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {kind} id '{value}': expected an integer")]
    InvalidId { kind: &'static str, value: String },
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Get the raw identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a student in the directory.
    ///
    /// Unique across the directory; the directory refuses a second student
    /// with an id it already holds.
    StudentId,
    "student"
);

id_type!(
    /// Identifier of a course in the catalog.
    ///
    /// Ordering on `CourseId` is the ordering of the catalog tree.
    CourseId,
    "course"
);

/// A pending enrollment request.
///
/// Created when a caller submits a request and consumed when the engine
/// drains the queue. Nothing is validated at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

impl RegistrationRequest {
    pub fn new(student_id: StudentId, course_id: CourseId) -> Self {
        Self {
            student_id,
            course_id,
        }
    }
}

/// A completed registration that can be reversed.
///
/// Exactly one record is created per successful registration, and each
/// record is consumed by at most one undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UndoRecord {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

impl UndoRecord {
    pub fn new(student_id: StudentId, course_id: CourseId) -> Self {
        Self {
            student_id,
            course_id,
        }
    }
}

impl From<RegistrationRequest> for UndoRecord {
    fn from(request: RegistrationRequest) -> Self {
        Self::new(request.student_id, request.course_id)
    }
}
