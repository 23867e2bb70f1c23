//! Strongly-typed ID newtypes for backend entities.
//!
//! The records backend identifies entities with opaque strings. Each entity
//! gets its own wrapper so a `DepartmentId` can never be passed where a
//! `FacultyId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use unirecords_models::ids::{DepartmentId, FacultyId};
//!
//! fn load_faculty(id: &FacultyId) { /* ... */ }
//!
//! let faculty_id = FacultyId::new("fac_1");
//! let department_id = DepartmentId::new("dep_1");
//!
//! load_faculty(&faculty_id);       // OK
//! // load_faculty(&department_id); // Compile error! Type mismatch.
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// Macro to define a strongly-typed ID newtype around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a faculty.
    FacultyId
);

define_id!(
    /// Identifier of a department.
    DepartmentId
);

define_id!(
    /// Identifier of a course.
    CourseId
);

define_id!(
    /// Identifier of a staff record (not the staff member's user account).
    StaffId
);

define_id!(
    /// Identifier of a student record (not the student's user account).
    StudentId
);

define_id!(
    /// Identifier of a course result.
    ResultId
);

define_id!(
    /// Identifier of an academic session.
    SessionId
);

define_id!(
    /// Identifier of a user account.
    UserId
);

define_id!(
    /// Identifier of a department grade scale entry.
    GradeScaleId
);

define_id!(
    /// Identifier of an audit log entry.
    AuditLogId
);

/// Validation rule for required id fields: the id must not be blank.
pub fn required_id<I: AsRef<str>>(id: &I) -> Result<(), ValidationError> {
    if id.as_ref().trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("This field is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = FacultyId::new("fac_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""fac_1""#);

        let parsed: DepartmentId = serde_json::from_str(r#""dep_1""#).unwrap();
        assert_eq!(parsed.as_str(), "dep_1");
    }

    #[test]
    fn test_display_and_debug() {
        let id = StaffId::from("staff_9");
        assert_eq!(id.to_string(), "staff_9");
        assert_eq!(format!("{id:?}"), "StaffId(staff_9)");
    }

    #[test]
    fn test_required_id_rejects_blank() {
        assert!(required_id(&FacultyId::new("  ")).is_err());
        assert!(required_id(&FacultyId::new("fac_1")).is_ok());
    }
}
