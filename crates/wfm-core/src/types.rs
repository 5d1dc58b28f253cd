//! Identifier newtypes with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
///
/// WorkflowMax identifiers are opaque: staff IDs are numeric, job IDs are
/// job numbers such as `J000123`. Both are kept as trimmed strings.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if trimmed.len() == id.len() {
                    return Ok(Self(id));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A staff member identifier, as listed by `staff.api/list`.
    StaffId, "staff ID"
);

define_string_id!(
    /// A job identifier (the job number).
    JobId, "job ID"
);

define_string_id!(
    /// A task identifier, unique within the account.
    TaskId, "task ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_id_rejects_empty() {
        assert!(StaffId::new("").is_err());
        assert!(StaffId::new("   ").is_err());
        assert!(StaffId::new("42").is_ok());
    }

    #[test]
    fn job_id_trims_whitespace() {
        let id = JobId::new("  J000123\n").unwrap();
        assert_eq!(id.as_str(), "J000123");
    }

    #[test]
    fn empty_error_names_the_field() {
        let err = TaskId::new("").unwrap_err();
        assert_eq!(err.to_string(), "task ID cannot be empty");
    }

    #[test]
    fn task_id_as_ref() {
        let id = TaskId::new("7").unwrap();
        let s: &str = id.as_ref();
        assert_eq!(s, "7");
    }
}
