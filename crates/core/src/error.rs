use std::fmt;

use crate::permissions::Permission;

/// Domain-level error raised by the store, the request pipeline and handlers.
///
/// The HTTP layer maps each variant to exactly one status code; the
/// `Display` output is the message returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No credential, or a credential that could not be resolved to a user.
    /// `reason` is for server-side logs only.
    #[error("No valid authentication token")]
    Unauthorized { reason: String },

    /// The user holds none of the permissions an endpoint requires.
    #[error("Not allowed, missing permissions: {}", join_permissions(.missing))]
    NotAllowed { missing: Vec<Permission> },

    #[error("{0}")]
    Validation(ValidationError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_permissions(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single field-level problem found while validating a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Location of the offending value, outermost key first. Empty for issues
    /// about the payload as a whole (e.g. unrecognized keys).
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Aggregated validation failure: a headline plus every issue that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub context: String,
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// A validation failure with no field-level detail.
    pub fn message(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            issues: Vec::new(),
        }
    }

    pub fn with_issues(context: impl Into<String>, issues: Vec<Issue>) -> Self {
        Self {
            context: context.into(),
            issues,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.context)?;
        for issue in &self.issues {
            write!(f, "\n\t - {issue}")?;
        }
        Ok(())
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err)
    }
}
