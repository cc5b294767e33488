use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// A single schema violation, addressed by a dotted path into the input
/// (e.g. `tasks.2.title` or `operations.0.variable.resourceTypes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Raised when a plan, a task/variable payload or a patch operation list does
/// not match the schema. All issues found in one pass are reported together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", .issues.iter().join("; "))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(path, message)],
        }
    }
}

/// The kind of plan entity a patch operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    Task,
    Variable,
}

impl fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchTarget::Task => write!(f, "task"),
            PatchTarget::Variable => write!(f, "variable"),
        }
    }
}

/// Errors that abort a patch. The first failing operation wins and no partial
/// result is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Operation #{index} ({op}) failed: {target} '{id}' already exists")]
    AlreadyExists {
        index: usize,
        op: &'static str,
        target: PatchTarget,
        id: String,
    },

    #[error("Operation #{index} ({op}) failed: {target} '{id}' not found")]
    NotFound {
        index: usize,
        op: &'static str,
        target: PatchTarget,
        id: String,
    },

    #[error("Operation #{index} ({op}) failed: invalid payload for {target} '{id}': {source}")]
    InvalidPayload {
        index: usize,
        op: &'static str,
        target: PatchTarget,
        id: String,
        #[source]
        source: ValidationError,
    },
}

impl PatchError {
    /// Position of the failing operation in the submitted list.
    pub fn index(&self) -> usize {
        match self {
            PatchError::AlreadyExists { index, .. }
            | PatchError::NotFound { index, .. }
            | PatchError::InvalidPayload { index, .. } => *index,
        }
    }
}

/// Errors that can occur when converting a custom or serialized format into a
/// `WorkflowPlan`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanConversionError {
    #[error("Failed to parse plan JSON: {0}")]
    JsonParseError(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
