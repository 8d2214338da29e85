//! Error types for runbook.
//!
//! Uses thiserror for derive macros. Every variant carries enough detail to be
//! acted on from the message alone; errors that can involve several offending
//! items (missing files, missing variables) always list all of them.

use crate::backend::BackendError;
use crate::exit_codes;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for runbook operations.
#[derive(Error, Debug)]
pub enum RunbookError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The task file exists in none of the searched locations.
    #[error("task '{task}' not found (searched: {})", join_paths(.searched))]
    TaskNotFound {
        /// Requested task name.
        task: String,
        /// Every location that was checked, in search order.
        searched: Vec<PathBuf>,
    },

    /// The task file front matter is structurally invalid.
    #[error("malformed task '{task}': {reason}")]
    MalformedTask {
        /// Task name.
        task: String,
        /// What is wrong with it.
        reason: String,
    },

    /// One or more environment variables required by the task are unset.
    #[error(
        "required environment variables not set: {}. Task '{description}' requires these variables",
        .missing.join(", ")
    )]
    MissingEnvironment {
        /// Names of all unset variables.
        missing: Vec<String>,
        /// Description of the task that declared them.
        description: String,
    },

    /// One or more declared context paths did not resolve.
    #[error("context paths not found:\n{}", join_missing(.0))]
    MissingContext(Vec<MissingSpec>),

    /// One or more declared repository paths did not resolve.
    #[error("repo paths not found:\n{}", join_missing(.0))]
    MissingRepoFiles(Vec<MissingSpec>),

    /// A path-spec declaration is null or not a sequence.
    #[error("invalid '{field}' declaration: {reason}")]
    InvalidSpecType {
        /// Front matter key (`context`, `repo`, `environment`).
        field: String,
        /// Distinguishes an empty value from a wrong type.
        reason: String,
    },

    /// The backend reply does not follow the marker grammar.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] ResponseDefect),

    /// A file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The completion backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A declared path spec that resolved to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSpec {
    /// The spec after variable substitution.
    pub spec: String,
    /// Where it was looked for.
    pub resolved: PathBuf,
}

impl fmt::Display for MissingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.spec, self.resolved.display())
    }
}

/// Structural problems with a backend reply.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDefect {
    /// One or both markers are absent.
    #[error("response must contain ---COMMIT_MSG--- and ---PATCH--- blocks")]
    MissingMarkers,

    /// The patch marker does not follow the commit message marker.
    #[error("---PATCH--- must come after ---COMMIT_MSG---")]
    WrongOrder,
}

impl RunbookError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunbookError::UserError(_) | RunbookError::Backend(BackendError::Config(_)) => {
                exit_codes::USER_ERROR
            }
            RunbookError::TaskNotFound { .. }
            | RunbookError::MalformedTask { .. }
            | RunbookError::MissingEnvironment { .. }
            | RunbookError::MissingContext(_)
            | RunbookError::MissingRepoFiles(_)
            | RunbookError::InvalidSpecType { .. }
            | RunbookError::Io { .. } => exit_codes::TASK_FAILURE,
            RunbookError::Backend(_) => exit_codes::BACKEND_FAILURE,
            RunbookError::MalformedResponse(_) => exit_codes::RESPONSE_FAILURE,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunbookError::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_missing(missing: &[MissingSpec]) -> String {
    missing
        .iter()
        .map(|m| format!("  {}", m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for runbook operations.
pub type Result<T> = std::result::Result<T, RunbookError>;
