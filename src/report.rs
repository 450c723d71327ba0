//! Dual error reporting.
//!
//! Each operation has one core routine returning [`Outcome`]. [`Site::raise`]
//! turns its failure into an [`FsError`] naming the operation and paths;
//! [`store`] takes that same `Result` and writes the code into a caller's
//! `&mut ErrorCode`. The error-code form is therefore derived from the raising
//! form and both carry the same code for the same fault.

use std::path::Path;

use tracing::debug;

use crate::{ErrorCode, FsError};

/// Result of a core routine.
pub(crate) type Outcome<T> = Result<T, ErrorCode>;

/// Operation name and implicated paths of one call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site<'a> {
    operation: &'static str,
    path1: &'a Path,
    path2: Option<&'a Path>,
}

impl<'a> Site<'a> {
    pub(crate) fn new(operation: &'static str, path1: &'a Path) -> Self {
        Self {
            operation,
            path1,
            path2: None,
        }
    }

    pub(crate) fn with_second(operation: &'static str, path1: &'a Path, path2: &'a Path) -> Self {
        Self {
            operation,
            path1,
            path2: Some(path2),
        }
    }

    /// Attach this call site to a failure.
    pub(crate) fn raise<T>(&self, outcome: Outcome<T>) -> Result<T, FsError> {
        outcome.map_err(|code| {
            debug!(
                operation = self.operation,
                path1 = %self.path1.display(),
                path2 = ?self.path2,
                %code,
                "operation failed"
            );
            FsError::new(
                self.operation,
                code,
                self.path1,
                self.path2.unwrap_or(Path::new("")),
            )
        })
    }
}

/// Error-code adapter: returns the value on success and clears `ec`; on
/// failure stores the code and returns `fallback`.
pub(crate) fn store<T>(result: Result<T, FsError>, ec: &mut ErrorCode, fallback: T) -> T {
    match result {
        Ok(value) => {
            ec.clear();
            value
        }
        Err(err) => {
            *ec = err.code();
            fallback
        }
    }
}
