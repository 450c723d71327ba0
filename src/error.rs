//! Error types shared by both calling conventions.
//!
//! Every fallible operation in this crate is implemented once, as a routine
//! returning `Result<T, ErrorCode>`. The raising form lifts the [`ErrorCode`]
//! into an [`FsError`] carrying the implicated path(s); the error-code form
//! stores the same code into a caller-provided `&mut ErrorCode`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Category of a failure, independent of the platform that produced it.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Path does not exist.
    NotFound,
    /// Access to the path or one of its ancestors was denied.
    PermissionDenied,
    /// Destination already exists.
    AlreadyExists,
    /// A path component that must be a directory is not one.
    NotADirectory,
    /// A directory was given where one is not allowed (e.g. hard-link source).
    IsADirectory,
    /// The platform cannot perform the operation (e.g. symlink permissions on Linux).
    NotSupported,
    /// Arguments were rejected before reaching the platform.
    InvalidArgument,
    /// Any platform failure outside the categories above.
    Other,
}

impl ErrorKind {
    const ALL: [ErrorKind; 8] = [
        ErrorKind::NotFound,
        ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists,
        ErrorKind::NotADirectory,
        ErrorKind::IsADirectory,
        ErrorKind::NotSupported,
        ErrorKind::InvalidArgument,
        ErrorKind::Other,
    ];

    /// Short human-readable description.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "no such file or directory",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::AlreadyExists => "file exists",
            ErrorKind::NotADirectory => "not a directory",
            ErrorKind::IsADirectory => "is a directory",
            ErrorKind::NotSupported => "operation not supported",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Other => "other error",
        }
    }

    // Generic codes are 1-based so that 0 keeps meaning "no error".
    const fn generic_value(self) -> i32 {
        self as i32 + 1
    }

    fn from_generic_value(value: i32) -> ErrorKind {
        value
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| Self::ALL.get(idx).copied())
            .unwrap_or(ErrorKind::Other)
    }

    fn from_errno(errno: i32) -> ErrorKind {
        #[cfg(unix)]
        {
            use nix::libc;
            if errno == libc::EOPNOTSUPP || errno == libc::ENOTSUP {
                return ErrorKind::NotSupported;
            }
        }
        ErrorKind::from(io::Error::from_raw_os_error(errno).kind())
    }
}

impl From<io::ErrorKind> for ErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
            io::ErrorKind::NotADirectory => ErrorKind::NotADirectory,
            io::ErrorKind::IsADirectory => ErrorKind::IsADirectory,
            io::ErrorKind::Unsupported => ErrorKind::NotSupported,
            io::ErrorKind::InvalidInput => ErrorKind::InvalidArgument,
            _ => ErrorKind::Other,
        }
    }
}

impl From<ErrorKind> for io::ErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => io::ErrorKind::NotFound,
            ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            ErrorKind::NotADirectory => io::ErrorKind::NotADirectory,
            ErrorKind::IsADirectory => io::ErrorKind::IsADirectory,
            ErrorKind::NotSupported => io::ErrorKind::Unsupported,
            ErrorKind::InvalidArgument => io::ErrorKind::InvalidInput,
            ErrorKind::Other => io::ErrorKind::Other,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an [`ErrorCode`] value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorDomain {
    /// Raw OS error number (`errno` on Unix, `GetLastError` on Windows).
    #[default]
    System,
    /// Failure detected by this crate before reaching the platform.
    Generic,
}

/// A `(domain, value)` pair describing the outcome of one operation.
///
/// A value of `0` means success; [`ErrorCode::default`] is the cleared state.
///
/// # Examples
///
/// ```rust
/// use fsmeta::{ErrorCode, ErrorKind};
///
/// let mut ec = ErrorCode::from(ErrorKind::AlreadyExists);
/// assert!(ec.is_err());
/// assert_eq!(ec.kind(), Some(ErrorKind::AlreadyExists));
///
/// ec.clear();
/// assert!(ec.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorCode {
    domain: ErrorDomain,
    value: i32,
}

impl ErrorCode {
    /// Wrap a raw OS error number.
    pub const fn from_raw_os_error(errno: i32) -> Self {
        Self {
            domain: ErrorDomain::System,
            value: errno,
        }
    }

    /// The domain the value belongs to.
    pub const fn domain(&self) -> ErrorDomain {
        self.domain
    }

    /// The raw value; `0` when cleared.
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// The OS error number, if this code came from the platform.
    pub const fn raw_os_error(&self) -> Option<i32> {
        match self.domain {
            ErrorDomain::System if self.value != 0 => Some(self.value),
            _ => None,
        }
    }

    /// `true` when no error is recorded.
    pub const fn is_ok(&self) -> bool {
        self.value == 0
    }

    /// `true` when an error is recorded.
    pub const fn is_err(&self) -> bool {
        self.value != 0
    }

    /// Reset to the success state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Category of the recorded failure, `None` when cleared.
    pub fn kind(&self) -> Option<ErrorKind> {
        if self.is_ok() {
            return None;
        }
        Some(match self.domain {
            ErrorDomain::System => ErrorKind::from_errno(self.value),
            ErrorDomain::Generic => ErrorKind::from_generic_value(self.value),
        })
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        Self {
            domain: ErrorDomain::Generic,
            value: kind.generic_value(),
        }
    }
}

impl From<io::Error> for ErrorCode {
    fn from(error: io::Error) -> Self {
        Self::from(&error)
    }
}

impl From<&io::Error> for ErrorCode {
    fn from(error: &io::Error) -> Self {
        match error.raw_os_error() {
            Some(errno) if errno != 0 => Self::from_raw_os_error(errno),
            _ => Self::from(ErrorKind::from(error.kind())),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.domain, self.kind()) {
            (_, None) => f.write_str("success"),
            (ErrorDomain::System, Some(_)) => {
                write!(f, "{}", io::Error::from_raw_os_error(self.value))
            }
            (ErrorDomain::Generic, Some(kind)) => f.write_str(kind.as_str()),
        }
    }
}

/// Structured error returned by the raising form of every operation.
///
/// Carries the failing operation, its [`ErrorCode`], and up to two implicated
/// paths. `path2` is empty for single-path operations.
///
/// # Examples
///
/// ```rust
/// use fsmeta::{ErrorKind, FsError};
///
/// let err = FsError::new("set_permissions", ErrorKind::NotFound.into(), "/missing", "");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.path1().to_str(), Some("/missing"));
/// assert!(err.path2().as_os_str().is_empty());
/// assert_eq!(err.to_string(), "set_permissions: no such file or directory: \"/missing\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation}: {code}{}", describe_paths(.path1, .path2))]
pub struct FsError {
    operation: &'static str,
    code: ErrorCode,
    path1: PathBuf,
    path2: PathBuf,
}

fn describe_paths(path1: &Path, path2: &Path) -> String {
    match (path1.as_os_str().is_empty(), path2.as_os_str().is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!(": {:?}", path1),
        (true, false) => format!(": {:?}", path2),
        (false, false) => format!(": {:?}, {:?}", path1, path2),
    }
}

impl FsError {
    /// Build an error for `operation`. Pass an empty path for an unused slot.
    pub fn new(
        operation: &'static str,
        code: ErrorCode,
        path1: impl Into<PathBuf>,
        path2: impl Into<PathBuf>,
    ) -> Self {
        Self {
            operation,
            code,
            path1: path1.into(),
            path2: path2.into(),
        }
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The underlying error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind().unwrap_or(ErrorKind::Other)
    }

    /// Primary implicated path.
    pub fn path1(&self) -> &Path {
        &self.path1
    }

    /// Secondary implicated path (empty when not relevant).
    pub fn path2(&self) -> &Path {
        &self.path2
    }
}

impl From<FsError> for io::Error {
    fn from(error: FsError) -> Self {
        let kind = io::ErrorKind::from(error.kind());
        io::Error::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_code_has_no_kind() {
        let ec = ErrorCode::default();
        assert!(ec.is_ok());
        assert_eq!(ec.kind(), None);
        assert_eq!(ec.raw_os_error(), None);
        assert_eq!(ec.to_string(), "success");
    }

    #[test]
    fn generic_codes_round_trip_every_kind() {
        for kind in ErrorKind::ALL {
            let ec = ErrorCode::from(kind);
            assert_eq!(ec.domain(), ErrorDomain::Generic);
            assert!(ec.is_err());
            assert_eq!(ec.kind(), Some(kind));
        }
    }

    #[test]
    fn out_of_range_generic_values_are_other() {
        for value in [i32::MIN, -1, ErrorKind::ALL.len() as i32 + 1, i32::MAX] {
            let ec = ErrorCode {
                domain: ErrorDomain::Generic,
                value,
            };
            assert_eq!(ec.kind(), Some(ErrorKind::Other));
            assert!(!ec.to_string().is_empty());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_code_with_extreme_value_has_a_kind() {
        let ec: ErrorCode =
            serde_json::from_str(r#"{"domain":"Generic","value":-2147483648}"#).unwrap();
        assert_eq!(ec.kind(), Some(ErrorKind::Other));
        let err = FsError::new("remove", ec, "/a", "");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        assert_eq!(ErrorCode::from(io_err).kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn io_other_maps_to_other() {
        let io_err = io::Error::new(io::ErrorKind::Other, "test");
        assert_eq!(ErrorCode::from(io_err).kind(), Some(ErrorKind::Other));
    }

    #[cfg(unix)]
    #[test]
    fn errno_mapping() {
        use nix::libc;

        let cases = [
            (libc::ENOENT, ErrorKind::NotFound),
            (libc::EACCES, ErrorKind::PermissionDenied),
            (libc::EEXIST, ErrorKind::AlreadyExists),
            (libc::ENOTDIR, ErrorKind::NotADirectory),
            (libc::EISDIR, ErrorKind::IsADirectory),
            (libc::EOPNOTSUPP, ErrorKind::NotSupported),
            (libc::EINVAL, ErrorKind::InvalidArgument),
        ];
        for (errno, kind) in cases {
            let ec = ErrorCode::from(io::Error::from_raw_os_error(errno));
            assert_eq!(ec.raw_os_error(), Some(errno));
            assert_eq!(ec.kind(), Some(kind), "errno {errno}");
        }
    }

    #[test]
    fn fs_error_display_with_two_paths() {
        let err = FsError::new(
            "create_hard_link",
            ErrorKind::AlreadyExists.into(),
            "/a",
            "/b",
        );
        assert_eq!(
            err.to_string(),
            "create_hard_link: file exists: \"/a\", \"/b\""
        );
    }

    #[test]
    fn fs_error_into_io_error_keeps_kind() {
        let err = FsError::new("remove", ErrorKind::PermissionDenied.into(), "/x", "");
        let io_err = io::Error::from(err);
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }
}
