//! # fsmeta
//!
//! Permission changes, hard links and directory ranges over the host
//! filesystem, with one contract across platforms and two ways to report
//! failure.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use fsmeta::{ErrorCode, PermOptions, Perms};
//!
//! let dir = std::env::temp_dir().join("fsmeta-quick-start");
//! # let _ = fsmeta::remove_all(&dir);
//! std::fs::create_dir_all(&dir).unwrap();
//! let file = dir.join("data.txt");
//! std::fs::write(&file, b"hello").unwrap();
//!
//! // Raising form: failures come back as `FsError` with code and path(s).
//! fsmeta::set_permissions(&file, Perms::OWNER_ALL, PermOptions::REPLACE)?;
//! fsmeta::set_permissions(&file, Perms::GROUP_READ, PermOptions::ADD)?;
//! assert_eq!(fsmeta::status(&file)?.permissions.bits(), 0o740);
//!
//! // Error-code form: never fails, reports through `ec`.
//! let mut ec = ErrorCode::default();
//! fsmeta::create_hard_link_with_code(&file, dir.join("alias.txt"), &mut ec);
//! assert!(ec.is_ok());
//! assert!(fsmeta::equivalent(&file, dir.join("alias.txt"))?);
//!
//! fsmeta::remove_all(&dir)?;
//! # Ok::<(), fsmeta::FsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Perms`] | owner/group/others × rwx bitmask, plus special bits and `UNKNOWN` |
//! | [`PermOptions`] | replace/add/remove plus no-follow |
//! | [`ErrorCode`] | `(domain, value)` outcome for the error-code form |
//! | [`FsError`] | structured error: operation, code, up to two paths |
//! | [`DirectoryIterator`] | directory cursor usable as a range via [`begin`]/[`end`] |
//! | [`FsOps`] | every operation, for any [`Platform`] |
//! | [`Native`] | the host filesystem |
//!
//! ---
//!
//! ## Two Calling Conventions
//!
//! Each operation `op` exists as `op(..) -> Result<T, FsError>` and as
//! `op_with_code(.., &mut ErrorCode) -> T`. Both run the same core routine;
//! they report the same [`ErrorKind`] and code for the same fault and differ
//! only in how the failure reaches the caller. The error-code form clears the
//! code on success.
//!
//! ---
//!
//! ## Platform Differences
//!
//! - **Symlink permissions.** [`native::SYMLINK_PERMISSIONS`] is resolved at
//!   build time. Where it is `false` (Linux), a no-follow permission change on
//!   a symlink fails with [`ErrorKind::NotSupported`] and touches nothing.
//! - **Windows.** Only the read-only attribute exists. It reads back as
//!   `0o555`/`0o777` and is set when the owner-write bit is absent.
//!
//! ---
//!
//! ## Logging
//!
//! Operations emit `tracing` events at `debug` level. Wrap a platform with
//! [`TracingLayer`] to also trace each system primitive.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`Perms`], [`PermOptions`], [`Status`], [`DirEntry`], [`ErrorCode`], etc. |

use std::path::Path;

// Private modules
mod dir_iter;
mod error;
mod layer;
mod ops;
mod report;
mod traits;
mod types;

pub mod native;

// Public re-exports - error types
pub use error::{ErrorCode, ErrorDomain, ErrorKind, FsError};

// Public re-exports - core types
pub use types::{DirEntry, FileType, PermMode, PermOptions, Perms, Status};

// Public re-exports - platform traits
pub use traits::{EntrySource, FsDir, FsLink, FsPermissions, FsRemove, FsStatus, Platform};

// Public re-exports - operations
pub use dir_iter::{DirectoryIterator, begin, end};
pub use native::Native;
pub use ops::FsOps;

// Public re-exports - infrastructure
pub use layer::{Layer, LayerExt, Traced, TracingLayer};

/// [`FsOps::set_permissions`] on the host filesystem.
pub fn set_permissions(path: impl AsRef<Path>, perms: Perms, opts: PermOptions) -> Result<(), FsError> {
    Native.set_permissions(path.as_ref(), perms, opts)
}

/// [`FsOps::set_permissions_with_code`] on the host filesystem.
pub fn set_permissions_with_code(
    path: impl AsRef<Path>,
    perms: Perms,
    opts: PermOptions,
    ec: &mut ErrorCode,
) {
    Native.set_permissions_with_code(path.as_ref(), perms, opts, ec)
}

/// [`FsOps::create_hard_link`] on the host filesystem.
pub fn create_hard_link(existing: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<(), FsError> {
    Native.create_hard_link(existing.as_ref(), new.as_ref())
}

/// [`FsOps::create_hard_link_with_code`] on the host filesystem.
pub fn create_hard_link_with_code(existing: impl AsRef<Path>, new: impl AsRef<Path>, ec: &mut ErrorCode) {
    Native.create_hard_link_with_code(existing.as_ref(), new.as_ref(), ec)
}

/// [`FsOps::hard_link_count`] on the host filesystem.
pub fn hard_link_count(path: impl AsRef<Path>) -> Result<u64, FsError> {
    Native.hard_link_count(path.as_ref())
}

/// [`FsOps::hard_link_count_with_code`] on the host filesystem.
pub fn hard_link_count_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> u64 {
    Native.hard_link_count_with_code(path.as_ref(), ec)
}

/// [`FsOps::status`] on the host filesystem.
pub fn status(path: impl AsRef<Path>) -> Result<Status, FsError> {
    FsOps::status(&Native, path.as_ref())
}

/// [`FsOps::status_with_code`] on the host filesystem.
pub fn status_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> Status {
    Native.status_with_code(path.as_ref(), ec)
}

/// [`FsOps::symlink_status`] on the host filesystem.
pub fn symlink_status(path: impl AsRef<Path>) -> Result<Status, FsError> {
    Native.symlink_status(path.as_ref())
}

/// [`FsOps::symlink_status_with_code`] on the host filesystem.
pub fn symlink_status_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> Status {
    Native.symlink_status_with_code(path.as_ref(), ec)
}

/// [`FsOps::equivalent`] on the host filesystem.
pub fn equivalent(p1: impl AsRef<Path>, p2: impl AsRef<Path>) -> Result<bool, FsError> {
    Native.equivalent(p1.as_ref(), p2.as_ref())
}

/// [`FsOps::equivalent_with_code`] on the host filesystem.
pub fn equivalent_with_code(p1: impl AsRef<Path>, p2: impl AsRef<Path>, ec: &mut ErrorCode) -> bool {
    Native.equivalent_with_code(p1.as_ref(), p2.as_ref(), ec)
}

/// [`FsOps::remove`] on the host filesystem.
pub fn remove(path: impl AsRef<Path>) -> Result<bool, FsError> {
    Native.remove(path.as_ref())
}

/// [`FsOps::remove_with_code`] on the host filesystem.
pub fn remove_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> bool {
    Native.remove_with_code(path.as_ref(), ec)
}

/// [`FsOps::remove_all`] on the host filesystem.
pub fn remove_all(path: impl AsRef<Path>) -> Result<u64, FsError> {
    Native.remove_all(path.as_ref())
}

/// [`FsOps::remove_all_with_code`] on the host filesystem.
pub fn remove_all_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> u64 {
    Native.remove_all_with_code(path.as_ref(), ec)
}

/// [`DirectoryIterator::new`]: iterate the entries of `path`.
pub fn read_dir(path: impl AsRef<Path>) -> Result<DirectoryIterator, FsError> {
    DirectoryIterator::new(path)
}

/// [`DirectoryIterator::new_with_code`].
pub fn read_dir_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> DirectoryIterator {
    DirectoryIterator::new_with_code(path, ec)
}
