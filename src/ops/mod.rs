//! # Operations
//!
//! [`FsOps`] provides every operation of this crate on top of any
//! [`Platform`]. It is blanket-implemented, so the host filesystem
//! ([`Native`](crate::Native)), a [`Layer`](crate::Layer)-wrapped platform,
//! and test doubles all get it for free.
//!
//! ## Two Calling Conventions
//!
//! Every operation comes in two forms that share one core routine:
//!
//! | Form | Signature | On failure |
//! |------|-----------|------------|
//! | raising | `op(args) -> Result<T, FsError>` | `Err` with code + path(s) |
//! | error-code | `op_with_code(args, &mut ErrorCode) -> T` | code stored, fallback returned |
//!
//! The error-code form clears the code on success.
//!
//! ```rust
//! use fsmeta::{ErrorCode, ErrorKind, FsOps, Native, PermOptions, Perms};
//! use std::path::Path;
//!
//! let missing = Path::new("/no/such/fsmeta/path");
//!
//! let err = Native
//!     .set_permissions(missing, Perms::NONE, PermOptions::REPLACE)
//!     .unwrap_err();
//!
//! let mut ec = ErrorCode::default();
//! Native.set_permissions_with_code(missing, Perms::NONE, PermOptions::REPLACE, &mut ec);
//!
//! assert_eq!(err.code(), ec);
//! assert_eq!(ec.kind(), Some(ErrorKind::NotFound));
//! assert_eq!(err.path1(), missing);
//! ```

mod hard_link;
mod permissions;
mod query;
mod remove;

use std::path::Path;

use crate::dir_iter::{self, DirectoryIterator};
use crate::report::{Site, store};
use crate::{ErrorCode, FsError, PermOptions, Perms, Platform, Status};

/// Permission, link, status, removal and iteration operations.
///
/// All methods have default implementations; see the [module docs](self) for
/// the calling conventions.
pub trait FsOps: Platform {
    /// Change the permission bits of `path`.
    ///
    /// - [`PermMode::Replace`](crate::PermMode::Replace): set exactly `perms`.
    /// - [`PermMode::Add`](crate::PermMode::Add): set `current | perms`.
    /// - [`PermMode::Remove`](crate::PermMode::Remove): set `current & !perms`.
    ///
    /// Symlinks are followed unless `opts` is no-follow. With no-follow on a
    /// symlink, platforms without symlink permissions fail with
    /// [`ErrorKind::NotSupported`](crate::ErrorKind::NotSupported) and leave
    /// both the link and its target untouched.
    ///
    /// # Concurrency
    ///
    /// Add and remove are read-modify-write. A concurrent external change to
    /// the same entry between the read and the write is overwritten.
    ///
    /// # Errors
    ///
    /// - `NotFound`: `path` (or, when following, its target) does not exist
    /// - `PermissionDenied`: traversal or change denied
    /// - `NotSupported`: symlink permissions unavailable
    /// - `InvalidArgument`: `perms` is [`Perms::UNKNOWN`]
    ///
    /// The error's `path1` is `path`; `path2` is empty.
    fn set_permissions(&self, path: &Path, perms: Perms, opts: PermOptions) -> Result<(), FsError> {
        Site::new("set_permissions", path).raise(permissions::apply(self, path, perms, opts))
    }

    /// Error-code form of [`set_permissions`](FsOps::set_permissions).
    fn set_permissions_with_code(
        &self,
        path: &Path,
        perms: Perms,
        opts: PermOptions,
        ec: &mut ErrorCode,
    ) {
        store(self.set_permissions(path, perms, opts), ec, ())
    }

    /// Make `new` a second name for the file at `existing`.
    ///
    /// On success `existing` and `new` are [equivalent](FsOps::equivalent) and
    /// the shared link count has grown by one. A symlink `existing` is
    /// resolved and the link made to its target.
    ///
    /// # Errors
    ///
    /// - `NotFound`: `existing` does not exist
    /// - `IsADirectory`: `existing` is a directory
    /// - `AlreadyExists`: something, of any type, is already at `new`
    ///
    /// The error's `path1` is `existing` and `path2` is `new`.
    fn create_hard_link(&self, existing: &Path, new: &Path) -> Result<(), FsError> {
        Site::with_second("create_hard_link", existing, new)
            .raise(hard_link::create(self, existing, new))
    }

    /// Error-code form of [`create_hard_link`](FsOps::create_hard_link).
    fn create_hard_link_with_code(&self, existing: &Path, new: &Path, ec: &mut ErrorCode) {
        store(self.create_hard_link(existing, new), ec, ())
    }

    /// Number of hard links to the entry at `path`, following symlinks.
    fn hard_link_count(&self, path: &Path) -> Result<u64, FsError> {
        Site::new("hard_link_count", path).raise(hard_link::count(self, path))
    }

    /// Error-code form of [`hard_link_count`](FsOps::hard_link_count).
    /// Returns `u64::MAX` on failure.
    fn hard_link_count_with_code(&self, path: &Path, ec: &mut ErrorCode) -> u64 {
        store(self.hard_link_count(path), ec, u64::MAX)
    }

    /// Status of `path`, following symlinks.
    fn status(&self, path: &Path) -> Result<Status, FsError> {
        Site::new("status", path).raise(query::status(self, path, true))
    }

    /// Error-code form of [`status`](FsOps::status). Returns
    /// `Status::default()` (unknown type and permissions) on failure.
    fn status_with_code(&self, path: &Path, ec: &mut ErrorCode) -> Status {
        store(FsOps::status(self, path), ec, Status::default())
    }

    /// Status of `path` itself, not following a final symlink.
    fn symlink_status(&self, path: &Path) -> Result<Status, FsError> {
        Site::new("symlink_status", path).raise(query::status(self, path, false))
    }

    /// Error-code form of [`symlink_status`](FsOps::symlink_status).
    fn symlink_status_with_code(&self, path: &Path, ec: &mut ErrorCode) -> Status {
        store(self.symlink_status(path), ec, Status::default())
    }

    /// `true` if `p1` and `p2` resolve to the same filesystem entry.
    ///
    /// Compares identity (device and inode), not path strings.
    ///
    /// # Errors
    ///
    /// - `NotFound`: neither path exists (one missing path is `Ok(false)`)
    fn equivalent(&self, p1: &Path, p2: &Path) -> Result<bool, FsError> {
        Site::with_second("equivalent", p1, p2).raise(query::equivalent(self, p1, p2))
    }

    /// Error-code form of [`equivalent`](FsOps::equivalent).
    fn equivalent_with_code(&self, p1: &Path, p2: &Path, ec: &mut ErrorCode) -> bool {
        store(self.equivalent(p1, p2), ec, false)
    }

    /// Remove a file, symlink, or empty directory.
    ///
    /// Returns `false` if `path` did not exist. Symlinks are removed, not
    /// followed.
    fn remove(&self, path: &Path) -> Result<bool, FsError> {
        Site::new("remove", path).raise(remove::remove(self, path))
    }

    /// Error-code form of [`remove`](FsOps::remove).
    fn remove_with_code(&self, path: &Path, ec: &mut ErrorCode) -> bool {
        store(self.remove(path), ec, false)
    }

    /// Remove `path` and everything below it. Returns the number of entries
    /// removed, `0` if `path` did not exist.
    fn remove_all(&self, path: &Path) -> Result<u64, FsError> {
        Site::new("remove_all", path).raise(remove::remove_all(self, path))
    }

    /// Error-code form of [`remove_all`](FsOps::remove_all). Returns
    /// `u64::MAX` on failure.
    fn remove_all_with_code(&self, path: &Path, ec: &mut ErrorCode) -> u64 {
        store(self.remove_all(path), ec, u64::MAX)
    }

    /// Open `path` for iteration.
    ///
    /// An empty directory yields an iterator already at end.
    fn read_dir(&self, path: &Path) -> Result<DirectoryIterator, FsError> {
        Site::new("directory_iterator", path).raise(dir_iter::open(self, path))
    }

    /// Error-code form of [`read_dir`](FsOps::read_dir). Returns an end
    /// iterator on failure.
    fn read_dir_with_code(&self, path: &Path, ec: &mut ErrorCode) -> DirectoryIterator {
        store(FsOps::read_dir(self, path), ec, DirectoryIterator::default())
    }
}

// Blanket implementation - any Platform gets FsOps for free
impl<P: Platform + ?Sized> FsOps for P {}
