//! Permission bit mutation.

use std::io;
use std::path::Path;

use crate::Perms;

/// Writes permission bits.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsPermissions`.
///
/// # Note
///
/// Reading permissions is done via [`FsStatus::status`](super::FsStatus::status).
pub trait FsPermissions: Send + Sync {
    /// Set the permission bits of `path` to exactly `perms`.
    ///
    /// With `follow == false` and a symlink at `path`, the link itself must be
    /// changed or the call must fail; the link target must never be touched.
    fn set_mode(&self, path: &Path, perms: Perms, follow: bool) -> io::Result<()>;

    /// Whether symlinks carry their own permission bits on this platform.
    ///
    /// The answer is fixed for the lifetime of the implementation.
    fn supports_symlink_permissions(&self) -> bool;
}
