//! Hard link creation.

use std::io;
use std::path::Path;

/// Creates hard links.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsLink`.
pub trait FsLink: Send + Sync {
    /// Make `new` a second name for the entry at `existing`.
    ///
    /// If `existing` is a symlink, the link is made to the symlink's resolved
    /// target.
    ///
    /// # Errors
    ///
    /// Whatever the underlying call reports; callers validate directories and
    /// existing destinations before calling.
    fn hard_link(&self, existing: &Path, new: &Path) -> io::Result<()>;
}
