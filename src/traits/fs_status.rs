//! Entry status lookup.

use std::io;
use std::path::Path;

use crate::Status;

/// Reads the status of a path.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsStatus`.
pub trait FsStatus: Send + Sync {
    /// Status of `path`.
    ///
    /// When `follow` is `true` a symlink is resolved and the status of its
    /// target is returned; a dangling symlink then fails with `NotFound`.
    /// When `follow` is `false` the status of the link itself is returned.
    fn status(&self, path: &Path, follow: bool) -> io::Result<Status>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_status_is_object_safe() {
        fn _check(_: &dyn FsStatus) {}
    }
}
