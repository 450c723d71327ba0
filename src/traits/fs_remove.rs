//! Entry removal.

use std::io;
use std::path::Path;

/// Removes single entries. Neither method follows symlinks.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRemove`.
pub trait FsRemove: Send + Sync {
    /// Remove a file or symlink.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_remove_is_object_safe() {
        fn _check(_: &dyn FsRemove) {}
    }
}
