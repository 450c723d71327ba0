//! Hard link creation and link counting.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::report::Outcome;
use crate::{ErrorKind, Platform};

/// Make `new` a second name for `existing`.
///
/// Directories are rejected and an existing `new` (of any type, dangling
/// symlinks included) is never replaced.
pub(crate) fn create<P: Platform + ?Sized>(platform: &P, existing: &Path, new: &Path) -> Outcome<()> {
    let source = platform.status(existing, true)?;
    if source.is_dir() {
        return Err(ErrorKind::IsADirectory.into());
    }
    match platform.status(new, false) {
        Ok(_) => return Err(ErrorKind::AlreadyExists.into()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    debug!(existing = %existing.display(), new = %new.display(), "creating hard link");
    platform.hard_link(existing, new)?;
    Ok(())
}

/// Number of names referring to the entry at `path` (symlinks followed).
pub(crate) fn count<P: Platform + ?Sized>(platform: &P, path: &Path) -> Outcome<u64> {
    Ok(platform.status(path, true)?.nlink)
}
