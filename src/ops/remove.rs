//! Single and recursive removal. Symlinks are removed, never followed.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::report::Outcome;
use crate::{Platform, Status};

/// Remove a file, symlink, or empty directory. `false` if nothing was there.
pub(crate) fn remove<P: Platform + ?Sized>(platform: &P, path: &Path) -> Outcome<bool> {
    let Some(status) = lstat(platform, path)? else {
        return Ok(false);
    };
    remove_entry(platform, path, &status)?;
    Ok(true)
}

/// Remove `path` and, if it is a directory, everything below it.
/// Returns the number of entries removed.
pub(crate) fn remove_all<P: Platform + ?Sized>(platform: &P, path: &Path) -> Outcome<u64> {
    let Some(status) = lstat(platform, path)? else {
        return Ok(0);
    };
    let removed = remove_tree(platform, path, &status)?;
    debug!(path = %path.display(), removed, "removed tree");
    Ok(removed)
}

fn remove_tree<P: Platform + ?Sized>(platform: &P, path: &Path, status: &Status) -> Outcome<u64> {
    let mut removed = 0;
    if status.is_dir() {
        for entry in platform.read_dir(path)? {
            let entry = entry?;
            // A child that vanished concurrently is not an error.
            if let Some(child) = lstat(platform, &entry.path)? {
                removed += remove_tree(platform, &entry.path, &child)?;
            }
        }
    }
    remove_entry(platform, path, status)?;
    Ok(removed + 1)
}

fn remove_entry<P: Platform + ?Sized>(platform: &P, path: &Path, status: &Status) -> Outcome<()> {
    if status.is_dir() {
        platform.remove_dir(path)?;
    } else {
        platform.remove_file(path)?;
    }
    Ok(())
}

fn lstat<P: Platform + ?Sized>(platform: &P, path: &Path) -> Outcome<Option<Status>> {
    match platform.status(path, false) {
        Ok(status) => Ok(Some(status)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
