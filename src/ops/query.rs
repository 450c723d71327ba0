//! Status lookups and path equivalence.

use std::io;
use std::path::Path;

use crate::report::Outcome;
use crate::{ErrorKind, Platform, Status};

pub(crate) fn status<P: Platform + ?Sized>(platform: &P, path: &Path, follow: bool) -> Outcome<Status> {
    Ok(platform.status(path, follow)?)
}

/// `true` if both paths resolve to the same entry.
///
/// Exactly one path missing is `false`; both missing is `NotFound`.
pub(crate) fn equivalent<P: Platform + ?Sized>(platform: &P, p1: &Path, p2: &Path) -> Outcome<bool> {
    let s1 = probe(platform, p1)?;
    let s2 = probe(platform, p2)?;
    match (s1, s2) {
        (Some(s1), Some(s2)) => Ok(s1.same_entry(&s2)),
        (None, None) => Err(ErrorKind::NotFound.into()),
        _ => Ok(false),
    }
}

fn probe<P: Platform + ?Sized>(platform: &P, path: &Path) -> Outcome<Option<Status>> {
    match platform.status(path, true) {
        Ok(status) => Ok(Some(status)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
