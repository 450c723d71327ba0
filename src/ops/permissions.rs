//! Permission mutation with replace/add/remove and follow/no-follow.

use std::path::Path;

use tracing::debug;

use crate::report::Outcome;
use crate::{ErrorKind, PermMode, PermOptions, Perms, Platform};

/// Apply `perms` to `path` according to `opts`.
///
/// Add and remove read the current bits and write the result back in two
/// separate calls. A concurrent change to the same entry between the two can
/// be lost; nothing here detects it.
pub(crate) fn apply<P: Platform + ?Sized>(
    platform: &P,
    path: &Path,
    perms: Perms,
    opts: PermOptions,
) -> Outcome<()> {
    if perms.is_unknown() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let follow = !opts.is_nofollow();

    let target = platform.status(path, follow)?;
    // Only reachable with no-follow: a followed status never reports a link.
    if target.is_symlink() && !platform.supports_symlink_permissions() {
        return Err(ErrorKind::NotSupported.into());
    }

    let next = match opts.mode() {
        PermMode::Replace => perms & Perms::MASK,
        PermMode::Add => target.permissions | perms,
        PermMode::Remove => target.permissions & !perms,
    };
    debug!(
        path = %path.display(),
        from = %target.permissions,
        to = %next,
        follow,
        "setting permissions"
    );
    platform.set_mode(path, next, follow)?;
    Ok(())
}
