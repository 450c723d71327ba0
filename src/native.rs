//! The host operating system as a [`Platform`](crate::Platform).
//!
//! Backed by `std::fs`, with `nix` on unix where `std` cannot express the
//! required follow policy, and `winapi-util` on Windows for file identity.

use std::io;
use std::path::Path;

use crate::{DirEntry, EntrySource, FileType, FsDir, FsLink, FsPermissions, FsRemove, FsStatus};
use crate::{Perms, Status};

/// Whether symlinks have their own permission bits on this build target.
///
/// `true` on macOS/iOS, FreeBSD and NetBSD, where `fchmodat` honours
/// `AT_SYMLINK_NOFOLLOW`. `false` elsewhere, notably on Linux, where a link's
/// mode is fixed at `0o777` and cannot be changed.
pub const SYMLINK_PERMISSIONS: bool = cfg!(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd"
));

/// The host filesystem.
///
/// # Example
///
/// ```rust
/// use fsmeta::{FsOps, Native, PermOptions, Perms};
///
/// let dir = std::env::temp_dir().join("fsmeta-native-doc");
/// std::fs::create_dir_all(&dir).unwrap();
/// let file = dir.join("file");
/// std::fs::write(&file, b"x").unwrap();
///
/// Native.set_permissions(&file, Perms::OWNER_READ | Perms::OWNER_WRITE, PermOptions::REPLACE).unwrap();
/// assert!(Native.hard_link_count(&file).unwrap() >= 1);
///
/// Native.remove_all(&dir).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl FsStatus for Native {
    fn status(&self, path: &Path, follow: bool) -> io::Result<Status> {
        let meta = if follow {
            std::fs::metadata(path)?
        } else {
            std::fs::symlink_metadata(path)?
        };
        sys::status_from(path, &meta, follow)
    }
}

impl FsPermissions for Native {
    fn set_mode(&self, path: &Path, perms: Perms, follow: bool) -> io::Result<()> {
        if follow {
            return sys::chmod(path, perms);
        }
        let meta = std::fs::symlink_metadata(path)?;
        if !meta.file_type().is_symlink() {
            // Nothing to (not) follow.
            return sys::chmod(path, perms);
        }
        sys::lchmod(path, perms)
    }

    fn supports_symlink_permissions(&self) -> bool {
        SYMLINK_PERMISSIONS
    }
}

impl FsLink for Native {
    fn hard_link(&self, existing: &Path, new: &Path) -> io::Result<()> {
        sys::link_following(existing, new)
    }
}

impl FsDir for Native {
    fn read_dir(&self, path: &Path) -> io::Result<EntrySource> {
        let entries = std::fs::read_dir(path)?;
        Ok(EntrySource::new(entries.map(|entry| {
            let entry = entry?;
            Ok(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                file_type: FileType::from(entry.file_type()?),
            })
        })))
    }
}

impl FsRemove for Native {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }
}

#[cfg(unix)]
mod sys {
    use std::io;
    use std::os::unix::fs::{MetadataExt, PermissionsExt};
    use std::path::Path;

    use nix::fcntl::AtFlags;
    use nix::unistd::linkat;

    use crate::{FileType, Perms, Status};

    pub(super) fn status_from(
        _path: &Path,
        meta: &std::fs::Metadata,
        _follow: bool,
    ) -> io::Result<Status> {
        Ok(Status {
            file_type: FileType::from(meta.file_type()),
            permissions: Perms::from_bits(meta.mode()),
            nlink: meta.nlink(),
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }

    pub(super) fn chmod(path: &Path, perms: Perms) -> io::Result<()> {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(perms.bits()))
    }

    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd"
    ))]
    pub(super) fn lchmod(path: &Path, perms: Perms) -> io::Result<()> {
        use nix::libc::mode_t;
        use nix::sys::stat::{FchmodatFlags, Mode, fchmodat};

        fchmodat(
            None,
            path,
            Mode::from_bits_truncate(perms.bits() as mode_t),
            FchmodatFlags::NoFollowSymlink,
        )
        .map_err(io::Error::from)
    }

    #[cfg(not(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd"
    )))]
    pub(super) fn lchmod(_path: &Path, _perms: Perms) -> io::Result<()> {
        Err(nix::errno::Errno::EOPNOTSUPP.into())
    }

    /// `link(2)` semantics: a symlink source is resolved first.
    pub(super) fn link_following(existing: &Path, new: &Path) -> io::Result<()> {
        linkat(None, existing, None, new, AtFlags::AT_SYMLINK_FOLLOW).map_err(io::Error::from)
    }
}

#[cfg(windows)]
mod sys {
    use std::fs::OpenOptions;
    use std::io;
    use std::os::windows::fs::OpenOptionsExt;
    use std::path::Path;

    use winapi_util::Handle;

    use crate::{FileType, Perms, Status};

    // Only the read-only attribute exists; it maps onto every write bit.
    const READONLY: u32 = 0o555;
    const WRITABLE: u32 = 0o777;

    // Needed to open directories; the second keeps a symlink itself open.
    const FILE_FLAG_BACKUP_SEMANTICS: u32 = 0x0200_0000;
    const FILE_FLAG_OPEN_REPARSE_POINT: u32 = 0x0020_0000;

    pub(super) fn status_from(
        path: &Path,
        meta: &std::fs::Metadata,
        follow: bool,
    ) -> io::Result<Status> {
        let bits = if meta.permissions().readonly() {
            READONLY
        } else {
            WRITABLE
        };
        let mut flags = FILE_FLAG_BACKUP_SEMANTICS;
        if !follow {
            flags |= FILE_FLAG_OPEN_REPARSE_POINT;
        }
        let file = OpenOptions::new()
            .access_mode(0)
            .custom_flags(flags)
            .open(path)?;
        let info = winapi_util::file::information(Handle::from_file(file))?;
        Ok(Status {
            file_type: FileType::from(meta.file_type()),
            permissions: Perms::from_bits(bits),
            nlink: info.number_of_links(),
            dev: info.volume_serial_number(),
            ino: info.file_index(),
        })
    }

    pub(super) fn chmod(path: &Path, perms: Perms) -> io::Result<()> {
        let mut permissions = std::fs::metadata(path)?.permissions();
        permissions.set_readonly(!perms.contains(Perms::OWNER_WRITE));
        std::fs::set_permissions(path, permissions)
    }

    pub(super) fn lchmod(_path: &Path, _perms: Perms) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    pub(super) fn link_following(existing: &Path, new: &Path) -> io::Result<()> {
        std::fs::hard_link(existing, new)
    }
}
