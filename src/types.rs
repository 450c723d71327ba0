//! Value types: permission bits, permission options, and entry status.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::path::PathBuf;

use crate::{ErrorCode, ErrorKind};

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Status could not be determined.
    #[default]
    Unknown,
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Block/character device, FIFO, or socket.
    Other,
}

impl From<std::fs::FileType> for FileType {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_dir() {
            FileType::Directory
        } else if ft.is_file() {
            FileType::File
        } else {
            FileType::Other
        }
    }
}

/// POSIX-style permission bits: owner/group/others × read/write/execute,
/// plus set-uid, set-gid and sticky.
///
/// [`Perms::UNKNOWN`] is a sentinel outside [`Perms::MASK`] meaning "no
/// permission information".
///
/// # Examples
///
/// ```rust
/// use fsmeta::Perms;
///
/// let p = Perms::OWNER_ALL | Perms::GROUP_READ;
/// assert_eq!(p.bits(), 0o740);
/// assert_eq!((p & !Perms::OWNER_WRITE).bits(), 0o540);
/// assert_eq!(p.to_string(), "rwxr-----");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32"))]
pub struct Perms(u32);

impl Perms {
    /// No permission bits.
    pub const NONE: Self = Self(0);

    /// `S_IRUSR`.
    pub const OWNER_READ: Self = Self(0o400);
    /// `S_IWUSR`.
    pub const OWNER_WRITE: Self = Self(0o200);
    /// `S_IXUSR`.
    pub const OWNER_EXEC: Self = Self(0o100);
    /// `S_IRWXU`.
    pub const OWNER_ALL: Self = Self(0o700);

    /// `S_IRGRP`.
    pub const GROUP_READ: Self = Self(0o040);
    /// `S_IWGRP`.
    pub const GROUP_WRITE: Self = Self(0o020);
    /// `S_IXGRP`.
    pub const GROUP_EXEC: Self = Self(0o010);
    /// `S_IRWXG`.
    pub const GROUP_ALL: Self = Self(0o070);

    /// `S_IROTH`.
    pub const OTHERS_READ: Self = Self(0o004);
    /// `S_IWOTH`.
    pub const OTHERS_WRITE: Self = Self(0o002);
    /// `S_IXOTH`.
    pub const OTHERS_EXEC: Self = Self(0o001);
    /// `S_IRWXO`.
    pub const OTHERS_ALL: Self = Self(0o007);

    /// All read/write/execute bits.
    pub const ALL: Self = Self(0o777);
    /// `S_ISUID`.
    pub const SET_UID: Self = Self(0o4000);
    /// `S_ISGID`.
    pub const SET_GID: Self = Self(0o2000);
    /// `S_ISVTX`.
    pub const STICKY_BIT: Self = Self(0o1000);
    /// Every meaningful bit.
    pub const MASK: Self = Self(0o7777);

    /// Permissions are not known.
    pub const UNKNOWN: Self = Self(0xFFFF);

    /// Build from a raw mode. File-type bits are discarded; [`Perms::UNKNOWN`]
    /// is preserved as-is.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        if bits == Self::UNKNOWN.0 {
            Self::UNKNOWN
        } else {
            Self(bits & Self::MASK.0)
        }
    }

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` for the [`Perms::UNKNOWN`] sentinel.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }

    /// `true` if every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if no write bit is set.
    #[inline]
    pub const fn readonly(self) -> bool {
        self.0 & 0o222 == 0
    }
}

impl From<u32> for Perms {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl BitOr for Perms {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Perms {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for Perms {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

/// Complement within [`Perms::MASK`].
impl Not for Perms {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::MASK.0)
    }
}

impl BitOrAssign for Perms {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for Perms {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXorAssign for Perms {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("unknown");
        }
        const SYMBOLS: [(u32, char); 9] = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];
        for (bit, symbol) in SYMBOLS {
            let c = if self.0 & bit != 0 { symbol } else { '-' };
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl fmt::Octal for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

/// How requested permissions combine with the current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PermMode {
    /// New permissions are exactly the requested ones.
    #[default]
    Replace,
    /// New permissions are `current | requested`.
    Add,
    /// New permissions are `current & !requested`.
    Remove,
}

/// Options for [`set_permissions`](crate::FsOps::set_permissions): exactly one
/// [`PermMode`] plus an optional no-follow modifier.
///
/// # Examples
///
/// ```rust
/// use fsmeta::{PermMode, PermOptions};
///
/// let opts = PermOptions::ADD.nofollow();
/// assert_eq!(opts.mode(), PermMode::Add);
/// assert!(opts.is_nofollow());
///
/// // Two base modes at once are rejected.
/// assert!(PermOptions::from_bits(PermOptions::ADD_BIT | PermOptions::REMOVE_BIT).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermOptions {
    mode: PermMode,
    nofollow: bool,
}

impl PermOptions {
    /// Bit for [`PermMode::Replace`] in the raw encoding.
    pub const REPLACE_BIT: u8 = 0x1;
    /// Bit for [`PermMode::Add`] in the raw encoding.
    pub const ADD_BIT: u8 = 0x2;
    /// Bit for [`PermMode::Remove`] in the raw encoding.
    pub const REMOVE_BIT: u8 = 0x4;
    /// No-follow modifier in the raw encoding.
    pub const NOFOLLOW_BIT: u8 = 0x8;

    /// Replace, following symlinks.
    pub const REPLACE: Self = Self::new(PermMode::Replace);
    /// Add, following symlinks.
    pub const ADD: Self = Self::new(PermMode::Add);
    /// Remove, following symlinks.
    pub const REMOVE: Self = Self::new(PermMode::Remove);

    /// Options with the given base mode, following symlinks.
    pub const fn new(mode: PermMode) -> Self {
        Self {
            mode,
            nofollow: false,
        }
    }

    /// Same base mode, but act on a symlink itself instead of its target.
    pub const fn nofollow(self) -> Self {
        Self {
            mode: self.mode,
            nofollow: true,
        }
    }

    /// The base mode.
    pub const fn mode(&self) -> PermMode {
        self.mode
    }

    /// `true` when symlinks are not followed.
    pub const fn is_nofollow(&self) -> bool {
        self.nofollow
    }

    /// Decode the raw bit encoding. Exactly one base bit must be set and no
    /// unknown bits may be present.
    pub fn from_bits(bits: u8) -> Result<Self, ErrorCode> {
        const BASE: u8 = PermOptions::REPLACE_BIT | PermOptions::ADD_BIT | PermOptions::REMOVE_BIT;
        if bits & !(BASE | Self::NOFOLLOW_BIT) != 0 {
            return Err(ErrorKind::InvalidArgument.into());
        }
        let mode = match bits & BASE {
            Self::REPLACE_BIT => PermMode::Replace,
            Self::ADD_BIT => PermMode::Add,
            Self::REMOVE_BIT => PermMode::Remove,
            _ => return Err(ErrorKind::InvalidArgument.into()),
        };
        Ok(Self {
            mode,
            nofollow: bits & Self::NOFOLLOW_BIT != 0,
        })
    }

    /// The raw bit encoding.
    pub const fn bits(&self) -> u8 {
        let base = match self.mode {
            PermMode::Replace => Self::REPLACE_BIT,
            PermMode::Add => Self::ADD_BIT,
            PermMode::Remove => Self::REMOVE_BIT,
        };
        if self.nofollow {
            base | Self::NOFOLLOW_BIT
        } else {
            base
        }
    }
}

/// Status of a filesystem entry as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// Type of the entry.
    pub file_type: FileType,
    /// Permission bits.
    pub permissions: Perms,
    /// Number of hard links.
    pub nlink: u64,
    /// Device the entry lives on.
    pub dev: u64,
    /// Inode number (unique within `dev`).
    pub ino: u64,
}

impl Status {
    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Returns `true` if this is a symbolic link.
    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }

    /// Returns `true` if both statuses describe the same underlying entry.
    #[inline]
    pub fn same_entry(&self, other: &Status) -> bool {
        self.file_type != FileType::Unknown && self.dev == other.dev && self.ino == other.ino
    }
}

impl Default for Status {
    fn default() -> Self {
        Self {
            file_type: FileType::Unknown,
            permissions: Perms::UNKNOWN,
            nlink: 0,
            dev: 0,
            ino: 0,
        }
    }
}

/// A directory entry yielded during iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirEntry {
    /// Name of the entry (filename only, not full path).
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
    /// Type of the entry, without following symlinks.
    pub file_type: FileType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perms_group_constants_compose() {
        assert_eq!(
            Perms::OWNER_READ | Perms::OWNER_WRITE | Perms::OWNER_EXEC,
            Perms::OWNER_ALL
        );
        assert_eq!(Perms::OWNER_ALL | Perms::GROUP_ALL | Perms::OTHERS_ALL, Perms::ALL);
        assert_eq!(
            Perms::ALL | Perms::SET_UID | Perms::SET_GID | Perms::STICKY_BIT,
            Perms::MASK
        );
    }

    #[test]
    fn perms_from_bits_masks_file_type() {
        assert_eq!(Perms::from_bits(0o100755).bits(), 0o755);
        assert!(Perms::from_bits(0xFFFF).is_unknown());
    }

    #[test]
    fn perms_complement_stays_in_mask() {
        assert_eq!((!Perms::NONE), Perms::MASK);
        assert_eq!((!Perms::GROUP_ALL).bits(), 0o7707);
    }

    #[test]
    fn perms_add_then_remove_restores() {
        let start = Perms::OWNER_ALL | Perms::OTHERS_READ;
        let q = Perms::GROUP_ALL | Perms::OTHERS_READ;
        let added = start | q;
        // Bits in `q` that were already present are lost by remove; this is
        // the same read-modify-write the operation performs.
        assert_eq!(added & !q, start & !q);

        let disjoint = Perms::GROUP_WRITE;
        assert_eq!((start | disjoint) & !disjoint, start);
    }

    #[test]
    fn perms_assign_ops() {
        let mut p = Perms::OWNER_READ;
        p |= Perms::OWNER_WRITE;
        assert_eq!(p.bits(), 0o600);
        p &= Perms::OWNER_WRITE;
        assert_eq!(p, Perms::OWNER_WRITE);
        p ^= Perms::OWNER_WRITE;
        assert_eq!(p, Perms::NONE);
    }

    #[test]
    fn perms_display() {
        assert_eq!(Perms::NONE.to_string(), "---------");
        assert_eq!(Perms::from_bits(0o755).to_string(), "rwxr-xr-x");
        assert_eq!(Perms::UNKNOWN.to_string(), "unknown");
        assert_eq!(format!("{:o}", Perms::from_bits(0o640)), "640");
    }

    #[test]
    fn perms_readonly() {
        assert!(Perms::from_bits(0o444).readonly());
        assert!(!Perms::from_bits(0o644).readonly());
    }

    #[test]
    fn perm_options_bits_round_trip() {
        for opts in [PermOptions::REPLACE, PermOptions::ADD, PermOptions::REMOVE] {
            assert_eq!(PermOptions::from_bits(opts.bits()), Ok(opts));
            assert_eq!(
                PermOptions::from_bits(opts.nofollow().bits()),
                Ok(opts.nofollow())
            );
        }
    }

    #[test]
    fn perm_options_reject_bad_base_modes() {
        let invalid = [
            0,
            PermOptions::NOFOLLOW_BIT,
            PermOptions::REPLACE_BIT | PermOptions::ADD_BIT,
            PermOptions::ADD_BIT | PermOptions::REMOVE_BIT | PermOptions::NOFOLLOW_BIT,
            0x10 | PermOptions::REPLACE_BIT,
        ];
        for bits in invalid {
            let err = PermOptions::from_bits(bits).unwrap_err();
            assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument), "bits {bits:#x}");
        }
    }

    #[test]
    fn perm_options_default_is_replace() {
        let opts = PermOptions::default();
        assert_eq!(opts.mode(), PermMode::Replace);
        assert!(!opts.is_nofollow());
    }

    #[test]
    fn status_default_is_unknown() {
        let s = Status::default();
        assert_eq!(s.file_type, FileType::Unknown);
        assert!(s.permissions.is_unknown());
        assert!(!s.same_entry(&Status::default()));
    }

    #[test]
    fn status_same_entry_compares_identity() {
        let a = Status {
            file_type: FileType::File,
            permissions: Perms::from_bits(0o644),
            nlink: 2,
            dev: 7,
            ino: 42,
        };
        let b = Status {
            permissions: Perms::NONE,
            ..a
        };
        let c = Status { ino: 43, ..a };
        assert!(a.same_entry(&b));
        assert!(!a.same_entry(&c));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_shapes() {
        assert_eq!(serde_json::to_string(&Perms::from_bits(0o640)).unwrap(), "416");
        let opts = PermOptions::ADD.nofollow();
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"mode":"Add","nofollow":true}"#);
        assert_eq!(serde_json::from_str::<PermOptions>(&json).unwrap(), opts);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_perms_drop_file_type_bits() {
        // 0o100644: a regular file's st_mode.
        let p: Perms = serde_json::from_str("33188").unwrap();
        assert_eq!(p.bits(), 0o644);
        let unknown: Perms = serde_json::from_str("65535").unwrap();
        assert!(unknown.is_unknown());
    }

    #[test]
    fn from_u32_masks_like_from_bits() {
        assert_eq!(Perms::from(0o100755), Perms::from_bits(0o755));
        assert_eq!(Perms::from(0o4755).bits(), 0o4755);
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileType>();
        assert_send_sync::<Perms>();
        assert_send_sync::<PermOptions>();
        assert_send_sync::<Status>();
        assert_send_sync::<DirEntry>();
    }
}
