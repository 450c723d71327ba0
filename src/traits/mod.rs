//! # Platform Traits
//!
//! The collaborator primitives every operation in this crate is built on.
//!
//! ## Components
//!
//! | Trait | Primitive |
//! |-------|-----------|
//! | [`FsStatus`] | read type, permissions, link count and identity (follow or not) |
//! | [`FsPermissions`] | write permission bits (follow or not) + symlink capability |
//! | [`FsLink`] | create a hard link |
//! | [`FsDir`] | enumerate directory entries one at a time |
//! | [`FsRemove`] | remove a single file, symlink or empty directory |
//!
//! ## Blanket Implementation
//!
//! [`Platform`] has a blanket implementation. Implement the component traits
//! and every operation of [`FsOps`](crate::FsOps) becomes available:
//!
//! ```rust
//! use fsmeta::{EntrySource, FsDir, FsLink, FsOps, FsPermissions, FsRemove, FsStatus, Perms, Status};
//! use std::io;
//! use std::path::Path;
//!
//! struct Nothing;
//!
//! # impl FsStatus for Nothing {
//! #     fn status(&self, _: &Path, _: bool) -> io::Result<Status> { Err(io::ErrorKind::NotFound.into()) }
//! # }
//! # impl FsPermissions for Nothing {
//! #     fn set_mode(&self, _: &Path, _: Perms, _: bool) -> io::Result<()> { Ok(()) }
//! #     fn supports_symlink_permissions(&self) -> bool { false }
//! # }
//! # impl FsLink for Nothing {
//! #     fn hard_link(&self, _: &Path, _: &Path) -> io::Result<()> { Ok(()) }
//! # }
//! # impl FsDir for Nothing {
//! #     fn read_dir(&self, _: &Path) -> io::Result<EntrySource> { Ok(EntrySource::empty()) }
//! # }
//! # impl FsRemove for Nothing {
//! #     fn remove_file(&self, _: &Path) -> io::Result<()> { Ok(()) }
//! #     fn remove_dir(&self, _: &Path) -> io::Result<()> { Ok(()) }
//! # }
//! // Nothing now implements Platform, and therefore FsOps.
//! assert_eq!(Nothing.remove(Path::new("/gone")).unwrap(), false);
//! ```
//!
//! ## Error Boundary
//!
//! Primitives report raw `std::io::Error`s. Mapping to
//! [`ErrorCode`](crate::ErrorCode) and attaching paths happens in the
//! operations, never here.

mod fs_dir;
mod fs_link;
mod fs_permissions;
mod fs_remove;
mod fs_status;

pub use fs_dir::{EntrySource, FsDir};
pub use fs_link::FsLink;
pub use fs_permissions::FsPermissions;
pub use fs_remove::FsRemove;
pub use fs_status::FsStatus;

/// Everything the operations need from the operating system.
///
/// # Blanket Implementation
///
/// Automatically implemented for any type implementing all component traits.
pub trait Platform: FsStatus + FsPermissions + FsLink + FsDir + FsRemove {}

// Blanket implementation
impl<T: FsStatus + FsPermissions + FsLink + FsDir + FsRemove> Platform for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_is_object_safe() {
        fn _check(_: &dyn Platform) {}
    }
}
