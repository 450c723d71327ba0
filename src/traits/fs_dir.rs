//! Directory entry enumeration.

use std::io;
use std::path::Path;

use crate::DirEntry;

/// Enumerates the entries of a directory.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// Open `path` for enumeration.
    ///
    /// The outer `Result` indicates whether the directory could be opened;
    /// each item's `Result` indicates whether that entry could be read.
    /// `.` and `..` must not be yielded.
    fn read_dir(&self, path: &Path) -> io::Result<EntrySource>;
}

/// Entry source yielded by [`FsDir::read_dir`].
///
/// Wraps a boxed iterator so any platform can supply entries one at a time.
/// Order is whatever the platform produces.
///
/// # Example
///
/// ```rust
/// use fsmeta::{DirEntry, EntrySource, FileType};
/// use std::path::PathBuf;
///
/// let source = EntrySource::from_vec(vec![Ok(DirEntry {
///     name: "a".into(),
///     path: PathBuf::from("/d/a"),
///     file_type: FileType::File,
/// })]);
/// assert_eq!(source.count(), 1);
/// ```
pub struct EntrySource(Box<dyn Iterator<Item = io::Result<DirEntry>> + Send + 'static>);

impl EntrySource {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = io::Result<DirEntry>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector.
    pub fn from_vec(entries: Vec<io::Result<DirEntry>>) -> Self {
        Self(Box::new(entries.into_iter()))
    }

    /// A source with no entries.
    pub fn empty() -> Self {
        Self(Box::new(std::iter::empty()))
    }
}

impl Iterator for EntrySource {
    type Item = io::Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl std::fmt::Debug for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrySource").finish_non_exhaustive()
    }
}
