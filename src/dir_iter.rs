//! # Directory Iteration
//!
//! [`DirectoryIterator`] is a cursor over the entries of one directory that
//! is either positioned at an entry or at end. [`begin`] and [`end`] adapt it
//! into a range: `begin(it)` is `it` itself, `end(&it)` is the end sentinel,
//! and consuming the iterator reaches a state equal to that sentinel.
//!
//! ```rust
//! use fsmeta::{begin, end, DirectoryIterator};
//!
//! let dir = std::env::temp_dir().join("fsmeta-dir-iter-doc");
//! std::fs::create_dir_all(&dir).unwrap();
//! std::fs::write(dir.join("a"), b"").unwrap();
//!
//! let it = DirectoryIterator::new(&dir).unwrap();
//! let last = end(&it);
//! let mut cursor = begin(it);
//! let mut names = Vec::new();
//! while cursor != last {
//!     names.push(cursor.entry().unwrap().name.clone());
//!     cursor.increment().unwrap();
//! }
//! assert!(names.contains(&"a".to_string()));
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```
//!
//! ## Copies
//!
//! Cloning a positioned iterator yields a second iterator sharing the same
//! underlying cursor. Both start at the same current entry; which later
//! entries each clone observes depends on how they are interleaved. Every
//! entry is still produced by the source at most once.

use std::borrow::Borrow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::report::{Outcome, Site, store};
use crate::{DirEntry, EntrySource, ErrorCode, ErrorKind, FsDir, FsError, Native};

type Cursor = Arc<Mutex<EntrySource>>;

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    End,
    At {
        entry: DirEntry,
        cursor: Cursor,
    },
    // An entry could not be read; yielded once by `next`, then end.
    Failed(FsError),
}

/// Cursor over directory entries.
///
/// `Default` is the end state. Two iterators are equal when both are at end or
/// both are positioned on the same shared cursor.
#[derive(Debug, Clone, Default)]
pub struct DirectoryIterator {
    root: PathBuf,
    state: State,
}

pub(crate) fn open<P: FsDir + ?Sized>(platform: &P, path: &Path) -> Outcome<DirectoryIterator> {
    let source = platform.read_dir(path)?;
    DirectoryIterator::start(path.to_path_buf(), source).map_err(|err| err.code())
}

impl DirectoryIterator {
    /// Open `path` on the host filesystem.
    ///
    /// # Errors
    ///
    /// - `NotFound`: `path` does not exist
    /// - `NotADirectory`: `path` is not a directory
    /// - `PermissionDenied`: `path` cannot be listed
    pub fn new(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref();
        Site::new("directory_iterator", path).raise(open(&Native, path))
    }

    /// Error-code form of [`new`](Self::new). Returns an end iterator on
    /// failure.
    pub fn new_with_code(path: impl AsRef<Path>, ec: &mut ErrorCode) -> Self {
        store(Self::new(path), ec, Self::default())
    }

    /// Iterate an arbitrary entry source. `root` is only used in errors.
    ///
    /// # Errors
    ///
    /// Fails if reading the first entry fails.
    pub fn from_source(root: impl Into<PathBuf>, source: EntrySource) -> Result<Self, FsError> {
        Self::start(root.into(), source)
    }

    fn start(root: PathBuf, source: EntrySource) -> Result<Self, FsError> {
        let cursor = Arc::new(Mutex::new(source));
        let state = advance(&root, cursor);
        if let State::Failed(err) = state {
            return Err(err);
        }
        Ok(Self { root, state })
    }

    /// `true` once the iterator is exhausted.
    pub fn is_end(&self) -> bool {
        matches!(self.state, State::End)
    }

    /// The current entry; `None` at end.
    pub fn entry(&self) -> Option<&DirEntry> {
        match &self.state {
            State::At { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Directory being iterated (empty for a default iterator).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Move to the next entry.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: already at end
    /// - the platform's error if the next entry cannot be read; the iterator
    ///   is at end afterwards
    pub fn increment(&mut self) -> Result<(), FsError> {
        match std::mem::take(&mut self.state) {
            State::End => Err(FsError::new(
                "directory_iterator::increment",
                ErrorKind::InvalidArgument.into(),
                &self.root,
                "",
            )),
            State::Failed(err) => Err(err),
            State::At { cursor, .. } => match advance(&self.root, cursor) {
                State::Failed(err) => Err(err),
                next => {
                    self.state = next;
                    Ok(())
                }
            },
        }
    }

    /// Error-code form of [`increment`](Self::increment).
    pub fn increment_with_code(&mut self, ec: &mut ErrorCode) {
        store(self.increment(), ec, ())
    }
}

fn advance(root: &Path, cursor: Cursor) -> State {
    let next = cursor
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .next();
    match next {
        None => State::End,
        Some(Ok(entry)) => State::At { entry, cursor },
        Some(Err(e)) => State::Failed(FsError::new(
            "directory_iterator::increment",
            ErrorCode::from(e),
            root,
            "",
        )),
    }
}

impl PartialEq for DirectoryIterator {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (State::End, State::End) => true,
            (State::At { cursor: a, .. }, State::At { cursor: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Iterator for DirectoryIterator {
    type Item = Result<DirEntry, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::take(&mut self.state) {
            State::End => None,
            State::Failed(err) => Some(Err(err)),
            State::At { entry, cursor } => {
                self.state = advance(&self.root, cursor);
                Some(Ok(entry))
            }
        }
    }
}

impl std::iter::FusedIterator for DirectoryIterator {}

impl From<&DirectoryIterator> for DirectoryIterator {
    fn from(it: &DirectoryIterator) -> Self {
        it.clone()
    }
}

/// Start of the range: `it` at its current position. Accepts an owned
/// iterator or a reference (which is cloned). Never fails and never rescans.
pub fn begin(it: impl Into<DirectoryIterator>) -> DirectoryIterator {
    it.into()
}

/// End of the range: the end sentinel, independent of `it`'s position.
pub fn end(_it: impl Borrow<DirectoryIterator>) -> DirectoryIterator {
    DirectoryIterator::default()
}
