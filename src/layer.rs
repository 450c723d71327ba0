//! # Layer Trait
//!
//! Tower-style middleware composition for platforms.
//!
//! ## Overview
//!
//! The [`Layer`] trait wraps a [`Platform`] to add behaviour around its
//! primitives without touching the operations built on top of it.
//!
//! ```text
//! Platform ──▶ Layer::layer() ──▶ Wrapped Platform ──▶ FsOps
//! ```
//!
//! [`TracingLayer`] is the layer shipped with this crate: it records every
//! primitive call as a `tracing` event.
//!
//! ## Example
//!
//! ```rust
//! use fsmeta::{FsOps, LayerExt, Native, TracingLayer};
//! use std::path::Path;
//!
//! let traced = Native.layer(TracingLayer::new());
//! assert_eq!(traced.remove(Path::new("/no/such/fsmeta/entry")).unwrap(), false);
//! ```

use std::io;
use std::path::Path;

use tracing::{Level, event};

use crate::{EntrySource, FsDir, FsLink, FsPermissions, FsRemove, FsStatus, Perms, Platform, Status};

/// A layer that wraps a platform to add functionality.
///
/// Inspired by Tower's `Layer` trait. `layer(self, platform)` consumes both
/// the layer configuration and the platform.
pub trait Layer<B> {
    /// The resulting platform type after applying this layer.
    type Platform;

    /// Wrap the given platform with this layer's functionality.
    fn layer(self, platform: B) -> Self::Platform;
}

/// Extension trait for fluent layer composition.
pub trait LayerExt: Platform + Sized {
    /// Apply a layer to this platform.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Platform {
        layer.layer(self)
    }
}

// Blanket implementation - any Platform gets LayerExt for free
impl<B: Platform> LayerExt for B {}

/// Emits a `tracing` event for every primitive call and its outcome.
#[derive(Debug, Clone, Copy)]
pub struct TracingLayer {
    level: Level,
}

impl TracingLayer {
    /// Trace at `TRACE` level.
    pub fn new() -> Self {
        Self {
            level: Level::TRACE,
        }
    }

    /// Trace at the given level instead.
    pub fn with_level(level: Level) -> Self {
        Self { level }
    }
}

impl Default for TracingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Platform> Layer<B> for TracingLayer {
    type Platform = Traced<B>;

    fn layer(self, platform: B) -> Traced<B> {
        Traced {
            inner: platform,
            level: self.level,
        }
    }
}

/// A platform wrapped by [`TracingLayer`].
#[derive(Debug, Clone)]
pub struct Traced<B> {
    inner: B,
    level: Level,
}

impl<B> Traced<B> {
    /// The wrapped platform.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> B {
        self.inner
    }

    fn record<T>(&self, primitive: &'static str, path: &Path, result: &io::Result<T>) {
        // `event!` needs a constant level, hence the dispatch.
        macro_rules! emit {
            ($lvl:expr) => {
                match result {
                    Ok(_) => event!($lvl, primitive, path = %path.display(), "ok"),
                    Err(e) => event!($lvl, primitive, path = %path.display(), error = %e, "failed"),
                }
            };
        }
        if self.level == Level::ERROR {
            emit!(Level::ERROR)
        } else if self.level == Level::WARN {
            emit!(Level::WARN)
        } else if self.level == Level::INFO {
            emit!(Level::INFO)
        } else if self.level == Level::DEBUG {
            emit!(Level::DEBUG)
        } else {
            emit!(Level::TRACE)
        }
    }
}

impl<B: FsStatus> FsStatus for Traced<B> {
    fn status(&self, path: &Path, follow: bool) -> io::Result<Status> {
        let result = self.inner.status(path, follow);
        self.record(if follow { "stat" } else { "lstat" }, path, &result);
        result
    }
}

impl<B: FsPermissions> FsPermissions for Traced<B> {
    fn set_mode(&self, path: &Path, perms: Perms, follow: bool) -> io::Result<()> {
        let result = self.inner.set_mode(path, perms, follow);
        self.record(if follow { "chmod" } else { "lchmod" }, path, &result);
        result
    }

    fn supports_symlink_permissions(&self) -> bool {
        self.inner.supports_symlink_permissions()
    }
}

impl<B: FsLink> FsLink for Traced<B> {
    fn hard_link(&self, existing: &Path, new: &Path) -> io::Result<()> {
        let result = self.inner.hard_link(existing, new);
        self.record("link", new, &result);
        result
    }
}

impl<B: FsDir> FsDir for Traced<B> {
    fn read_dir(&self, path: &Path) -> io::Result<EntrySource> {
        let result = self.inner.read_dir(path);
        self.record("opendir", path, &result);
        result
    }
}

impl<B: FsRemove> FsRemove for Traced<B> {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let result = self.inner.remove_file(path);
        self.record("unlink", path, &result);
        result
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let result = self.inner.remove_dir(path);
        self.record("rmdir", path, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FsOps, Native};

    #[test]
    fn layer_ext_is_auto_implemented() {
        fn _check<B: Platform + LayerExt>() {}
    }

    #[test]
    fn traced_is_still_a_platform() {
        fn _check<B: Platform>(b: B) -> impl Platform {
            b.layer(TracingLayer::new())
        }
    }

    #[test]
    fn traced_forwards_capability() {
        let traced = Native.layer(TracingLayer::with_level(Level::DEBUG));
        assert_eq!(
            traced.supports_symlink_permissions(),
            Native.supports_symlink_permissions()
        );
    }

    #[test]
    fn traced_forwards_results() {
        let traced = Native.layer(TracingLayer::default());
        let count = traced.remove_all(Path::new("/no/such/fsmeta/tree")).unwrap();
        assert_eq!(count, 0);
        let _native: Native = traced.into_inner();
    }
}
