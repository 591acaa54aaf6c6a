//! Session workspaces: ephemeral per-request scratch directories.
//!
//! Every request stages its uploads into a directory nobody else can
//! reach: the name is derived from the relay's pid plus a process-wide
//! monotonically increasing counter, so concurrent requests never
//! collide by construction. The toolchain's interactive cache also
//! lives inside the workspace (see `invoke`), so removing the
//! workspace clears cached state between requests.
//!
//! Layout:
//! ```text
//! {staging_root}/
//! ├── ws-4711-0/
//! │   ├── Main.idr        # uploaded files, relative paths preserved
//! │   ├── lib/Util.idr
//! │   └── cache/          # per-request toolchain cache (HOME override)
//! └── ws-4711-1/
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

/// Factory for per-request workspaces under a common staging root.
#[derive(Debug)]
pub struct SessionStore {
    root: PathBuf,
    counter: AtomicU64,
}

impl SessionStore {
    /// Create a store rooted at `root`. The root itself is created on
    /// first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Allocate a fresh, uniquely-named workspace.
    pub async fn create(&self) -> Result<Session> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let dir = self
            .root
            .join(format!("ws-{}-{}", std::process::id(), n));
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create workspace {}", dir.display()))?;
        debug!(workspace = %dir.display(), "created workspace");
        Ok(Session {
            dir,
            cleaned: false,
        })
    }
}

/// One request's scratch directory. Exclusively owned by the request;
/// removed on every exit path (explicitly via [`Session::cleanup`], or
/// best-effort in `Drop`).
#[derive(Debug)]
pub struct Session {
    dir: PathBuf,
    cleaned: bool,
}

impl Session {
    /// Absolute path of the workspace root.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write one uploaded file under its relative path, creating
    /// intermediate directories as needed. Returns the relative path
    /// written.
    ///
    /// Absolute paths and paths escaping the workspace (`..`) are
    /// rejected; the uploader controls the filename.
    pub async fn stash(&self, relative: &str, contents: &[u8]) -> Result<String> {
        let rel = sanitize(relative)?;
        let target = self.dir.join(&rel);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&target, contents)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        debug!(file = relative, bytes = contents.len(), "staged upload");
        Ok(relative.to_string())
    }

    /// Recursively remove the workspace. Removal failure is logged,
    /// not fatal: the staging root is ephemeral storage anyway.
    pub async fn cleanup(mut self) {
        self.cleaned = true;
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            warn!(workspace = %self.dir.display(), error = %e, "workspace cleanup failed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Early-return paths that never reach cleanup() land here.
        if !self.cleaned {
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                warn!(workspace = %self.dir.display(), error = %e, "workspace cleanup failed");
            }
        }
    }
}

/// Validate an upload's relative path.
fn sanitize(relative: &str) -> Result<PathBuf> {
    let path = Path::new(relative);
    if relative.is_empty() {
        bail!("empty upload filename");
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => {}
            _ => bail!("upload path escapes the workspace: {relative}"),
        }
    }
    Ok(path.to_path_buf())
}
