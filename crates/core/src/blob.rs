//! Blob storage backend trait and the filesystem implementation.
//!
//! Rendered revision PDFs are opaque binaries; this system only needs to
//! store them under a collision-free name and hand back a durable public
//! URL. The backend is a trait so a hosted object store can be slotted in
//! without touching the revision-save flow.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::DbId;

/// Storage backend for revision binaries.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `name` and return a publicly resolvable URL.
    async fn put(&self, name: &str, bytes: &[u8], content_type: &str)
        -> Result<String, CoreError>;

    /// Return the public URL for an already-stored object.
    fn public_url(&self, name: &str) -> String;
}

/// Build a collision-free object name for a revision binary.
///
/// Incorporates the drawing id, the caller-supplied revision number, a
/// nanosecond timestamp, and a random suffix so two concurrent saves for
/// the same drawing never collide. Not content-addressed on purpose: the
/// same bytes saved twice are two revisions.
pub fn revision_object_name(drawing_id: DbId, revision_number: i32) -> String {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    let suffix = uuid::Uuid::new_v4().simple();
    format!("drawings/{drawing_id}/rev-{revision_number}-{nanos}-{suffix}.pdf")
}

/// Filesystem-backed blob store.
///
/// Objects live under `root` and resolve publicly as
/// `{public_base_url}/{name}`; serving the directory is the deployment's
/// concern (reverse proxy or static-file layer).
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url: String = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    fn object_path(&self, name: &str) -> PathBuf {
        // Object names are generated server-side; reject anything that
        // could escape the root if a caller ever passes one through.
        let relative: PathBuf = Path::new(name)
            .components()
            .filter(|c| matches!(c, std::path::Component::Normal(_)))
            .collect();
        self.root.join(relative)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, CoreError> {
        let path = self.object_path(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Storage(format!("creating {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("writing {}: {e}", path.display())))?;
        Ok(self.public_url(name))
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url, name)
    }
}
