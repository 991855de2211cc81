use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::MockupStore;
use crate::errors::StudioError;

/// Filesystem-backed mockup store. Blobs live under `root` and are served
/// from `public_base_url` (the server mounts the root directory there).
pub struct FsMockupStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsMockupStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn blob_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl MockupStore for FsMockupStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StudioError> {
        let target = self.blob_path(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        debug!("Stored mockup blob at {}", target.display());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StudioError> {
        tokio::fs::remove_file(self.blob_path(path)).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.public_base_url)
            .map(|rest| rest.trim_start_matches('/').to_string())
            .filter(|rest| !rest.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockupStore;

    #[tokio::test]
    async fn upload_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMockupStore::new(dir.path(), "http://localhost:3000/mockups/");

        store.upload("d1/1_a.png", b"png-bytes").await.unwrap();
        assert!(dir.path().join("d1/1_a.png").exists());

        store.delete("d1/1_a.png").await.unwrap();
        assert!(!dir.path().join("d1/1_a.png").exists());
    }

    #[test]
    fn url_roundtrip() {
        let store = FsMockupStore::new("/tmp/mockups", "http://localhost:3000/mockups");
        let url = store.public_url("d1/1_a.png");
        assert_eq!(url, "http://localhost:3000/mockups/d1/1_a.png");
        assert_eq!(store.path_from_url(&url).as_deref(), Some("d1/1_a.png"));
        assert_eq!(store.path_from_url("https://elsewhere/x.png"), None);
    }
}
