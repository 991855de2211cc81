pub mod fs_store;

pub use fs_store::FsMockupStore;

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

use crate::errors::StudioError;

/// Object storage for mockup images: upload/delete by path plus public-URL
/// derivation, mirroring what the backing blob service offers.
#[async_trait]
pub trait MockupStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StudioError>;

    async fn delete(&self, path: &str) -> Result<(), StudioError>;

    /// Public URL a stored blob is reachable at.
    fn public_url(&self, path: &str) -> String;

    /// Reverse of [`public_url`](Self::public_url); `None` when the URL was
    /// not issued by this store.
    fn path_from_url(&self, url: &str) -> Option<String>;
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid pattern"))
}

/// Reduce an arbitrary client filename to a storage-safe one.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = unsafe_chars().replace_all(filename, "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Storage path for a new mockup: scoped under the design id, the filename
/// prefixed with the current timestamp so repeated uploads of the same file
/// never collide.
pub fn mockup_path(design_id: &str, filename: &str) -> String {
    format!(
        "{}/{}_{}",
        design_id,
        Utc::now().timestamp(),
        sanitize_filename(filename)
    )
}
