use super::traits::StorageService;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Mount point the router serves `root` under.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Writes uploaded files into a local directory served at [`UPLOADS_ROUTE`].
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub async fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        info!(root = %root.display(), "local upload storage ready");
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            anyhow::bail!("invalid storage key '{}'", key);
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> anyhow::Result<String> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, data).await?;
        debug!(key, content_type, "stored upload");
        Ok(self.get_url(key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_url(&self, key: &str) -> String {
        format!("{}/{}", UPLOADS_ROUTE, key)
    }
}

/// Builds a storage key from an uploaded file name: a unique prefix plus the
/// name reduced to `[A-Za-z0-9._-]`.
pub fn storage_key(original_name: Option<&str>) -> String {
    let cleaned: String = original_name
        .unwrap_or("image")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.is_empty() { "image" } else { cleaned };
    format!("{}-{}", uuid::Uuid::now_v7().simple(), cleaned)
}
