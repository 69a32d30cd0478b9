use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::MediaStorage;
use crate::domain::types::DecodedImage;
use crate::error::RecipesServiceError;

/// Media files on the local filesystem under `root`, addressed by relative paths.
#[derive(Clone)]
pub struct LocalMediaStorage {
    pub root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a stored path, refusing anything that would escape `root`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

impl MediaStorage for LocalMediaStorage {
    async fn save(
        &self,
        folder: &str,
        image: &DecodedImage,
    ) -> Result<String, RecipesServiceError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media dir {}", dir.display()))?;

        let file_name = format!("{}.{}", Uuid::now_v7(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .context("write media file")?;
        Ok(format!("{folder}/{file_name}"))
    }

    async fn delete(&self, path: &str) -> Result<(), RecipesServiceError> {
        let Some(full) = self.resolve(path) else {
            tracing::warn!(path, "refusing to delete media outside root");
            return Ok(());
        };
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove media file {}", full.display()))
                .into()),
        }
    }
}
