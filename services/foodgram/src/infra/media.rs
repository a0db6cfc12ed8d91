use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::ImageStore;
use crate::domain::types::{ImageUpload, MediaFolder};
use crate::error::FoodgramError;

/// Image store writing under a media root directory.
#[derive(Clone)]
pub struct FsImageStore {
    pub root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a media-relative path, refusing anything that could leave the root.
    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        let safe = path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        (safe && !relative.is_empty()).then(|| self.root.join(path))
    }
}

impl ImageStore for FsImageStore {
    async fn save(
        &self,
        folder: MediaFolder,
        image: &ImageUpload,
    ) -> Result<String, FoodgramError> {
        let dir = self.root.join(folder.as_str());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media directory {}", dir.display()))?;
        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .context("write image file")?;
        Ok(format!("{}/{}", folder.as_str(), file_name))
    }

    async fn delete(&self, path: &str) -> Result<(), FoodgramError> {
        let Some(full) = self.resolve(path) else {
            tracing::warn!(path, "refusing to delete media path outside root");
            return Ok(());
        };
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("delete media file {}", full.display()))
                .into()),
        }
    }
}
