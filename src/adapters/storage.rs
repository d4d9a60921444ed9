use crate::domain::model::QueuePosition;
use crate::domain::ports::PositionStore;
use crate::utils::error::{ErrorKind, Result, ResultExt, WatchError};
use std::path::{Path, PathBuf};

/// Keeps the last observed position as a bare decimal string in one file.
#[derive(Debug, Clone)]
pub struct FilePositionStore {
    path: PathBuf,
}

impl FilePositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionStore for FilePositionStore {
    async fn load(&self) -> Result<Option<QueuePosition>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No position file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).context(
                    ErrorKind::Store,
                    format!("failed to read position file {}", self.path.display()),
                )
            }
        };

        let raw = content.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        QueuePosition::from_digits(raw)
            .map(Some)
            .ok_or_else(|| WatchError::StoreError {
                message: format!("invalid position file {}: '{}'", self.path.display(), raw),
            })
    }

    async fn save(&self, position: QueuePosition) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.context(
                    ErrorKind::Store,
                    format!("failed to create directory {}", parent.display()),
                )?;
            }
        }

        tokio::fs::write(&self.path, position.to_string())
            .await
            .context(
                ErrorKind::Store,
                format!("failed to write position file {}", self.path.display()),
            )?;
        tracing::debug!("Saved position {} to {}", position, self.path.display());
        Ok(())
    }
}
