use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::QuoteRepository;
use crate::errors::ServiceError;
use crate::quotes::Quote;

/// JSON array file holding the quote collection.
///
/// A missing file is created as `[]` on first load. Saves go through a
/// temporary sibling file and a rename so readers never see a half-written array.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    file_path: PathBuf,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn create_empty(&self) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::io(parent, e))?;
        }
        fs::write(&self.file_path, b"[]")
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?;
        info!(path = %self.file_path.display(), "created empty quotes file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "quotes.json".to_string());
        self.file_path
            .with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl QuoteRepository for JsonFileRepository {
    async fn load(&self) -> Result<Vec<Quote>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_empty().await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServiceError::io(&self.file_path, e)),
        };
        let quotes: Vec<Quote> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::MalformedData(format!("{}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), count = quotes.len(), "loaded quotes file");
        Ok(quotes)
    }

    async fn save(&self, quotes: &[Quote]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(quotes)
            .map_err(|e| ServiceError::MalformedData(e.to_string()))?;
        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, &data).await {
            return Err(ServiceError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::io(&self.file_path, e));
        }
        debug!(path = %self.file_path.display(), count = quotes.len(), "saved quotes file");
        Ok(())
    }
}
