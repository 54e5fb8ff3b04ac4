use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use tokio::{fs, io::AsyncWriteExt};

use super::naming::upload_filename;

const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Clone, Debug)]
pub struct UploadStorage {
    base_dir: PathBuf,
    url_prefix: String,
}

#[derive(Clone, Debug)]
pub struct StoredUpload {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
}

impl UploadStorage {
    pub fn new(base_dir: PathBuf, url_prefix: impl Into<String>) -> Self {
        Self {
            base_dir,
            url_prefix: url_prefix.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    pub async fn get(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let path = self.resolve_path(filename);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes `data` under a fresh timestamp-derived name. An existing file is
    /// never replaced: on collision the timestamp moves forward one microsecond.
    pub async fn create_upload(&self, data: &[u8], at: NaiveDateTime) -> Result<StoredUpload> {
        fs::create_dir_all(&self.base_dir).await?;
        let mut at = at;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = upload_filename(at);
            let path = self.resolve_path(&filename);
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(%filename, "upload name taken, advancing timestamp");
                    at += chrono::Duration::microseconds(1);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            file.write_all(data).await?;
            file.flush().await?;
            return Ok(StoredUpload {
                filename,
                path,
                size: data.len() as u64,
            });
        }
        Err(anyhow!("could not allocate a unique upload filename"))
    }

    pub async fn size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    pub fn public_url(&self, filename: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        let filename = filename.trim_start_matches('/');
        format!("{prefix}/{filename}")
    }

    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(Path::new(filename.trim_start_matches('/')))
    }
}
