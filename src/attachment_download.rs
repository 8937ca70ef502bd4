use crate::{error::AttachmentError, types::AttachmentRecord};
use reqwest::Client;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{error, info};
use url::Url;

const DEFAULT_MAX_BYTES: u64 = 25 * 1024 * 1024;

/// Fetches attachments into a local directory and records where they landed.
#[derive(Debug, Clone)]
pub struct AttachmentDownloader {
    client: Client,
    download_dir: PathBuf,
    max_bytes: u64,
}

impl AttachmentDownloader {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            download_dir: download_dir.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Downloads `attachment` and sets its local location on success.
    /// Existing files are never overwritten and the record is left untouched
    /// on failure.
    pub async fn download(&self, attachment: &mut AttachmentRecord) -> Result<PathBuf, AttachmentError> {
        let file_name = Path::new(attachment.file_name())
            .file_name()
            .filter(|name| *name == attachment.file_name())
            .ok_or_else(|| AttachmentError::InvalidFileName(attachment.file_name().to_string()))?
            .to_owned();

        fs::create_dir_all(&self.download_dir).await?;
        let path = fs::canonicalize(&self.download_dir).await?.join(file_name);
        if fs::try_exists(&path).await? {
            return Err(AttachmentError::AlreadyExists(path));
        }

        let mut response = self.client.get(attachment.download_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!(%status, url = attachment.download_url(), "Attachment download failed");
            return Err(AttachmentError::Status(
                status.as_u16(),
                attachment.download_url().to_string(),
            ));
        }
        if response.content_length().is_some_and(|length| length > self.max_bytes) {
            return Err(AttachmentError::TooLarge(self.max_bytes));
        }

        let mut content = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (content.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(AttachmentError::TooLarge(self.max_bytes));
            }
            content.extend_from_slice(&chunk);
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => AttachmentError::AlreadyExists(path.clone()),
                _ => err.into(),
            })?;
        file.write_all(&content).await?;
        file.flush().await?;

        let local_location =
            Url::from_file_path(&path).map_err(|_| AttachmentError::InvalidPath(path.clone()))?;
        info!(
            file_name = attachment.file_name(),
            bytes = content.len(),
            %local_location,
            "Attachment downloaded"
        );
        attachment.set_local_location(local_location);
        Ok(path)
    }
}
