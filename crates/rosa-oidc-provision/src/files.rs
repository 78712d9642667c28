//! Local copies of the generated documents.

use rosa_oidc_core::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Directory the raw and manual flows write their files into.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The process working directory.
    pub fn current() -> Self {
        Self::new(".")
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a document, replacing any previous file with the same name.
    pub async fn save_document(&self, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, contents).await?;
        debug!(path = %path.display(), bytes = contents.len(), "Saved document");
        Ok(path)
    }

    /// Write a private key. On unix the file is created owner-only, and an
    /// existing file is narrowed to owner-only before it is overwritten.
    pub async fn save_private_key(&self, filename: &str, pem: &str) -> Result<PathBuf> {
        let path = self.root.join(filename);
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options.mode(0o600);
            if tokio::fs::try_exists(&path).await? {
                tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).await?;
            }
        }

        let mut file = options.open(&path).await?;
        file.write_all(pem.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %path.display(), "Saved private key");
        Ok(path)
    }
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::current()
    }
}
