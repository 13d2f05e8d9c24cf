use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::fs;

/// Filesystem storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write beside the target and rename so readers never see half a document.
        let mut staging = full_path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, data).await?;
        if let Err(e) = fs::rename(&staging, &full_path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("nested/data.json", b"[]").await.unwrap();
        let data = storage.read_file("nested/data.json").await.unwrap();

        assert_eq!(data, b"[]");
        assert!(!dir.path().join("nested/data.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_staging_file() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("reservations.json");
        std::fs::create_dir_all(blocked.join("occupied")).unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.write_file("reservations.json", b"[]").await.is_err());
        assert!(!dir.path().join("reservations.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.read_file("missing.json").await.is_err());
    }
}
