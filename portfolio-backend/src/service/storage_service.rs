// src/service/storage_service.rs

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::utils::error_helper::{bad_request_error, internal_server_error};

/// 一括削除の結果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<String>,
}

impl RemovalReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// メディアファイルストレージのトレイト定義
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// ファイルの存在確認
    async fn exists(&self, path: &str) -> bool;

    /// 存在すれば削除し、削除したかどうかを返す
    async fn remove_if_exists(&self, path: &str) -> AppResult<bool>;

    /// 複数パスを削除する。失敗しても残りの削除は続行する
    async fn remove_all(&self, paths: &[String]) -> RemovalReport {
        let mut report = RemovalReport::default();

        for path in paths {
            match self.remove_if_exists(path).await {
                Ok(true) => report.removed.push(path.clone()),
                Ok(false) => report.missing.push(path.clone()),
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to remove media file");
                    report.failed.push(path.clone());
                }
            }
        }

        report
    }
}

/// `MEDIA_ROOT` 配下のローカルファイルシステム実装
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 保存パスを実ファイルパスへ解決する
    ///
    /// 相対パスはルートからの相対として扱い、`..` を含むパスやルート外の
    /// 絶対パスは拒否する。
    pub fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(bad_request_error(
                "Media path must not be empty",
                "LocalMediaStorage::resolve",
            ));
        }

        let candidate = Path::new(trimmed);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(bad_request_error(
                "Media path must not contain '..'",
                "LocalMediaStorage::resolve",
            ));
        }

        if candidate.is_absolute() {
            if candidate.starts_with(&self.root) {
                return Ok(candidate.to_path_buf());
            }
            return Err(bad_request_error(
                "Media path is outside of the media root",
                "LocalMediaStorage::resolve",
            ));
        }

        Ok(self.root.join(candidate))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(full) => tokio::fs::try_exists(&full).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn remove_if_exists(&self, path: &str) -> AppResult<bool> {
        let full = self.resolve(path)?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                debug!(path = %full.display(), "Media file removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(internal_server_error(
                e,
                "LocalMediaStorage::remove_if_exists",
                "Failed to remove media file",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_remove_if_exists() {
        let dir = tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());
        tokio::fs::write(dir.path().join("clip.mp4"), b"data")
            .await
            .unwrap();

        assert!(storage.exists("clip.mp4").await);
        assert!(storage.remove_if_exists("clip.mp4").await.unwrap());
        assert!(!storage.exists("clip.mp4").await);
        assert!(!storage.remove_if_exists("clip.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_absolute_path_inside_root() {
        let dir = tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());
        let file = dir.path().join("thumb.png");
        tokio::fs::write(&file, b"png").await.unwrap();

        let absolute = file.to_string_lossy().to_string();
        assert!(storage.remove_if_exists(&absolute).await.unwrap());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_rejects_paths_escaping_root() {
        let dir = tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path().join("media"));

        assert!(storage.remove_if_exists("../secret.txt").await.is_err());
        assert!(storage.remove_if_exists("/etc/hosts").await.is_err());
        assert!(storage.remove_if_exists("   ").await.is_err());
        assert!(!storage.exists("../secret.txt").await);
    }

    #[tokio::test]
    async fn test_remove_all_continues_after_failures() {
        let dir = tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());
        tokio::fs::write(dir.path().join("a.jpg"), b"a").await.unwrap();
        tokio::fs::write(dir.path().join("b.jpg"), b"b").await.unwrap();

        let paths = vec![
            "a.jpg".to_string(),
            "../escape.jpg".to_string(),
            "missing.jpg".to_string(),
            "b.jpg".to_string(),
        ];
        let report = storage.remove_all(&paths).await;

        assert_eq!(report.removed, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(report.missing, vec!["missing.jpg".to_string()]);
        assert_eq!(report.failed, vec!["../escape.jpg".to_string()]);
        assert!(!report.is_clean());
    }
}
