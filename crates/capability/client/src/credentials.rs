//! `authToken` 凭据存储
//!
//! 若存在凭据，则作为 Bearer 令牌随每个请求发送；401 时清除。
//! 尚无登录/刷新流程。

use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;

/// 凭据存储接口。
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> std::io::Result<()>;
    fn clear(&self);
}

/// 内存凭据存储。
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn set_token(&self, token: &str) -> std::io::Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| std::io::Error::other("lock failed"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

/// 文件凭据存储（令牌保存在单个文件中）。
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set_token(&self, token: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, token)
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                target: "batiment.client",
                path = %self.path.display(),
                "failed to clear credential file: {}",
                err
            ),
        }
    }
}
