use crate::error::FlagError;
use async_trait::async_trait;
use flag_quantize::EncodedFlag;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Receiver of the flag that should currently be shown
#[async_trait]
pub trait FlagSink: Send + Sync {
    /// Make `flag` the active flag
    async fn set_active(&self, flag: &EncodedFlag) -> Result<(), FlagError>;
}

/// Keeps the active flag in a single file, overwritten on every change
pub struct ActiveFlagFile {
    path: PathBuf,
}

impl ActiveFlagFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The currently active flag, if one has been set
    pub async fn current(&self) -> Result<Option<EncodedFlag>, FlagError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content.parse()?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FlagError::Sink(e.to_string())),
        }
    }
}

#[async_trait]
impl FlagSink for ActiveFlagFile {
    async fn set_active(&self, flag: &EncodedFlag) -> Result<(), FlagError> {
        if flag.is_empty() {
            return Err(FlagError::Sink("refusing to set an empty flag".to_string()));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FlagError::Sink(e.to_string()))?;
        }
        tokio::fs::write(&self.path, flag.as_str())
            .await
            .map_err(|e| FlagError::Sink(e.to_string()))?;
        tracing::info!(path = %self.path.display(), tokens = flag.token_count(), "Active flag set");
        Ok(())
    }
}

/// Records every flag it is handed
pub struct InMemorySink {
    history: Arc<RwLock<Vec<EncodedFlag>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Most recent active flag
    pub async fn last(&self) -> Option<EncodedFlag> {
        let history = self.history.read().await;
        history.last().cloned()
    }

    /// Number of times a flag was set
    pub async fn count(&self) -> usize {
        self.history.read().await.len()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlagSink for InMemorySink {
    async fn set_active(&self, flag: &EncodedFlag) -> Result<(), FlagError> {
        let mut history = self.history.write().await;
        history.push(flag.clone());
        Ok(())
    }
}
