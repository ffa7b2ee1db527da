use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ResourceKind;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("System call failed: {0}")]
    Sys(#[from] nix::Error),
}

/// Port for reading instantaneous OS metrics
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Utilisation in percent for cpu/memory/disk, a count for processes
    async fn sample(&self, kind: ResourceKind) -> Result<f64, SourceError>;
}
