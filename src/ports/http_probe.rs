use async_trait::async_trait;

use crate::domain::{HttpReply, TransportError};

/// Port for issuing a single GET against an endpoint
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Perform exactly one request, bounded by the probe's timeout
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;
}
