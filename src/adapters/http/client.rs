use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{HttpReply, TransportError};
use crate::ports::HttpProbe;

/// Endpoint probe backed by a shared reqwest client
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("healthmon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Flatten the error and its sources into one line
    fn describe(err: &reqwest::Error) -> String {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        description
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        let description = Self::describe(&err);
        if err.is_timeout() {
            TransportError::Timeout(description)
        } else if err.is_connect() {
            TransportError::Connect(description)
        } else {
            TransportError::Request(description)
        }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let response = self.client.get(url).send().await.map_err(Self::map_error)?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "endpoint responded");

        Ok(HttpReply::new(
            status.as_u16(),
            status.canonical_reason().map(str::to_string),
        ))
    }
}
