// src/source.rs
//! Fetch seam: where advice records come from.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::WidgetConfig;
use crate::slip::{parse_slip, AdviceRecord};

/// Everything that can go wrong between "request issued" and "record decoded".
/// All variants collapse into a single "fetch failed" outcome at the widget boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("advice request could not complete: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Network response was not ok (status {0})")]
    Status(StatusCode),
    #[error("advice payload did not match the slip schema: {0}")]
    Parse(#[source] serde_json::Error),
}

impl FetchError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Transport(err.into())
    }

    /// Short label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Parse(_) => "parse",
        }
    }
}

#[async_trait]
pub trait AdviceSource: Send + Sync {
    async fn fetch_advice(&self) -> Result<AdviceRecord, FetchError>;
    fn name(&self) -> &'static str;
}

/// Convenient alias used by the widget and the router.
pub type DynAdviceSource = Arc<dyn AdviceSource>;

/// Real source: one `GET` against the advice slip API (or whatever `endpoint` points to).
pub struct AdviceSlipClient {
    http: Client,
    endpoint: String,
}

impl AdviceSlipClient {
    pub fn from_config(cfg: &WidgetConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(secs) = cfg.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("building advice http client")?;
        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdviceSource for AdviceSlipClient {
    async fn fetch_advice(&self) -> Result<AdviceRecord, FetchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.text().await.map_err(FetchError::transport)?;
        parse_slip(&body)
    }

    fn name(&self) -> &'static str {
        "adviceslip"
    }
}
