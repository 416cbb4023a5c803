//! HTTP client for the wiki's Cargo API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::query::{decode_rows, CargoQuery, SkillRow, UnitType};
use super::retry::{with_retry, RetryConfig};
use super::CargoSource;
use crate::config::Config;
use crate::error::{Error, Result};

/// Cargo API client backed by reqwest
pub struct CargoClient {
    http_client: Client,
    api_url: String,
    retry: RetryConfig,
}

impl CargoClient {
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self> {
        let api_url = api_url.into();
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(&api_url, e))?;

        Ok(Self {
            http_client,
            api_url,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            &config.user_agent,
            config.request_timeout(),
            config.retry_config(),
        )
    }

    /// Run one query, retrying transport failures
    async fn fetch<T: DeserializeOwned>(&self, query: &CargoQuery, label: &str) -> Result<Vec<T>> {
        let url = query.to_url(&self.api_url)?;
        with_retry(&self.retry, label, || self.fetch_once(url.clone(), label)).await
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: url::Url, label: &str) -> Result<Vec<T>> {
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(url.as_str(), format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        decode_rows(&body, label)
    }
}

#[async_trait]
impl CargoSource for CargoClient {
    async fn skill_page(&self, offset: usize) -> Result<Vec<SkillRow>> {
        let label = format!("skill page at offset {}", offset);
        self.fetch(&CargoQuery::skill_page(offset), &label).await
    }

    async fn unit_types(&self, display_name: &str) -> Result<Vec<UnitType>> {
        let label = format!("unit {}", display_name);
        self.fetch(&CargoQuery::unit_type(display_name), &label)
            .await
    }
}
