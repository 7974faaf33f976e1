//! SendGrid template provider
//!
//! Implements `TemplateProvider` on top of the SendGrid v3 templates API
//! (`/templates`, `/templates/{id}/versions`) using reqwest.

use crate::domain::entities::{CreateTemplate, CreateTemplateVersion, Template, TemplateVersion};
use crate::domain::ports::template_provider::{
    require_non_blank, ProviderError, ProviderResult, TemplateProvider, TemplateProviderFactory,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Public SendGrid API root
pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com/v3";

/// Longest response body kept in a status error
const MAX_ERROR_BODY_CHARS: usize = 500;

/// SendGrid client bound to one API key
pub struct SendGridTemplateProvider {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl SendGridTemplateProvider {
    pub fn new(http_client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and decode a successful JSON response.
    ///
    /// Every await races against `cancel`, so a cancelled request stops
    /// waiting on the network immediately.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> ProviderResult<T> {
        let request = request
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled { operation }),
            response = request.send() => response.map_err(|e| ProviderError::Transport {
                operation,
                source: Box::new(e),
            })?,
        };

        let status = response.status();

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled { operation }),
            body = response.bytes() => body.map_err(|e| ProviderError::Transport {
                operation,
                source: Box::new(e),
            })?,
        };

        if !status.is_success() {
            let text: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();

            tracing::debug!(
                "SendGrid {} returned status {}: {}",
                operation,
                status.as_u16(),
                text
            );

            return Err(ProviderError::Status {
                operation,
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_slice(&body).map_err(|source| ProviderError::Decode { operation, source })
    }
}

#[async_trait]
impl TemplateProvider for SendGridTemplateProvider {
    async fn get_template(
        &self,
        template_id: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Template> {
        require_non_blank("template_id", template_id)?;

        let request = self
            .http_client
            .get(self.url(&format!("templates/{}", template_id)));
        self.send("get template", request, cancel).await
    }

    async fn create_template(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Template> {
        require_non_blank("name", name)?;

        let request = self
            .http_client
            .post(self.url("templates"))
            .json(&CreateTemplate::dynamic(name));
        self.send("create template", request, cancel).await
    }

    async fn create_template_version(
        &self,
        template_id: &str,
        name: Option<&str>,
        subject: Option<&str>,
        html_content: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<TemplateVersion> {
        require_non_blank("template_id", template_id)?;

        let request = self
            .http_client
            .post(self.url(&format!("templates/{}/versions", template_id)))
            .json(&CreateTemplateVersion::new(name, subject, html_content));
        self.send("create template version", request, cancel).await
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }
}

/// Produces SendGrid providers sharing one connection pool
#[derive(Clone)]
pub struct SendGridProviderFactory {
    http_client: Client,
    base_url: String,
}

impl SendGridProviderFactory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

impl TemplateProviderFactory for SendGridProviderFactory {
    fn for_api_key(&self, api_key: &str) -> Arc<dyn TemplateProvider> {
        Arc::new(SendGridTemplateProvider::new(
            self.http_client.clone(),
            self.base_url.clone(),
            api_key,
        ))
    }
}
