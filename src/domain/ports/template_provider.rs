use crate::domain::entities::{Template, TemplateVersion};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid argument: {0} must not be blank")]
    InvalidArgument(&'static str),
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("Failed to deserialize {operation} response")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{operation} request failed")]
    Transport {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{operation} request was cancelled")]
    Cancelled { operation: &'static str },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Reject blank identifying arguments before anything goes over the wire
pub fn require_non_blank(argument: &'static str, value: &str) -> ProviderResult<()> {
    if value.trim().is_empty() {
        return Err(ProviderError::InvalidArgument(argument));
    }
    Ok(())
}

/// Remote store of email templates
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    /// Fetch a template together with all of its versions
    async fn get_template(
        &self,
        template_id: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Template>;

    /// Create an empty dynamic template
    async fn create_template(&self, name: &str, cancel: &CancellationToken)
        -> ProviderResult<Template>;

    /// Create a version under an existing template
    async fn create_template_version(
        &self,
        template_id: &str,
        name: Option<&str>,
        subject: Option<&str>,
        html_content: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<TemplateVersion>;

    /// Get the provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}

/// Builds a provider bound to the API key supplied with a request
pub trait TemplateProviderFactory: Send + Sync {
    fn for_api_key(&self, api_key: &str) -> Arc<dyn TemplateProvider>;
}
