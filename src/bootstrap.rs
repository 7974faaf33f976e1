use crate::application::services::TranslationService;
use crate::config::Config;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::parsers::ParserRegistry;
use crate::infrastructure::providers::SendGridProviderFactory;
use crate::shared::csrf::AntiforgeryConfig;
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to build HTTP client")]
    HttpClient(#[from] reqwest::Error),
}

/// Wire the application state from configuration
pub fn build_app_state(config: &Config) -> Result<AppState, BootstrapError> {
    let provider_factory = SendGridProviderFactory::new(
        config.sendgrid_base_url.clone(),
        Duration::from_secs(config.sendgrid_timeout_secs),
    )?;
    tracing::info!("SendGrid client targeting {}", config.sendgrid_base_url);

    let translation_service =
        TranslationService::new(Arc::new(provider_factory), ParserRegistry::with_defaults());

    Ok(AppState {
        translation_service,
        antiforgery: AntiforgeryConfig::new(config.antiforgery_enabled, antiforgery_secret(config)),
        max_upload_bytes: config.max_upload_bytes,
    })
}

/// Configured secret, or a random one valid for this process only
fn antiforgery_secret(config: &Config) -> Vec<u8> {
    match &config.antiforgery_secret {
        Some(secret) => secret.as_bytes().to_vec(),
        None => {
            tracing::warn!(
                "ANTIFORGERY_SECRET not set; generated tokens will not survive a restart"
            );
            let mut secret = vec![0u8; 32];
            rand::thread_rng().fill_bytes(&mut secret);
            secret
        }
    }
}
