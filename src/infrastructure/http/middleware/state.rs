use crate::application::services::TranslationService;
use crate::shared::csrf::AntiforgeryConfig;

#[derive(Clone)]
pub struct AppState {
    pub translation_service: TranslationService,
    pub antiforgery: AntiforgeryConfig,
    pub max_upload_bytes: usize,
}
