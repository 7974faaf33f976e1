use crate::application::services::TranslateCommand;
use crate::domain::entities::{TranslateOutcome, UploadedFile};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState, FieldError};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use tokio_util::sync::CancellationToken;

/// Form field names, matched case-insensitively
const API_KEY_FIELD: &str = "sendGridApiKey";
const TEMPLATE_ID_FIELD: &str = "templateId";
const VERSION_ID_FIELD: &str = "versionId";
const FILES_FIELD: &str = "files";

/// Fields collected from the multipart body, before validation
#[derive(Debug, Default)]
pub struct TranslateForm {
    pub api_key: Option<String>,
    pub template_id: Option<String>,
    pub version_id: Option<String>,
    pub files: Vec<UploadedFile>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart body: {}", err))
}

impl TranslateForm {
    pub async fn from_multipart(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name.eq_ignore_ascii_case(API_KEY_FIELD) {
                form.api_key = Some(field.text().await.map_err(multipart_error)?);
            } else if name.eq_ignore_ascii_case(TEMPLATE_ID_FIELD) {
                form.template_id = Some(field.text().await.map_err(multipart_error)?);
            } else if name.eq_ignore_ascii_case(VERSION_ID_FIELD) {
                form.version_id = Some(field.text().await.map_err(multipart_error)?);
            } else if name.eq_ignore_ascii_case(FILES_FIELD) {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty, unnamed part when no file was picked
                if file_name.is_empty() && content.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile::new(file_name, content.to_vec()));
            } else {
                tracing::debug!("Ignoring unknown form field {}", name);
            }
        }

        Ok(form)
    }

    /// Check required fields, reporting every missing one at once
    pub fn validate(self) -> ApiResult<TranslateCommand> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let api_key = present(self.api_key);
        let template_id = present(self.template_id);
        let version_id = present(self.version_id);

        let mut errors = Vec::new();
        if api_key.is_none() {
            errors.push(FieldError::required(API_KEY_FIELD));
        }
        if template_id.is_none() {
            errors.push(FieldError::required(TEMPLATE_ID_FIELD));
        }
        if version_id.is_none() {
            errors.push(FieldError::required(VERSION_ID_FIELD));
        }
        if self.files.is_empty() {
            errors.push(FieldError::required(FILES_FIELD));
        }

        match (api_key, template_id, version_id) {
            (Some(api_key), Some(template_id), Some(version_id)) if errors.is_empty() => {
                Ok(TranslateCommand {
                    api_key,
                    template_id,
                    version_id,
                    files: self.files,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// POST /translate - Generate translated templates from uploaded files
pub async fn translate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<TranslateOutcome>> {
    let command = TranslateForm::from_multipart(multipart).await?.validate()?;

    // Cancelled when this handler finishes or is dropped on client disconnect
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let outcome = state.translation_service.translate(command, &cancel).await?;

    Ok(Json(outcome))
}
