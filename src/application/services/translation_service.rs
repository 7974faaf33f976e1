use crate::domain::entities::{TranslateOutcome, Translation, UploadedFile};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::template_provider::{
    ProviderResult, TemplateProvider, TemplateProviderFactory,
};
use crate::infrastructure::parsers::ParserRegistry;
use crate::shared::utils::{
    derive_translation_id, extract_translation_keys, format_error_chain, substitute_translations,
};
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Input of a translate request
#[derive(Debug, Clone)]
pub struct TranslateCommand {
    pub api_key: String,
    pub template_id: String,
    pub version_id: String,
    pub files: Vec<UploadedFile>,
}

/// Source version content and the token keys it references.
///
/// Computed once per request and shared read-only by every file task.
#[derive(Debug)]
struct SourceVersion {
    content: String,
    subject: Option<String>,
    content_keys: Vec<String>,
    subject_keys: Vec<String>,
}

/// Generates translated copies of a template version
#[derive(Clone)]
pub struct TranslationService {
    provider_factory: Arc<dyn TemplateProviderFactory>,
    parsers: Arc<ParserRegistry>,
}

impl TranslationService {
    pub fn new(provider_factory: Arc<dyn TemplateProviderFactory>, parsers: ParserRegistry) -> Self {
        Self {
            provider_factory,
            parsers: Arc::new(parsers),
        }
    }

    /// Translate a template version with every uploaded file and upload the results.
    ///
    /// Fails as a whole when the source version cannot be used or a file cannot
    /// be parsed. Upload failures only affect their own entry, which maps to `None`.
    pub async fn translate(
        &self,
        command: TranslateCommand,
        cancel: &CancellationToken,
    ) -> DomainResult<TranslateOutcome> {
        let provider = self.provider_factory.for_api_key(&command.api_key);

        let template = provider
            .get_template(&command.template_id, cancel)
            .await
            .map_err(|source| DomainError::TemplateRetrieval {
                template_id: command.template_id.clone(),
                source,
            })?;

        let version = template
            .find_version(&command.version_id)
            .ok_or_else(|| DomainError::TemplateVersionNotFound(command.version_id.clone()))?;

        let content = version
            .html_content
            .clone()
            .filter(|content| !content.is_empty())
            .ok_or(DomainError::EmptyTemplateContent)?;

        let content_keys = extract_translation_keys(&content);
        if content_keys.is_empty() {
            return Err(DomainError::NoTranslationKeys);
        }

        let subject = version.subject.clone();
        let subject_keys = subject
            .as_deref()
            .filter(|subject| !subject.trim().is_empty())
            .map(extract_translation_keys)
            .unwrap_or_default();

        tracing::info!(
            template_id = %template.id,
            version_id = %command.version_id,
            "Translating {} content keys and {} subject keys with {} files",
            content_keys.len(),
            subject_keys.len(),
            command.files.len()
        );
        metrics::counter!("translations_requested_total").increment(1);

        let source = Arc::new(SourceVersion {
            content,
            subject,
            content_keys,
            subject_keys,
        });

        let translations = self.translate_files(source, command.files).await?;

        Ok(upload_translations(provider, &template.name, translations, cancel).await)
    }

    /// Translate every file on its own task, then join.
    ///
    /// The returned translations are sorted by identifier.
    async fn translate_files(
        &self,
        source: Arc<SourceVersion>,
        files: Vec<UploadedFile>,
    ) -> DomainResult<Vec<Translation>> {
        let tasks: Vec<_> = files
            .into_iter()
            .enumerate()
            .map(|(index, file)| {
                let source = Arc::clone(&source);
                let parsers = Arc::clone(&self.parsers);
                let span = tracing::info_span!("translate_file", file = %file.file_name);

                tokio::spawn(
                    async move { translate_file(&parsers, &source, index + 1, &file) }
                        .instrument(span),
                )
            })
            .collect();

        let mut translations = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            let translation = joined
                .map_err(|e| DomainError::Internal(format!("Translation task failed: {}", e)))?;
            translations.push(translation?);
        }

        translations.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = translations.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(DomainError::DuplicateTranslation(pair[0].id.clone()));
        }

        Ok(translations)
    }
}

fn translate_file(
    parsers: &ParserRegistry,
    source: &SourceVersion,
    ordinal: usize,
    file: &UploadedFile,
) -> DomainResult<Translation> {
    let id = derive_translation_id(&file.file_name, ordinal);
    let translations = parsers.parse_file(file)?;

    let subject = source
        .subject
        .as_deref()
        .map(|subject| substitute_translations(subject, &source.subject_keys, &translations));
    let content = substitute_translations(&source.content, &source.content_keys, &translations);

    tracing::debug!(translation = %id, "Translated template content");

    Ok(Translation {
        id,
        content,
        subject,
    })
}

/// Upload every translation concurrently as a new template plus version
async fn upload_translations(
    provider: Arc<dyn TemplateProvider>,
    template_name: &str,
    translations: Vec<Translation>,
    cancel: &CancellationToken,
) -> TranslateOutcome {
    let ids: Vec<String> = translations.iter().map(|t| t.id.clone()).collect();

    let tasks: Vec<_> = translations
        .into_iter()
        .map(|translation| {
            let provider = Arc::clone(&provider);
            let cancel = cancel.clone();
            let name = format!("{} - translation {}", template_name, translation.id);
            let span = tracing::info_span!("upload_translation", translation = %translation.id);

            tokio::spawn(
                async move { upload_translation(provider.as_ref(), &name, &translation, &cancel).await }
                    .instrument(span),
            )
        })
        .collect();

    let mut outcome = TranslateOutcome::default();
    for (id, joined) in ids.into_iter().zip(join_all(tasks).await) {
        let created = match joined {
            Ok(Ok(template_id)) => {
                metrics::counter!("template_uploads_total", "outcome" => "success").increment(1);
                Some(template_id)
            }
            Ok(Err(e)) => {
                tracing::warn!(translation = %id, "Failed to upload translation: {}", format_error_chain(&e));
                metrics::counter!("template_uploads_total", "outcome" => "failure").increment(1);
                None
            }
            Err(e) => {
                tracing::warn!(translation = %id, "Upload task failed: {}", e);
                metrics::counter!("template_uploads_total", "outcome" => "failure").increment(1);
                None
            }
        };
        outcome.generated_templates.insert(id, created);
    }

    tracing::info!(
        "Successfully uploaded {} out of {} translations",
        outcome.succeeded(),
        outcome.total()
    );

    outcome
}

/// Create the template, then its version. Returns the new template's ID.
async fn upload_translation(
    provider: &dyn TemplateProvider,
    name: &str,
    translation: &Translation,
    cancel: &CancellationToken,
) -> ProviderResult<String> {
    let created = provider.create_template(name, cancel).await?;

    provider
        .create_template_version(
            &created.id,
            None,
            translation.subject.as_deref(),
            &translation.content,
            cancel,
        )
        .await?;

    tracing::info!(template_id = %created.id, "Created template {}", name);
    Ok(created.id)
}
