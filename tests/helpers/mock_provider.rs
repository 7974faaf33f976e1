use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use template_translator::application::services::TranslationService;
use template_translator::domain::entities::{Template, TemplateVersion};
use template_translator::domain::ports::template_provider::{
    ProviderError, ProviderResult, TemplateProvider, TemplateProviderFactory,
};
use template_translator::infrastructure::parsers::ParserRegistry;
use tokio_util::sync::CancellationToken;

/// A version uploaded through the mock provider
#[derive(Debug, Clone)]
pub struct RecordedVersion {
    pub template_id: String,
    pub template_name: String,
    pub subject: Option<String>,
    pub html_content: String,
}

/// Scripted in-memory template provider
///
/// Serves one source template and simulates HTTP 500s for template names
/// containing any of the configured failure markers.
#[derive(Default)]
pub struct MockTemplateProvider {
    pub template: Option<Template>,
    pub fail_create_for: Vec<String>,
    pub fail_version_for: Vec<String>,
    next_id: AtomicUsize,
    created: Mutex<Vec<(String, String)>>,
    versions: Mutex<Vec<RecordedVersion>>,
}

impl MockTemplateProvider {
    pub fn with_template(template: Template) -> Self {
        Self {
            template: Some(template),
            ..Default::default()
        }
    }

    pub fn failing_create_for(mut self, marker: &str) -> Self {
        self.fail_create_for.push(marker.to_string());
        self
    }

    pub fn failing_version_for(mut self, marker: &str) -> Self {
        self.fail_version_for.push(marker.to_string());
        self
    }

    /// (template_id, name) of every created template
    pub fn created_templates(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    pub fn recorded_versions(&self) -> Vec<RecordedVersion> {
        let mut versions = self.versions.lock().unwrap().clone();
        versions.sort_by(|a, b| a.template_name.cmp(&b.template_name));
        versions
    }

    fn server_error(operation: &'static str) -> ProviderError {
        ProviderError::Status {
            operation,
            status: 500,
            body: "{\"errors\":[{\"message\":\"internal error\"}]}".to_string(),
        }
    }
}

#[async_trait]
impl TemplateProvider for MockTemplateProvider {
    async fn get_template(
        &self,
        template_id: &str,
        _cancel: &CancellationToken,
    ) -> ProviderResult<Template> {
        match &self.template {
            Some(template) if template.id == template_id => Ok(template.clone()),
            _ => Err(ProviderError::Status {
                operation: "get template",
                status: 404,
                body: "{\"errors\":[{\"message\":\"template not found\"}]}".to_string(),
            }),
        }
    }

    async fn create_template(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Template> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled {
                operation: "create template",
            });
        }
        if self.fail_create_for.iter().any(|m| name.contains(m.as_str())) {
            return Err(Self::server_error("create template"));
        }

        let id = format!("d-created-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.created
            .lock()
            .unwrap()
            .push((id.clone(), name.to_string()));

        Ok(Template {
            id,
            name: name.to_string(),
            generation: Some("dynamic".to_string()),
            versions: vec![],
        })
    }

    async fn create_template_version(
        &self,
        template_id: &str,
        name: Option<&str>,
        subject: Option<&str>,
        html_content: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<TemplateVersion> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled {
                operation: "create template version",
            });
        }

        let template_name = self
            .created
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == template_id)
            .map(|(_, name)| name.clone())
            .unwrap_or_default();

        if self
            .fail_version_for
            .iter()
            .any(|m| template_name.contains(m.as_str()))
        {
            return Err(Self::server_error("create template version"));
        }

        self.versions.lock().unwrap().push(RecordedVersion {
            template_id: template_id.to_string(),
            template_name,
            subject: subject.map(str::to_string),
            html_content: html_content.to_string(),
        });

        Ok(TemplateVersion {
            id: format!("{}-v1", template_id),
            template_id: Some(template_id.to_string()),
            name: name.map(str::to_string),
            subject: subject.map(str::to_string),
            html_content: Some(html_content.to_string()),
            editor: Some("design".to_string()),
            active: 1,
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Hands out one shared mock provider and remembers the API keys it saw
pub struct MockProviderFactory {
    pub provider: Arc<MockTemplateProvider>,
    api_keys: Mutex<Vec<String>>,
}

impl MockProviderFactory {
    pub fn new(provider: MockTemplateProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            api_keys: Mutex::new(Vec::new()),
        }
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.api_keys.lock().unwrap().clone()
    }
}

impl TemplateProviderFactory for MockProviderFactory {
    fn for_api_key(&self, api_key: &str) -> Arc<dyn TemplateProvider> {
        self.api_keys.lock().unwrap().push(api_key.to_string());
        self.provider.clone()
    }
}

/// Source template with one version holding the given content and subject
pub fn source_template(html_content: Option<&str>, subject: Option<&str>) -> Template {
    Template {
        id: "d-source".to_string(),
        name: "Welcome".to_string(),
        generation: Some("dynamic".to_string()),
        versions: vec![TemplateVersion {
            id: "v-source".to_string(),
            template_id: Some("d-source".to_string()),
            name: Some("Main".to_string()),
            subject: subject.map(str::to_string),
            html_content: html_content.map(str::to_string),
            editor: Some("code".to_string()),
            active: 1,
        }],
    }
}

/// Translation service backed by the given mock factory
pub fn service_with(factory: Arc<MockProviderFactory>) -> TranslationService {
    TranslationService::new(factory, ParserRegistry::with_defaults())
}
