use crate::domain::ports::template_provider::ProviderError;
use crate::domain::ports::translation_parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Failed to retrieve template {template_id}")]
    TemplateRetrieval {
        template_id: String,
        #[source]
        source: ProviderError,
    },
    #[error("Template version {0} not found")]
    TemplateVersionNotFound(String),
    #[error("Template version content is empty")]
    EmptyTemplateContent,
    #[error("The template does not contain any translation keys")]
    NoTranslationKeys,
    #[error("Invalid translation file")]
    TranslationFile(#[from] ParseError),
    #[error("More than one translation file resolves to identifier {0}")]
    DuplicateTranslation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
