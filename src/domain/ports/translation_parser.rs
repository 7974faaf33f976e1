use crate::domain::entities::TranslationMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported translation file extension: {0}")]
    UnsupportedFormat(String),
    #[error("Translation file {file_name} is empty")]
    Empty { file_name: String },
    #[error("Translation file {file_name} is not valid UTF-8")]
    InvalidEncoding {
        file_name: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Failed to parse translation file {file_name}")]
    Malformed {
        file_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Translation file {file_name} must contain a mapping at the top level")]
    NotAMapping { file_name: String },
}

/// Decoder for one translation file format
pub trait TranslationParser: Send + Sync {
    /// Lowercase file extensions (with the leading dot) handled by this parser
    fn extensions(&self) -> &'static [&'static str];

    fn parse(&self, file_name: &str, content: &str) -> Result<TranslationMap, ParseError>;
}
