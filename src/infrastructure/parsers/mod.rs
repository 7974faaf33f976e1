pub mod json;
pub mod yaml;

pub use json::JsonTranslationParser;
pub use yaml::YamlTranslationParser;

use crate::domain::entities::{TranslationMap, UploadedFile};
use crate::domain::ports::translation_parser::{ParseError, TranslationParser};
use std::path::Path;
use std::sync::Arc;

/// Translation parsers keyed by file extension
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn TranslationParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the JSON and YAML parsers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonTranslationParser::new()));
        registry.register(Arc::new(YamlTranslationParser::new()));
        registry
    }

    pub fn register(&mut self, parser: Arc<dyn TranslationParser>) {
        self.parsers.push(parser);
    }

    /// Find the parser for a file name, by its lowercased extension
    pub fn parser_for(&self, file_name: &str) -> Result<&dyn TranslationParser, ParseError> {
        let extension = file_extension(file_name);
        self.parsers
            .iter()
            .find(|p| p.extensions().contains(&extension.as_str()))
            .map(|p| &**p)
            .ok_or(ParseError::UnsupportedFormat(extension))
    }

    /// Decode an uploaded file into a translation map
    pub fn parse_file(&self, file: &UploadedFile) -> Result<TranslationMap, ParseError> {
        let parser = self.parser_for(&file.file_name)?;

        let content =
            std::str::from_utf8(&file.content).map_err(|e| ParseError::InvalidEncoding {
                file_name: file.file_name.clone(),
                source: e,
            })?;

        if content.trim().is_empty() {
            return Err(ParseError::Empty {
                file_name: file.file_name.clone(),
            });
        }

        parser.parse(&file.file_name, content)
    }
}

/// Lowercased extension including the leading dot, or an empty string
fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
