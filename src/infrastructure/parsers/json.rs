use crate::domain::entities::{TranslationMap, TranslationNode};
use crate::domain::ports::translation_parser::{ParseError, TranslationParser};
use serde_json::Value;

/// Parser for `.json` translation files
#[derive(Debug, Clone, Default)]
pub struct JsonTranslationParser;

impl JsonTranslationParser {
    pub fn new() -> Self {
        Self
    }
}

fn to_node(value: Value) -> Option<TranslationNode> {
    match value {
        Value::String(s) => Some(TranslationNode::Scalar(s)),
        Value::Number(n) => Some(TranslationNode::Scalar(n.to_string())),
        Value::Bool(b) => Some(TranslationNode::Scalar(b.to_string())),
        Value::Object(map) => Some(TranslationNode::Mapping(
            map.into_iter()
                .filter_map(|(key, value)| to_node(value).map(|node| (key, node)))
                .collect(),
        )),
        // Nulls and arrays never resolve to a translation
        Value::Null | Value::Array(_) => None,
    }
}

impl TranslationParser for JsonTranslationParser {
    fn extensions(&self) -> &'static [&'static str] {
        &[".json"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<TranslationMap, ParseError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ParseError::Malformed {
            file_name: file_name.to_string(),
            source: Box::new(e),
        })?;

        match to_node(value) {
            Some(TranslationNode::Mapping(entries)) => Ok(TranslationMap::new(entries)),
            _ => Err(ParseError::NotAMapping {
                file_name: file_name.to_string(),
            }),
        }
    }
}
