use crate::domain::entities::{TranslationMap, TranslationNode};
use crate::domain::ports::translation_parser::{ParseError, TranslationParser};
use serde_yaml::Value;

/// Parser for `.yml` / `.yaml` translation files
#[derive(Debug, Clone, Default)]
pub struct YamlTranslationParser;

impl YamlTranslationParser {
    pub fn new() -> Self {
        Self
    }
}

fn key_to_string(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_node(value: Value) -> Option<TranslationNode> {
    match value {
        Value::String(s) => Some(TranslationNode::Scalar(s)),
        Value::Number(n) => Some(TranslationNode::Scalar(n.to_string())),
        Value::Bool(b) => Some(TranslationNode::Scalar(b.to_string())),
        Value::Mapping(map) => Some(TranslationNode::Mapping(
            map.into_iter()
                .filter_map(|(key, value)| Some((key_to_string(key)?, to_node(value)?)))
                .collect(),
        )),
        Value::Tagged(tagged) => to_node(tagged.value),
        Value::Null | Value::Sequence(_) => None,
    }
}

impl TranslationParser for YamlTranslationParser {
    fn extensions(&self) -> &'static [&'static str] {
        &[".yml", ".yaml"]
    }

    fn parse(&self, file_name: &str, content: &str) -> Result<TranslationMap, ParseError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ParseError::Malformed {
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
