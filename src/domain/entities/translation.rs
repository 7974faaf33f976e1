use serde::Serialize;
use std::collections::BTreeMap;

/// A node of a parsed translation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Scalar(String),
    Mapping(BTreeMap<String, TranslationNode>),
}

/// Parsed translation file: a tree of keys to nested maps or strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: BTreeMap<String, TranslationNode>,
}

impl TranslationMap {
    pub fn new(entries: BTreeMap<String, TranslationNode>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a dotted key path (`a.b.c`) to its string value.
    ///
    /// Returns `None` when a segment is missing, when an intermediate segment
    /// is a string rather than a mapping, or when the path ends on a mapping.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        if key.trim().is_empty() {
            return None;
        }

        let mut segments = key.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            match current {
                TranslationNode::Mapping(children) => current = children.get(segment)?,
                TranslationNode::Scalar(_) => return None,
            }
        }

        match current {
            TranslationNode::Scalar(value) => Some(value.as_str()),
            TranslationNode::Mapping(_) => None,
        }
    }
}

impl FromIterator<(String, TranslationNode)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, TranslationNode)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A translation file received with a request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Translated subject/content produced for one uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Language code taken from the file name, or the file's 1-based position
    pub id: String,
    pub content: String,
    pub subject: Option<String>,
}

/// Result of a translate request: derived identifier to created template ID
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TranslateOutcome {
    pub generated_templates: BTreeMap<String, Option<String>>,
}

impl TranslateOutcome {
    pub fn succeeded(&self) -> usize {
        self.generated_templates
            .values()
            .filter(|id| id.is_some())
            .count()
    }

    pub fn total(&self) -> usize {
        self.generated_templates.len()
    }
}
