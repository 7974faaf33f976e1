use crate::domain::entities::TranslationMap;
use regex::{NoExpand, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches `[[key]]` tokens, allowing spaces or tabs inside the brackets
static TRANSLATION_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\[[ \t]*(?P<key>[\w\-.]+)[ \t]*\]\]")
        .expect("translation key pattern is valid")
});

/// Extract the keys of all `[[key]]` tokens in source order, duplicates included
pub fn extract_translation_keys(text: &str) -> Vec<String> {
    TRANSLATION_KEY_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.name("key"))
        .map(|key| key.as_str().to_string())
        .collect()
}

/// Build the pattern matching exactly one key's token
fn token_pattern_for_key(key: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\[\[[ \t]*{}[ \t]*\]\]", regex::escape(key)))
}

/// Replace the tokens of every resolvable key with its translation.
///
/// Tokens whose key has no string value in `translations` are left as-is.
pub fn substitute_translations(text: &str, keys: &[String], translations: &TranslationMap) -> String {
    let mut seen = HashSet::new();
    let mut result = text.to_string();

    for key in keys {
        if !seen.insert(key.as_str()) {
            continue;
        }

        let Some(value) = translations.lookup(key) else {
            tracing::debug!(key = %key, "Translation for key not found");
            continue;
        };

        match token_pattern_for_key(key) {
            Ok(pattern) => {
                result = pattern.replace_all(&result, NoExpand(value)).into_owned();
            }
            Err(e) => {
                tracing::warn!(key = %key, "Skipping translation key with unusable pattern: {}", e);
            }
        }
    }

    result
}
