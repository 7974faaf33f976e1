use regex::Regex;
use std::sync::LazyLock;

/// Matches a trailing `.xx.ext` or `.xx-yy.ext`, or a bare `xx.ext` file name
static LANGUAGE_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\w\-.]+\.|^)(?P<lang>[a-z]{2}(-[a-z]{2})?)\.\w+$")
        .expect("language code pattern is valid")
});

/// Derive the identifier of a translation from its file name.
///
/// Uses the lowercased language code when the name carries one
/// (`messages.fr-ca.json` gives `fr-ca`), otherwise the file's
/// 1-based position in the upload.
pub fn derive_translation_id(file_name: &str, ordinal: usize) -> String {
    LANGUAGE_CODE_PATTERN
        .captures(file_name)
        .and_then(|caps| caps.name("lang"))
        .map(|lang| lang.as_str().to_lowercase())
        .unwrap_or_else(|| ordinal.to_string())
}
