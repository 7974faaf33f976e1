/// Integration tests for the translate flow:
/// fetch source version, extract keys, translate every file, upload concurrently.
mod helpers;

use helpers::*;
use std::sync::Arc;
use template_translator::application::services::TranslateCommand;
use template_translator::domain::entities::UploadedFile;
use template_translator::domain::errors::DomainError;
use template_translator::domain::ports::translation_parser::ParseError;
use tokio_util::sync::CancellationToken;

const CONTENT: &str = "<h1>[[ greeting.title ]]</h1><p>[[body]]</p><footer>[[footer]]</footer>";
const SUBJECT: &str = "[[subject]] - ACME";

const FR_JSON: &str = r#"{
    "greeting": { "title": "Bonjour" },
    "body": "Merci de votre inscription",
    "subject": "Bienvenue"
}"#;

const DE_YAML: &str = "
greeting:
  title: Hallo
body: Danke für Ihre Anmeldung
footer: Impressum
subject: Willkommen
";

fn command(files: Vec<UploadedFile>) -> TranslateCommand {
    TranslateCommand {
        api_key: "SG.test-key".to_string(),
        template_id: "d-source".to_string(),
        version_id: "v-source".to_string(),
        files,
    }
}

fn factory_for(provider: MockTemplateProvider) -> Arc<MockProviderFactory> {
    Arc::new(MockProviderFactory::new(provider))
}

#[tokio::test]
async fn test_translates_and_uploads_every_file() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        Some(SUBJECT),
    )));
    let service = service_with(factory.clone());

    let outcome = service
        .translate(
            command(vec![
                UploadedFile::new("welcome.fr.json", FR_JSON),
                UploadedFile::new("welcome.de.yaml", DE_YAML),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.total(), 2);
    assert_eq!(outcome.succeeded(), 2);
    assert_eq!(factory.api_keys(), vec!["SG.test-key"]);

    let mut names: Vec<String> = factory
        .provider
        .created_templates()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["Welcome - translation de", "Welcome - translation fr"]
    );

    let versions = factory.provider.recorded_versions();
    assert_eq!(versions.len(), 2);

    let de = &versions[0];
    assert_eq!(
        de.html_content,
        "<h1>Hallo</h1><p>Danke für Ihre Anmeldung</p><footer>Impressum</footer>"
    );
    assert_eq!(de.subject.as_deref(), Some("Willkommen - ACME"));
    assert_eq!(
        outcome.generated_templates.get("de").cloned().flatten(),
        Some(de.template_id.clone())
    );

    // Missing footer translation leaves the token in place
    let fr = &versions[1];
    assert_eq!(
        fr.html_content,
        "<h1>Bonjour</h1><p>Merci de votre inscription</p><footer>[[footer]]</footer>"
    );
    assert_eq!(fr.subject.as_deref(), Some("Bienvenue - ACME"));
}

#[tokio::test]
async fn test_failed_upload_does_not_block_siblings() {
    let provider = MockTemplateProvider::with_template(source_template(Some(CONTENT), None))
        .failing_create_for("translation fr");
    let factory = factory_for(provider);
    let service = service_with(factory.clone());

    let outcome = service
        .translate(
            command(vec![
                UploadedFile::new("welcome.fr.json", FR_JSON),
                UploadedFile::new("welcome.de.yaml", DE_YAML),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.total(), 2);
    assert_eq!(outcome.succeeded(), 1);
    assert_eq!(outcome.generated_templates.get("fr"), Some(&None));
    assert!(outcome.generated_templates["de"].is_some());
    assert_eq!(factory.provider.recorded_versions().len(), 1);
}

#[tokio::test]
async fn test_failed_version_creation_records_absent_result() {
    let provider = MockTemplateProvider::with_template(source_template(Some(CONTENT), None))
        .failing_version_for("translation de");
    let factory = factory_for(provider);
    let service = service_with(factory.clone());

    let outcome = service
        .translate(
            command(vec![
                UploadedFile::new("welcome.fr.json", FR_JSON),
                UploadedFile::new("welcome.de.yaml", DE_YAML),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    // The template itself was created, but the translation still counts as failed
    assert_eq!(factory.provider.created_templates().len(), 2);
    assert_eq!(outcome.generated_templates.get("de"), Some(&None));
    assert!(outcome.generated_templates["fr"].is_some());
    assert_eq!(outcome.succeeded(), 1);
}

#[tokio::test]
async fn test_template_without_tokens_fails_before_processing_files() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some("<p>No placeholders here</p>"),
        Some("[[subject]]"),
    )));
    let service = service_with(factory.clone());

    // The unsupported file would fail too, but key extraction comes first
    let err = service
        .translate(
            command(vec![UploadedFile::new("strings.xml", "<x/>")]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NoTranslationKeys));
    assert!(factory.provider.created_templates().is_empty());
}

#[tokio::test]
async fn test_missing_version() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory);

    let mut cmd = command(vec![UploadedFile::new("fr.json", FR_JSON)]);
    cmd.version_id = "v-unknown".to_string();

    let err = service
        .translate(cmd, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TemplateVersionNotFound(ref id) if id == "v-unknown"));
}

#[tokio::test]
async fn test_empty_version_content() {
    for content in [None, Some("")] {
        let factory = factory_for(MockTemplateProvider::with_template(source_template(
            content, None,
        )));
        let service = service_with(factory);

        let err = service
            .translate(
                command(vec![UploadedFile::new("fr.json", FR_JSON)]),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyTemplateContent));
    }
}

#[tokio::test]
async fn test_missing_template() {
    let factory = factory_for(MockTemplateProvider::default());
    let service = service_with(factory);

    let err = service
        .translate(
            command(vec![UploadedFile::new("fr.json", FR_JSON)]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::TemplateRetrieval { ref template_id, .. } if template_id == "d-source"));
}

#[tokio::test]
async fn test_unsupported_file_fails_whole_request() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory.clone());

    let err = service
        .translate(
            command(vec![
                UploadedFile::new("welcome.fr.json", FR_JSON),
                UploadedFile::new("welcome.de.txt", "greeting=Hallo"),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::TranslationFile(ParseError::UnsupportedFormat(ref ext)) if ext == ".txt"
    ));
    assert!(factory.provider.created_templates().is_empty());
}

#[tokio::test]
async fn test_ordinal_identifiers_without_language_code() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory.clone());

    let outcome = service
        .translate(
            command(vec![
                UploadedFile::new("file1.json", FR_JSON),
                UploadedFile::new("translations.yml", DE_YAML),
                UploadedFile::new("file3.json", FR_JSON),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let ids: Vec<&str> = outcome
        .generated_templates
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(factory
        .provider
        .created_templates()
        .iter()
        .any(|(_, name)| name == "Welcome - translation 3"));
}

#[tokio::test]
async fn test_duplicate_identifiers_are_rejected() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory.clone());

    let err = service
        .translate(
            command(vec![
                UploadedFile::new("marketing.fr.json", FR_JSON),
                UploadedFile::new("legal.fr.yaml", DE_YAML),
            ]),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::DuplicateTranslation(ref id) if id == "fr"));
    assert!(factory.provider.created_templates().is_empty());
}

#[tokio::test]
async fn test_missing_subject_is_not_an_error() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory.clone());

    let outcome = service
        .translate(
            command(vec![UploadedFile::new("de.yml", DE_YAML)]),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.succeeded(), 1);
    assert_eq!(factory.provider.recorded_versions()[0].subject, None);
}

#[tokio::test]
async fn test_cancelled_request_uploads_nothing() {
    let factory = factory_for(MockTemplateProvider::with_template(source_template(
        Some(CONTENT),
        None,
    )));
    let service = service_with(factory.clone());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = service
        .translate(
            command(vec![
                UploadedFile::new("fr.json", FR_JSON),
                UploadedFile::new("de.yml", DE_YAML),
            ]),
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(outcome.total(), 2);
    assert_eq!(outcome.succeeded(), 0);
    assert!(factory.provider.created_templates().is_empty());
}
