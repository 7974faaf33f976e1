pub mod template_provider;
pub mod translation_parser;
