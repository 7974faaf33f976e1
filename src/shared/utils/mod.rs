pub mod error_chain;
pub mod language_code;
pub mod translation_keys;

pub use error_chain::*;
pub use language_code::*;
pub use translation_keys::*;
