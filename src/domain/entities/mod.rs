pub mod template;
pub mod translation;

pub use template::*;
pub use translation::*;
