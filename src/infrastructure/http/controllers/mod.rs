pub mod antiforgery;
pub mod translate;
