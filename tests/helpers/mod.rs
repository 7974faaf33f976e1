#![allow(dead_code)]
pub mod mock_provider;
pub mod multipart;

pub use mock_provider::*;
pub use multipart::*;
