pub mod csrf;
pub mod utils;

pub use csrf::*;
pub use utils::*;
