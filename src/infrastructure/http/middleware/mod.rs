pub mod correlation_id;
pub mod error;
pub mod error_handling;
pub mod state;

pub use correlation_id::*;
pub use error::*;
pub use error_handling::*;
pub use state::*;
