pub mod http;
pub mod observability;
pub mod parsers;
pub mod providers;
