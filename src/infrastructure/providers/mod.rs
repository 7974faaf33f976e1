pub mod sendgrid;

pub use sendgrid::*;
