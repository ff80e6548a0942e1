//! Application configuration: environment-driven settings plus the
//! constants shared by validation, persistence and the server.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
