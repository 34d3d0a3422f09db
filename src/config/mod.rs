pub mod loader;
pub mod settings;

pub use settings::{Configuration, LogFormat, LoggingConfig, Setting, SETTINGS};
