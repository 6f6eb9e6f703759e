//! Configuration and logging setup for the mill refactoring tools

pub mod config;
pub mod logging;

pub use config::{AppConfig, LogFormat, LoggingConfig, ParserConfig, RefactoringConfig};
