//! Configuration management for mill refactorings

use mill_foundation::{MillError, MillResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config files searched from the working directory, first found wins
pub const CONFIG_PATHS: [&str; 2] = ["mill.toml", ".mill/config.toml"];

/// Prefix of environment variable overrides, e.g. `MILL__LOGGING__LEVEL`
pub const ENV_PREFIX: &str = "MILL__";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Refactoring behaviour
    #[serde(default)]
    pub refactoring: RefactoringConfig,
    /// Parser options
    #[serde(default)]
    pub parser: ParserConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Knobs shared by every refactoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringConfig {
    /// Name given to the variable created by Extract Variable
    pub extracted_variable_name: String,
    /// Spaces per indentation level in generated blocks
    pub indent_width: usize,
    /// Re-parse transformed code before handing it to the editor
    pub validate_output: bool,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    /// Parse every document as TSX, not only `.tsx`/`.jsx` files
    pub tsx: bool,
    /// Accept decorators
    pub decorators: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
}

impl Default for RefactoringConfig {
    fn default() -> Self {
        Self {
            extracted_variable_name: "extracted".to_string(),
            indent_width: 2,
            validate_output: true,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tsx: false,
            decorators: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the working directory and environment
    ///
    /// Configuration is loaded in the following priority order (highest to lowest):
    /// 1. Environment variables (MILL__*)
    /// 2. `mill.toml`, or `.mill/config.toml` when the former is missing
    /// 3. Default values
    pub fn load() -> MillResult<Self> {
        let file = CONFIG_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.exists());
        Self::load_with(file)
    }

    /// Load configuration from an explicit file instead of the search paths
    pub fn load_from(path: &Path) -> MillResult<Self> {
        if !path.exists() {
            return Err(MillError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        Self::load_with(Some(path))
    }

    fn load_with(file: Option<&Path>) -> MillResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = file {
            tracing::debug!(path = %path.display(), "Loading TOML configuration");
            figment = figment.merge(Toml::file(path));
        }

        let figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .map(|key| camel_case_key(key.as_str()).into()),
        );

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| MillError::config(format!("Failed to load configuration: {}", e)))?;

        app_config.validate()?;

        tracing::debug!(
            level = %app_config.logging.level,
            indent_width = app_config.refactoring.indent_width,
            "Configuration loaded successfully"
        );

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> MillResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(MillError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        if !is_identifier(&self.refactoring.extracted_variable_name) {
            return Err(MillError::config(format!(
                "Extracted variable name '{}' is not a valid identifier",
                self.refactoring.extracted_variable_name
            )));
        }

        if !(1..=8).contains(&self.refactoring.indent_width) {
            return Err(MillError::config(format!(
                "Indent width must be between 1 and 8, got {}",
                self.refactoring.indent_width
            )));
        }

        Ok(())
    }
}

/// `refactoring.indent_width` -> `refactoring.indentWidth`
fn camel_case_key(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            let mut upper = false;
            for c in segment.chars() {
                if c == '_' {
                    upper = !out.is_empty();
                } else if upper {
                    out.extend(c.to_uppercase());
                    upper = false;
                } else {
                    out.extend(c.to_lowercase());
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refactoring.extracted_variable_name, "extracted");
        assert_eq!(config.refactoring.indent_width, 2);
        assert!(config.refactoring.validate_output);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[refactoring]\nextractedVariableName = \"value\"\nindentWidth = 4\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.refactoring.extracted_variable_name, "value");
        assert_eq!(config.refactoring.indent_width, 4);
        assert!(config.refactoring.validate_output);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.refactoring.extracted_variable_name = "1st".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.refactoring.indent_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load_from(Path::new("/definitely/not/here/mill.toml")).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_env_keys_become_camel_case() {
        assert_eq!(
            camel_case_key("refactoring.extracted_variable_name"),
            "refactoring.extractedVariableName"
        );
        assert_eq!(camel_case_key("logging.level"), "logging.level");
    }
}
