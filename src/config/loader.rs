//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::ConfigError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ConfigError),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, LoadError> {
    let config: AppConfig = toml::from_str(content)?;

    config.negotiation.build()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [negotiation]
            languages = ["en", "ja"]
            methods = ["subdomain", "header"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.negotiation.languages, vec!["en", "ja"]);
    }

    #[test]
    fn test_parse_rejects_conflicting_methods() {
        let err = parse_config(
            r#"
            [negotiation]
            languages = ["en"]
            methods = ["subdomain", "path_prefix"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, LoadError::Validation(ConfigError::ConflictingPathMethods)));
    }

    #[test]
    fn test_parse_rejects_unknown_method() {
        let err = parse_config(
            r#"
            [negotiation]
            methods = ["cookie"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/lang-negotiation.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
