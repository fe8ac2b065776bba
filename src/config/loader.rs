//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [[params]]
            name = "id"
            predicate = "uint"

            [[params]]
            name = "post"
            model = "post"

            [[routes]]
            pattern = "/posts/:id"
            handler = "posts"
            action = "show"

            [[models]]
            name = "post"
            url_field = true
            records = [{ id = 1, url = "hello" }]

            [observability]
            log_level = "debug"
            log_format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.params.len(), 2);
        assert_eq!(config.routes[0].pattern, "/posts/:id");
        assert!(config.models[0].url_field);
        assert_eq!(config.models[0].records[0].field_text("url").as_deref(), Some("hello"));
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, crate::config::LogFormat::Compact);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_config("[[routes]\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let err = parse_config(
            r#"
            [[params]]
            name = "route"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors == &[ValidationError::ReservedParamName]));
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
