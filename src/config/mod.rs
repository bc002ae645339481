mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let config = from_yaml(&config_str)?;

    Ok(with_model_path_override(config, env::var("MODEL_PATH").ok()))
}

/// A non-empty `MODEL_PATH` wins over the configured artifact path.
pub fn with_model_path_override(mut config: Config, model_path: Option<String>) -> Config {
    if let Some(path) = model_path.filter(|p| !p.is_empty()) {
        config.model.path = path;
    }
    config
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = from_yaml("server: {}\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.logs.level, "info");
        assert!(!config.server.legacy_error_status);
        assert_eq!(config.model.path, "symptoms.json");
    }

    #[test]
    fn test_explicit_values() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 5000
  legacy_error_status: true
  logs:
    level: "debug"
model:
  path: "/srv/models/symptoms.json"
"#;
        let config = from_yaml(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.legacy_error_status);
        assert_eq!(config.server.logs.level, "debug");
        assert_eq!(config.model.path, "/srv/models/symptoms.json");
    }

    #[test]
    fn test_empty_document_uses_all_defaults() {
        let config = from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.model.path, "symptoms.json");
    }

    #[test]
    fn test_model_path_override() {
        let config = from_yaml("model:\n  path: \"a.json\"\n").unwrap();

        let kept = with_model_path_override(config.clone(), None);
        assert_eq!(kept.model.path, "a.json");

        let kept = with_model_path_override(config.clone(), Some(String::new()));
        assert_eq!(kept.model.path, "a.json");

        let replaced = with_model_path_override(config, Some("/models/b.json".to_string()));
        assert_eq!(replaced.model.path, "/models/b.json");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = from_yaml("server:\n  port: \"not-a-number\"\n");
        assert!(matches!(result, Err(crate::Error::Yaml(_))));
    }
}
