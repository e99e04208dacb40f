//! Store connection settings resolved from the environment.

use crate::error::ConfigError;

const ENV_PROJECT_ID: &str = "TANKLOG_PROJECT_ID";
const ENV_API_KEY: &str = "TANKLOG_API_KEY";
const ENV_DATABASE: &str = "TANKLOG_DATABASE";
const ENV_COLLECTION: &str = "TANKLOG_COLLECTION";
const ENV_ENDPOINT: &str = "TANKLOG_ENDPOINT";

/// Default database name inside a Firestore project.
const DEFAULT_DATABASE: &str = "(default)";
/// Collection the original deployment writes fill-ups to.
const DEFAULT_COLLECTION: &str = "fillingup";

/// Opaque store connection configuration injected into the backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Cloud project identifier.
    pub project_id: String,
    /// API key passed along with every request.
    pub api_key: String,
    /// Database name inside the project.
    pub database: String,
    /// Collection holding fill-up documents.
    pub collection: String,
    /// Optional endpoint override (emulator or proxy).
    pub endpoint: Option<String>,
}

impl StoreConfig {
    /// Build a config with defaults for everything but identity.
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            endpoint: None,
        }
    }

    /// Resolve the config from `TANKLOG_*` process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the config from an arbitrary variable lookup.
    ///
    /// Exists so tests can inject variables without mutating process
    /// environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = require(&lookup, ENV_PROJECT_ID)?;
        let api_key = require(&lookup, ENV_API_KEY)?;
        let mut config = Self::new(project_id, api_key);
        if let Some(database) = lookup(ENV_DATABASE) {
            config.database = database;
        }
        if let Some(collection) = lookup(ENV_COLLECTION) {
            config.collection = collection;
        }
        config.endpoint = lookup(ENV_ENDPOINT);
        Ok(config)
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ConfigError::Invalid {
            name,
            message: "value is empty".to_string(),
        }),
        None => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn resolves_required_vars_with_defaults() {
        let lookup = lookup_from(&[
            ("TANKLOG_PROJECT_ID", "my-project"),
            ("TANKLOG_API_KEY", "key-123"),
        ]);
        let config = StoreConfig::from_lookup(lookup).expect("config");
        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.database, "(default)");
        assert_eq!(config.collection, "fillingup");
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn overrides_apply_when_set() {
        let lookup = lookup_from(&[
            ("TANKLOG_PROJECT_ID", "my-project"),
            ("TANKLOG_API_KEY", "key-123"),
            ("TANKLOG_DATABASE", "staging"),
            ("TANKLOG_COLLECTION", "fillingup-test"),
            ("TANKLOG_ENDPOINT", "http://localhost:8080/v1"),
        ]);
        let config = StoreConfig::from_lookup(lookup).expect("config");
        assert_eq!(config.database, "staging");
        assert_eq!(config.collection, "fillingup-test");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn missing_project_id_is_an_error() {
        let lookup = lookup_from(&[("TANKLOG_API_KEY", "key-123")]);
        let error = StoreConfig::from_lookup(lookup).expect_err("must fail");
        assert_eq!(error, ConfigError::MissingVar("TANKLOG_PROJECT_ID"));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let lookup = lookup_from(&[
            ("TANKLOG_PROJECT_ID", "my-project"),
            ("TANKLOG_API_KEY", "   "),
        ]);
        let error = StoreConfig::from_lookup(lookup).expect_err("must fail");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                name: "TANKLOG_API_KEY",
                ..
            }
        ));
    }
}
