//! Application-level configuration: listening port and game store backend.

use std::{env, fs, io::ErrorKind, path::PathBuf, str::FromStr};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAME_CATALOG_CONFIG_PATH";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "game_catalog";

/// Which document database backs the game collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MongoDB, `games` collection.
    #[default]
    Mongo,
    /// CouchDB, `game::<id>` documents.
    Couch,
    /// Process-local map; data is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "couch" | "couchdb" => Ok(Self::Couch),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend `{other}`")),
        }
    }
}

/// MongoDB connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    /// `mongodb://` connection string.
    pub uri: String,
    /// Database holding the `games` collection.
    pub database: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".into(),
            database: DEFAULT_DATABASE.into(),
        }
    }
}

/// CouchDB connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CouchSettings {
    /// Server root, e.g. `http://localhost:5984`.
    pub base_url: String,
    /// Database name, created on first connection.
    pub database: String,
    /// Basic-auth user, only used together with `password`.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
}

impl Default for CouchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5984".into(),
            database: DEFAULT_DATABASE.into(),
            username: None,
            password: None,
        }
    }
}

/// Immutable runtime configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,
    /// Selected game store backend.
    pub storage: StorageBackend,
    /// Used when `storage` is `mongo`.
    pub mongo: MongoSettings,
    /// Used when `storage` is `couch`.
    pub couch: CouchSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: StorageBackend::default(),
            mongo: MongoSettings::default(),
            couch: CouchSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load the configuration file (falling back to defaults) and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    fn from_file() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        storage = ?config.storage,
                        "loaded configuration file"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Override file values with the variables returned by `lookup`.
    ///
    /// Recognised keys: `PORT` (or `SERVER_PORT`), `STORAGE_BACKEND`, `MONGO_URI`, `MONGO_DB`,
    /// `COUCH_BASE_URL`, `COUCH_DB`, and `COUCH_USERNAME` with `COUCH_PASSWORD`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            match raw.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(err) => warn!(value = %raw, error = %err, "ignoring invalid port override"),
            }
        }

        if let Some(raw) = lookup("STORAGE_BACKEND") {
            match raw.parse::<StorageBackend>() {
                Ok(backend) => self.storage = backend,
                Err(err) => warn!(error = %err, "ignoring invalid storage backend override"),
            }
        }

        if let Some(uri) = lookup("MONGO_URI") {
            self.mongo.uri = uri;
        }
        if let Some(database) = lookup("MONGO_DB") {
            self.mongo.database = database;
        }
        if let Some(base_url) = lookup("COUCH_BASE_URL") {
            self.couch.base_url = base_url;
        }
        if let Some(database) = lookup("COUCH_DB") {
            self.couch.database = database;
        }
        if let (Some(username), Some(password)) = (lookup("COUCH_USERNAME"), lookup("COUCH_PASSWORD"))
        {
            self.couch.username = Some(username);
            self.couch.password = Some(password);
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_target_a_local_mongo() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Mongo);
        assert_eq!(config.mongo.uri, "mongodb://localhost:27017");
        assert_eq!(config.mongo.database, "game_catalog");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config: AppConfig =
            serde_json::from_str(r#"{"storage": "couch", "couch": {"database": "retro"}}"#)
                .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage, StorageBackend::Couch);
        assert_eq!(config.couch.database, "retro");
        assert_eq!(config.couch.base_url, "http://localhost:5984");
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config: AppConfig = serde_json::from_str("{}").unwrap();
        config.apply_overrides(lookup(&[
            ("SERVER_PORT", "9000"),
            ("STORAGE_BACKEND", "MongoDB"),
            ("MONGO_URI", "mongodb://db:27017"),
            ("MONGO_DB", "test"),
        ]));

        assert_eq!(config.port, 9000);
        assert_eq!(config.storage, StorageBackend::Mongo);
        assert_eq!(config.mongo.uri, "mongodb://db:27017");
        assert_eq!(config.mongo.database, "test");
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut config: AppConfig = serde_json::from_str(r#"{"storage": "memory"}"#).unwrap();
        config.apply_overrides(lookup(&[("PORT", "http"), ("STORAGE_BACKEND", "redis")]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn couch_credentials_require_both_values() {
        let mut config: AppConfig = serde_json::from_str("{}").unwrap();
        config.apply_overrides(lookup(&[("COUCH_USERNAME", "admin")]));
        assert!(config.couch.username.is_none());

        config.apply_overrides(lookup(&[("COUCH_USERNAME", "admin"), ("COUCH_PASSWORD", "pw")]));
        assert_eq!(config.couch.username.as_deref(), Some("admin"));
        assert_eq!(config.couch.password.as_deref(), Some("pw"));
    }
}
