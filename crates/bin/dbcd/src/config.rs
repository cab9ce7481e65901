//! Runtime settings for `dbcd`.
//!
//! Settings resolve in three layers: built-in defaults, then the TOML file
//! (`dbc.toml`, or whatever `DBC_CONFIG` names), then individual `DBC_*`
//! environment variables. The merged result is validated once, before any
//! resource is opened.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File read when `DBC_CONFIG` is unset. Its absence is not an error.
const DEFAULT_CONFIG_PATH: &str = "dbc.toml";
/// Environment variable naming an explicit config file, which must exist.
const CONFIG_PATH_VAR: &str = "DBC_CONFIG";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite:dbc.db?mode=rwc";
const DEFAULT_LOG_FILTER: &str = "dbcd=info,dbc=info,tower_http=debug";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

/// `[server]`: where the HTTP listener binds.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

/// `[database]`
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

/// `[logging]`: an `EnvFilter` directive string.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub filter: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: dbc_adapter_storage_sqlite_sqlx::pool::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Setter for one environment override. Receives the raw variable value.
type Apply = fn(&mut Config, &str) -> Result<(), String>;

/// Environment overrides in application order. `RUST_LOG` comes after
/// `DBC_LOG`, and `DBC_BIND` after `DBC_HOST`/`DBC_PORT`, so they win.
const ENV_OVERRIDES: &[(&str, Apply)] = &[
    ("DBC_HOST", set_host),
    ("DBC_PORT", set_port),
    ("DBC_BIND", set_bind),
    ("DBC_DATABASE_URL", set_database_url),
    ("DBC_DATABASE_MAX_CONNECTIONS", set_max_connections),
    ("DBC_LOG", set_log_filter),
    ("RUST_LOG", set_log_filter),
];

fn set_host(config: &mut Config, value: &str) -> Result<(), String> {
    value.clone_into(&mut config.server.host);
    Ok(())
}

fn set_port(config: &mut Config, value: &str) -> Result<(), String> {
    config.server.port = value.parse().map_err(|err| format!("not a number: {err}"))?;
    Ok(())
}

fn set_bind(config: &mut Config, value: &str) -> Result<(), String> {
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| "expected host:port".to_owned())?;
    set_port(config, port)?;
    set_host(config, host)
}

fn set_database_url(config: &mut Config, value: &str) -> Result<(), String> {
    value.clone_into(&mut config.database.url);
    Ok(())
}

fn set_max_connections(config: &mut Config, value: &str) -> Result<(), String> {
    config.database.max_connections = value
        .parse()
        .map_err(|err| format!("not a number: {err}"))?;
    Ok(())
}

fn set_log_filter(config: &mut Config, value: &str) -> Result<(), String> {
    value.clone_into(&mut config.logging.filter);
    Ok(())
}

impl Config {
    /// Resolve settings from the process environment and working directory.
    ///
    /// # Errors
    ///
    /// See [`Config::resolve`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve settings, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing, a file cannot be read
    /// or parsed, an override has an unparseable value, or the merged
    /// settings are out of range.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::read(Path::new(&path))?,
            None => Self::read_optional(Path::new(DEFAULT_CONFIG_PATH))?,
        };
        config.override_from(&lookup)?;
        config.check()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    fn read_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::read(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn override_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        for &(key, apply) in ENV_OVERRIDES {
            if let Some(value) = lookup(key) {
                apply(self, &value).map_err(|reason| ConfigError::Env { key, value, reason })?;
            }
        }
        Ok(())
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::OutOfRange("server.port"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::OutOfRange("database.max_connections"));
        }
        Ok(())
    }

    /// `host:port` string accepted by `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{key}={value:?}: {reason}")]
    Env {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be non-zero")]
    OutOfRange(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn from_toml(text: &str) -> Config {
        Config::parse(Path::new("test.toml"), text).unwrap()
    }

    #[test]
    fn should_fall_back_to_builtin_values_when_nothing_configured() {
        let config = from_toml("");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "sqlite:dbc.db?mode=rwc");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.filter, "dbcd=info,dbc=info,tower_http=debug");
    }

    #[test]
    fn should_keep_defaults_for_sections_left_out_of_the_file() {
        let config = from_toml("[database]\nmax_connections = 2\n");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.url, "sqlite:dbc.db?mode=rwc");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_read_every_section_from_the_file() {
        let config = from_toml(
            "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'
            max_connections = 2

            [logging]
            filter = 'debug'
            ",
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_reject_unknown_keys_in_the_file() {
        let result = Config::parse(Path::new("dbc.toml"), "[server]\nprot = 80\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn should_fail_when_explicit_config_file_missing() {
        let result = Config::resolve(env(&[(CONFIG_PATH_VAR, "does/not/exist.toml")]));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn should_apply_environment_over_file_values() {
        let mut config = from_toml("[server]\nport = 9090\n");
        config
            .override_from(env(&[
                ("DBC_PORT", "7000"),
                ("DBC_DATABASE_URL", "sqlite::memory:"),
                ("DBC_DATABASE_MAX_CONNECTIONS", "1"),
                ("DBC_LOG", "trace"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_let_bind_win_over_host_and_port() {
        let mut config = Config::default();
        config
            .override_from(env(&[
                ("DBC_HOST", "10.0.0.1"),
                ("DBC_PORT", "1234"),
                ("DBC_BIND", "127.0.0.1:4000"),
            ]))
            .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn should_let_rust_log_win_over_dbc_log() {
        let mut config = Config::default();
        config
            .override_from(env(&[("DBC_LOG", "info"), ("RUST_LOG", "debug")]))
            .unwrap();
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_name_the_variable_when_override_unparseable() {
        let mut config = Config::default();
        let err = config
            .override_from(env(&[("DBC_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "DBC_PORT", .. }));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_reject_bind_without_port() {
        let mut config = Config::default();
        let err = config
            .override_from(env(&[("DBC_BIND", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "DBC_BIND", .. }));
    }

    #[test]
    fn should_reject_zero_port_and_zero_pool_size() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.check(), Err(ConfigError::OutOfRange("server.port"))));

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(
            config.check(),
            Err(ConfigError::OutOfRange("database.max_connections"))
        ));

        assert!(Config::default().check().is_ok());
    }
}
