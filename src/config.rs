use crate::error::ProvisionError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `DEVDB_DB_PORT=6543`.
pub const ENV_PREFIX: &str = "DEVDB_";

/// Keys whose environment value is taken verbatim. `Env` parses values, so
/// `DEVDB_DB_PASSWORD=123456` would otherwise arrive as a number.
const STRING_KEYS: [&str; 8] = [
    "docker_bin",
    "compose_file",
    "container_name",
    "db_host",
    "db_user",
    "db_password",
    "db_name",
    "loglevel",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Container CLI, resolved on `PATH` unless absolute.
    pub docker_bin: String,
    /// Compose file name in the working directory; auto-discovered when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_file: Option<String>,
    pub container_name: String,
    pub ready_wait_secs: u64,
    pub ready_retries: usize,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            compose_file: None,
            container_name: "devdb-postgres".to_string(),
            ready_wait_secs: 5,
            ready_retries: 3,
            db_host: "127.0.0.1".to_string(),
            db_port: 5432,
            db_user: "devdb".to_string(),
            db_password: "devdb".to_string(),
            db_name: "devdb".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults layered under `DEVDB_*` environment variables.
    pub fn figment() -> Figment {
        Self::layered(Env::prefixed(ENV_PREFIX))
    }

    fn layered(env: Env) -> Figment {
        let verbatim: Vec<(String, String)> = env
            .iter()
            .filter(|(key, _)| STRING_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();

        verbatim.into_iter().fold(
            Figment::from(Serialized::defaults(Config::default())).merge(env),
            |figment, (key, value)| figment.merge(Serialized::default(&key, value)),
        )
    }

    pub fn load() -> Result<Self, ProvisionError> {
        Ok(Self::figment().extract()?)
    }

    pub fn ready_wait(&self) -> Duration {
        Duration::from_secs(self.ready_wait_secs)
    }
}
