use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration, merged from defaults and `HV_*` environment
/// variables (e.g. `HV_DATABASE_URL`, `HV_BIND_ADDR`, `HV_LOGLEVEL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:healthvault.sqlite".to_string(),
            bind_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("HV_"))
            .extract()
            .unwrap_or_else(|e| {
                eprintln!("invalid configuration: {e}; falling back to defaults");
                Config::default()
            })
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
