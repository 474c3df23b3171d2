use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Runtime configuration, layered as defaults < `SHOPDB_*` environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("SHOPDB_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_in_memory_database() {
        figment::Jail::expect_with(|_jail| {
            let cfg = Config::load()?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.database_url, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SHOPDB_DATABASE_URL", "sqlite:shop.db");
            jail.set_env("SHOPDB_LOGLEVEL", "debug");
            let cfg = Config::load()?;
            assert_eq!(cfg.database_url, "sqlite:shop.db");
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }
}
