use anyhow::{anyhow, Context};

/// Worker configuration loaded from environment variables.
///
/// | Env Var              | Default    |
/// |----------------------|------------|
/// | `DATABASE_URL`       | (required) |
/// | `DB_MAX_CONNECTIONS` | `20`       |
/// | `RUN_MIGRATIONS`     | `true`     |
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
}

impl WorkerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let db_max_connections: u32 = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "20".into())
            .parse()
            .context("DB_MAX_CONNECTIONS must be a valid u32")?;

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(value) => parse_flag(&value)
                .ok_or_else(|| anyhow!("RUN_MIGRATIONS must be true or false, got '{value}'"))?,
        };

        Ok(Self {
            database_url,
            db_max_connections,
            run_migrations,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply() {
        let env = [("DATABASE_URL", "postgres://localhost/cw")];
        let config = WorkerConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(config.db_max_connections, 20);
        assert!(config.run_migrations);
    }

    #[test]
    fn database_url_is_required() {
        let err = WorkerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = WorkerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/cw"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();
        assert_eq!(config.db_max_connections, 5);
        assert!(!config.run_migrations);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(WorkerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/cw"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .is_err());
        assert!(WorkerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/cw"),
            ("RUN_MIGRATIONS", "sometimes"),
        ]))
        .is_err());
    }
}
