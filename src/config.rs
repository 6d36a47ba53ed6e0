use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::VendError;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "drink-vend.toml";

pub const ACCESS_KEY_ID_VAR: &str = "ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "SECRET_ACCESS_KEY";

/// Main configuration structure for drink-vend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DrinkVendConfig {
    /// AWS connection settings
    pub aws: AwsConfig,
    /// State machines and activity queue
    pub workflows: WorkflowConfig,
    /// Drinks table settings
    pub store: StoreConfig,
    /// Status polling settings
    pub polling: PollingConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AwsConfig {
    pub region: String,
    /// Override for the service endpoint (e.g. a local emulator)
    pub endpoint_url: Option<String>,
    /// Access key id (can be set via ACCESS_KEY_ID)
    pub access_key_id: Option<String>,
    /// Secret access key (can be set via SECRET_ACCESS_KEY)
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Express state machine run synchronously by `buy`
    pub purchase_state_machine: String,
    /// Standard state machine driven by `relay`
    pub relay_state_machine: String,
    /// Activity the relay state machine raises for human input
    pub input_activity: String,
    /// Fixed execution name for purchases; a unique one is generated when unset
    pub purchase_execution_name: Option<String>,
    /// Sub-results printed after a successful purchase, in order
    pub purchase_result_keys: Vec<String>,
    /// Sub-results printed after a successful relay execution, in order
    pub relay_result_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub drinks_table: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Delay between execution status polls
    pub status_interval_ms: u64,
    /// Delay before re-checking an execution after answering a non-final activity
    pub settle_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit structured JSON logs instead of compact text
    pub json_logs: bool,
}

/// Credentials checked before any network call is made
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

impl Default for DrinkVendConfig {
    fn default() -> Self {
        Self {
            aws: AwsConfig {
                region: "us-east-1".to_string(),
                endpoint_url: None,
                access_key_id: None, // Read from ACCESS_KEY_ID or .env
                secret_access_key: None,
            },
            workflows: WorkflowConfig {
                purchase_state_machine: "arn:aws:states:us-east-1:874930755828:stateMachine:BuyDrink"
                    .to_string(),
                relay_state_machine: "arn:aws:states:us-east-1:874930755828:stateMachine:BuyDrinkV2"
                    .to_string(),
                input_activity: "arn:aws:states:us-east-1:874930755828:activity:get-input".to_string(),
                purchase_execution_name: None,
                purchase_result_keys: vec![
                    "takeMoneyResult".to_string(),
                    "transactionInfo".to_string(),
                ],
                relay_result_keys: vec![
                    "takeMoneyResult".to_string(),
                    "serveDrinkResult".to_string(),
                ],
            },
            store: StoreConfig {
                drinks_table: "drinks".to_string(),
            },
            polling: PollingConfig {
                status_interval_ms: 500,
                settle_delay_ms: 250,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: true,
            },
        }
    }
}

impl DrinkVendConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`path`, or drink-vend.toml if present)
    /// 3. Environment variables (prefixed with DRINK_VEND__)
    /// 4. ACCESS_KEY_ID / SECRET_ACCESS_KEY for credentials still unset
    pub fn load(path: Option<&Path>) -> Result<Self, VendError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix("DRINK_VEND")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: DrinkVendConfig = builder.build()?.try_deserialize()?;
        config.fill_credentials_from(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load .env from the working directory if it exists. Runs before
    /// logging is set up, so it reports whether a file was loaded instead of
    /// logging it.
    pub fn load_env_file() -> Result<bool, VendError> {
        Self::load_env_file_from(Path::new(".env"))
    }

    pub fn load_env_file_from(path: &Path) -> Result<bool, VendError> {
        if !path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(path).map_err(|e| VendError::Io(std::io::Error::other(e)))?;
        Ok(true)
    }

    /// Fill unset credentials from the given variable lookup
    pub fn fill_credentials_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.aws.access_key_id.is_none() {
            self.aws.access_key_id = lookup(ACCESS_KEY_ID_VAR);
        }
        if self.aws.secret_access_key.is_none() {
            self.aws.secret_access_key = lookup(SECRET_ACCESS_KEY_VAR);
        }
    }

    /// Both credential values, or the first one that is missing or empty
    pub fn credentials(&self) -> Result<StaticCredentials, VendError> {
        let access_key_id = non_empty(&self.aws.access_key_id).ok_or(VendError::MissingCredential {
            name: ACCESS_KEY_ID_VAR,
        })?;
        let secret_access_key =
            non_empty(&self.aws.secret_access_key).ok_or(VendError::MissingCredential {
                name: SECRET_ACCESS_KEY_VAR,
            })?;

        Ok(StaticCredentials {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }

    pub fn status_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.polling.status_interval_ms)
    }

    pub fn settle_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.polling.settle_delay_ms)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_point_at_vending_workflows() {
        let config = DrinkVendConfig::default();
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.store.drinks_table, "drinks");
        assert_eq!(config.polling.status_interval_ms, 500);
        assert_eq!(config.polling.settle_delay_ms, 250);
        assert_eq!(
            config.workflows.relay_result_keys,
            vec!["takeMoneyResult", "serveDrinkResult"]
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[aws]
region = "eu-west-2"
access_key_id = "AKIDFILE"
secret_access_key = "file-secret"

[store]
drinks_table = "drinks-staging"

[polling]
status_interval_ms = 100
"#
        )
        .unwrap();

        let config = DrinkVendConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.aws.region, "eu-west-2");
        assert_eq!(config.store.drinks_table, "drinks-staging");
        assert_eq!(config.polling.status_interval_ms, 100);
        // untouched values keep their defaults
        assert_eq!(config.polling.settle_delay_ms, 250);
        assert_eq!(config.credentials().unwrap().access_key_id, "AKIDFILE");
    }

    #[test]
    fn test_credentials_filled_from_lookup_only_when_unset() {
        let mut config = DrinkVendConfig::default();
        config.aws.access_key_id = Some("from-config".to_string());
        config.fill_credentials_from(|name| match name {
            ACCESS_KEY_ID_VAR => Some("from-env".to_string()),
            SECRET_ACCESS_KEY_VAR => Some("secret-from-env".to_string()),
            _ => None,
        });

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.access_key_id, "from-config");
        assert_eq!(credentials.secret_access_key, "secret-from-env");
    }

    #[test]
    fn test_missing_or_empty_credentials_are_fatal() {
        let mut config = DrinkVendConfig::default();
        assert!(matches!(
            config.credentials(),
            Err(VendError::MissingCredential { name: ACCESS_KEY_ID_VAR })
        ));

        config.aws.access_key_id = Some("AKID".to_string());
        config.aws.secret_access_key = Some("   ".to_string());
        assert!(matches!(
            config.credentials(),
            Err(VendError::MissingCredential { name: SECRET_ACCESS_KEY_VAR })
        ));
    }

    #[test]
    fn test_env_file_is_reported_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        assert!(!DrinkVendConfig::load_env_file_from(&path).unwrap());

        std::fs::write(&path, "DRINK_VEND_ENV_FILE_MARKER=loaded\n").unwrap();
        assert!(DrinkVendConfig::load_env_file_from(&path).unwrap());
        assert_eq!(std::env::var("DRINK_VEND_ENV_FILE_MARKER").unwrap(), "loaded");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = StaticCredentials {
            access_key_id: "AKID".to_string(),
            secret_access_key: "hunter2".to_string(),
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
