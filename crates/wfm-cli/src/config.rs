//! Configuration loading.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use figment::value::{Uncased, UncasedStr};
use serde::Deserialize;
use thiserror::Error;

use wfm_api::Credentials;

/// Name of the config file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".wfm.yml";

/// Printed whenever the configuration is missing or unusable.
pub const TUTORIAL: &str = "\
The config is a YAML file with values for 'email', 'apiKey', and 'accountKey'.

For example, it might look like this:

email: me@company.tld
apiKey: 00000000000000000000000000000000
accountKey: 00000000000000000000000000000000

If you don't have API keys, you'll need to contact WorkflowMax for them; you
can do that at http://www.workflowmax.com/contact-us";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("no config file at {}", path.display())]
    Missing { path: PathBuf },

    #[error("invalid config in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("{} in {} cannot be empty", quoted(fields), path.display())]
    Empty {
        path: PathBuf,
        fields: Vec<&'static str>,
    },
}

fn quoted(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| format!("'{field}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Credentials for the WorkflowMax API.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Email address of your WorkflowMax staff record.
    pub email: String,

    #[serde(rename = "apiKey")]
    pub api_key: String,

    #[serde(rename = "accountKey")]
    pub account_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("api_key", &"[REDACTED]")
            .field("account_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// `~/.wfm.yml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from `config_path`, or the default location.
    ///
    /// `WFM_EMAIL`, `WFM_API_KEY` and `WFM_ACCOUNT_KEY` override the file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoHome)?,
        };

        let figment = Figment::new()
            .merge(Yaml::file(&path))
            .merge(Env::prefixed("WFM_").lowercase(false).map(env_key));

        let config: Self = match figment.extract() {
            Ok(config) => config,
            Err(_) if !path.is_file() => return Err(ConfigError::Missing { path }),
            Err(err) => {
                return Err(ConfigError::Invalid {
                    path,
                    source: Box::new(err),
                });
            }
        };

        let fields: Vec<&'static str> = [
            ("email", &config.email),
            ("apiKey", &config.api_key),
            ("accountKey", &config.account_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !fields.is_empty() {
            return Err(ConfigError::Empty { path, fields });
        }

        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            api_key: self.api_key.clone(),
            account_key: self.account_key.clone(),
        }
    }
}

/// Maps a `WFM_`-stripped variable name to its config key.
///
/// Keys keep their case so the camel-cased names survive.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let key = key.as_str();
    if key.eq_ignore_ascii_case("api_key") {
        "apiKey".into()
    } else if key.eq_ignore_ascii_case("account_key") {
        "accountKey".into()
    } else {
        key.to_ascii_lowercase().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_all_three_fields() {
        let (_dir, path) = write_config(
            "email: me@company.tld\napiKey: 0123456789abcdef\naccountKey: fedcba9876543210\n",
        );

        let config = Config::load_from(Some(&path)).unwrap();

        assert_eq!(config.email, "me@company.tld");
        assert_eq!(config.api_key, "0123456789abcdef");
        assert_eq!(config.account_key, "fedcba9876543210");
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let err = Config::load_from(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Missing { path: ref missing } if *missing == path));
    }

    #[test]
    fn missing_field_is_invalid() {
        let (_dir, path) = write_config("email: me@company.tld\napiKey: abc\n");

        let err = Config::load_from(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_yaml_is_invalid() {
        let (_dir, path) = write_config("email: [unclosed\n");

        let err = Config::load_from(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn blank_value_is_rejected() {
        let (_dir, path) = write_config("email: me@company.tld\napiKey: ' '\naccountKey: abc\n");

        let err = Config::load_from(Some(&path)).unwrap_err();

        match err {
            ConfigError::Empty { fields, .. } => assert_eq!(fields, vec!["apiKey"]),
            other => panic!("expected empty field error, got {other:?}"),
        }
    }

    #[test]
    fn every_blank_value_is_named() {
        let (_dir, path) = write_config("email: me@company.tld\napiKey: ''\naccountKey: ' '\n");

        let err = Config::load_from(Some(&path)).unwrap_err();

        assert!(
            err.to_string().starts_with("'apiKey', 'accountKey' in "),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn env_names_map_to_config_keys() {
        assert_eq!(env_key(UncasedStr::new("API_KEY")).as_str(), "apiKey");
        assert_eq!(env_key(UncasedStr::new("ACCOUNT_KEY")).as_str(), "accountKey");
        assert_eq!(env_key(UncasedStr::new("EMAIL")).as_str(), "email");
    }

    #[test]
    fn debug_redacts_keys() {
        let config = Config {
            email: "me@company.tld".to_string(),
            api_key: "api-secret".to_string(),
            account_key: "account-secret".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("api-secret"));
        assert!(!debug.contains("account-secret"));
        assert!(debug.contains("me@company.tld"));
    }

    #[test]
    fn credentials_carry_config_values() {
        let config = Config {
            email: "me@company.tld".to_string(),
            api_key: "a".to_string(),
            account_key: "b".to_string(),
        };
        let credentials = config.credentials();
        assert_eq!(credentials.email, "me@company.tld");
        assert_eq!(credentials.api_key, "a");
        assert_eq!(credentials.account_key, "b");
    }
}
