//! Configuration management for the transaction signer.

use crate::signing::domain::MAINNET_CHAIN_ID;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Signer configuration: one account and its api keys.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: u32,
    pub account_index: i64,
    /// Api key used unless another is selected per call.
    pub api_key_index: u8,
    pub api_keys: Vec<ApiKeyConfig>,
}

/// A private key bound to an api key slot.
#[derive(Clone, Deserialize)]
pub struct ApiKeyConfig {
    pub index: u8,
    /// 40-byte little-endian hex, optionally prefixed with "0x".
    pub private_key: String,
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("ApiKeyConfig")
            .field("index", &self.index)
            .finish()
    }
}

fn default_chain_id() -> u32 {
    MAINNET_CHAIN_ID
}

impl SignerConfig {
    /// Configuration with a single api key.
    pub fn single(
        chain_id: u32,
        account_index: i64,
        api_key_index: u8,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            account_index,
            api_key_index,
            api_keys: vec![ApiKeyConfig {
                index: api_key_index,
                private_key: private_key.into(),
            }],
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `SIGNER_CHAIN_ID` (default mainnet), `SIGNER_ACCOUNT_INDEX`,
    /// `SIGNER_API_KEY_INDEX`, `SIGNER_PRIVATE_KEY` and the optional
    /// `SIGNER_PRIVATE_KEYS` list (`index=hex,index=hex`).
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from a variable lookup, so parsing can be exercised without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chain_id = match lookup("SIGNER_CHAIN_ID") {
            Some(value) => parse_var("SIGNER_CHAIN_ID", &value)?,
            None => MAINNET_CHAIN_ID,
        };
        let account_index = parse_var(
            "SIGNER_ACCOUNT_INDEX",
            &require(&lookup, "SIGNER_ACCOUNT_INDEX")?,
        )?;
        let api_key_index: u8 = parse_var(
            "SIGNER_API_KEY_INDEX",
            &require(&lookup, "SIGNER_API_KEY_INDEX")?,
        )?;

        let mut api_keys = Vec::new();
        if let Some(private_key) = lookup("SIGNER_PRIVATE_KEY") {
            api_keys.push(ApiKeyConfig {
                index: api_key_index,
                private_key,
            });
        }
        if let Some(list) = lookup("SIGNER_PRIVATE_KEYS") {
            api_keys.extend(parse_private_keys(&list)?);
        }

        if api_keys.is_empty() {
            return Err(Error::Config {
                message: "SIGNER_PRIVATE_KEY or SIGNER_PRIVATE_KEYS environment variable not set"
                    .to_string(),
            });
        }

        Ok(Self {
            chain_id,
            account_index,
            api_key_index,
            api_keys,
        })
    }

    /// Load configuration from a file (format chosen by extension), with
    /// `SIGNER_*` environment variables overriding scalar fields.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("SIGNER").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn require<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| Error::Config {
        message: format!("{} environment variable not set", name),
    })
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Config {
        message: format!("{} has an invalid value: {:?}", name, value),
    })
}

/// Parse `index=hex` pairs separated by commas.
pub fn parse_private_keys(list: &str) -> Result<Vec<ApiKeyConfig>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (index, key) = entry.split_once('=').ok_or_else(|| Error::Config {
                message: "SIGNER_PRIVATE_KEYS entries must look like index=hex".to_string(),
            })?;
            Ok(ApiKeyConfig {
                index: parse_var("SIGNER_PRIVATE_KEYS index", index)?,
                private_key: key.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY_A: &str =
        "ed636277f3753b6c0275f7a28c2678a7f3a95655e09deaebec15179b50c5da7f903152e50f594f7b";

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_single_key() {
        let config = SignerConfig::from_lookup(lookup_from(&[
            ("SIGNER_CHAIN_ID", "300"),
            ("SIGNER_ACCOUNT_INDEX", "65"),
            ("SIGNER_API_KEY_INDEX", "3"),
            ("SIGNER_PRIVATE_KEY", KEY_A),
        ]))
        .unwrap();

        assert_eq!(config.chain_id, 300);
        assert_eq!(config.account_index, 65);
        assert_eq!(config.api_key_index, 3);
        assert_eq!(config.api_keys.len(), 1);
        assert_eq!(config.api_keys[0].index, 3);
    }

    #[test]
    fn test_from_lookup_key_list_and_default_chain() {
        let config = SignerConfig::from_lookup(lookup_from(&[
            ("SIGNER_ACCOUNT_INDEX", "7"),
            ("SIGNER_API_KEY_INDEX", "4"),
            ("SIGNER_PRIVATE_KEYS", "4=aa, 5=0xbb,"),
        ]))
        .unwrap();

        assert_eq!(config.chain_id, MAINNET_CHAIN_ID);
        let indices: Vec<u8> = config.api_keys.iter().map(|k| k.index).collect();
        assert_eq!(indices, vec![4, 5]);
        assert_eq!(config.api_keys[1].private_key, "0xbb");
    }

    #[test]
    fn test_from_lookup_missing_values() {
        let result = SignerConfig::from_lookup(lookup_from(&[("SIGNER_API_KEY_INDEX", "1")]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = SignerConfig::from_lookup(lookup_from(&[
            ("SIGNER_ACCOUNT_INDEX", "1"),
            ("SIGNER_API_KEY_INDEX", "1"),
        ]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = SignerConfig::from_lookup(lookup_from(&[
            ("SIGNER_ACCOUNT_INDEX", "1"),
            ("SIGNER_API_KEY_INDEX", "300"),
            ("SIGNER_PRIVATE_KEY", KEY_A),
        ]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_private_keys_rejects_malformed() {
        assert!(parse_private_keys("3").is_err());
        assert!(parse_private_keys("x=aa").is_err());
        assert!(parse_private_keys("").unwrap().is_empty());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!(
            "dex-signer-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            format!(
                r#"
chain_id = 300
account_index = 65
api_key_index = 3

[[api_keys]]
index = 3
private_key = "{}"
"#,
                KEY_A
            ),
        )
        .unwrap();

        let config = SignerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.chain_id, 300);
        assert_eq!(config.account_index, 65);
        assert_eq!(config.api_keys[0].private_key, KEY_A);
    }

    #[test]
    fn test_from_file_missing() {
        let result = SignerConfig::from_file("/nonexistent/signer.toml");
        assert!(matches!(result, Err(Error::ConfigFile(_))));
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let config = SignerConfig::single(300, 1, 0, KEY_A);
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ApiKeyConfig"));
        assert!(!debug_str.contains("ed636277"));
    }

    #[test]
    #[ignore = "env var tests are flaky in parallel - run with --test-threads=1"]
    fn test_from_env_missing_var() {
        std::env::remove_var("SIGNER_ACCOUNT_INDEX");
        assert!(SignerConfig::from_env().is_err());
    }
}
