//! Transaction signing for the exchange.
//!
//! A [`TxSigner`] holds the account's api keys and signs create-order,
//! cancel-order and cancel-all transactions plus auth tokens with the
//! currently selected key.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use goldilocks_crypto::{hash_to_fp5, Fp, Fp5, Signature, SigningKey};
use tracing::{debug, info};

use super::domain::{
    check_api_key_index, CancelAllTimeInForce, DEFAULT_AUTH_TOKEN_TTL_SECS, DEFAULT_ORDER_EXPIRY,
    DEFAULT_ORDER_EXPIRY_MS, DEFAULT_TX_EXPIRY_MS,
};
use super::tx_types::{
    CancelAllOrdersTxInfo, CancelOrderTxInfo, CreateOrderTxInfo, OrderInfo, SignedTx, TxInfo,
    TxOptions,
};
use crate::config::SignerConfig;
use crate::{Error, Result};

/// Transaction signer for one account.
///
/// Immutable once built; clones share the key table.
#[derive(Clone)]
pub struct TxSigner {
    chain_id: u32,
    account_index: i64,
    api_key_index: u8,
    keys: Arc<BTreeMap<u8, SigningKey>>,
}

impl TxSigner {
    /// Build a signer from configuration.
    ///
    /// # Errors
    ///
    /// Fails when no keys are configured, an index is out of range or
    /// repeated, the default index has no key, or a key does not parse.
    pub fn new(config: &SignerConfig) -> Result<Self> {
        if config.api_keys.is_empty() {
            return Err(Error::Config {
                message: "at least one api key is required".to_string(),
            });
        }
        if config.account_index < 0 {
            return Err(Error::Config {
                message: format!(
                    "account index must be non-negative, got {}",
                    config.account_index
                ),
            });
        }

        let mut keys = BTreeMap::new();
        for entry in &config.api_keys {
            check_api_key_index(entry.index)?;
            let key = SigningKey::from_hex(&entry.private_key)?;
            if keys.insert(entry.index, key).is_some() {
                return Err(Error::Config {
                    message: format!("duplicate api key index {}", entry.index),
                });
            }
        }

        check_api_key_index(config.api_key_index)?;
        if !keys.contains_key(&config.api_key_index) {
            return Err(Error::Config {
                message: format!("no private key for api key index {}", config.api_key_index),
            });
        }

        info!(
            chain_id = config.chain_id,
            account_index = config.account_index,
            api_key_index = config.api_key_index,
            key_count = keys.len(),
            "Transaction signer initialized"
        );

        Ok(Self {
            chain_id: config.chain_id,
            account_index: config.account_index,
            api_key_index: config.api_key_index,
            keys: Arc::new(keys),
        })
    }

    /// Create a signer with a single key.
    pub fn from_private_key(
        chain_id: u32,
        account_index: i64,
        api_key_index: u8,
        private_key: &str,
    ) -> Result<Self> {
        Self::new(&SignerConfig::single(
            chain_id,
            account_index,
            api_key_index,
            private_key,
        ))
    }

    /// A signer sharing this key table but signing with another api key.
    pub fn with_api_key(&self, api_key_index: u8) -> Result<Self> {
        if !self.keys.contains_key(&api_key_index) {
            return Err(Error::Config {
                message: format!("no private key for api key index {}", api_key_index),
            });
        }
        Ok(Self {
            api_key_index,
            ..self.clone()
        })
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn account_index(&self) -> i64 {
        self.account_index
    }

    pub fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    /// Configured api key indices, ascending.
    pub fn api_key_indices(&self) -> Vec<u8> {
        self.keys.keys().copied().collect()
    }

    fn key(&self) -> Result<&SigningKey> {
        self.keys.get(&self.api_key_index).ok_or_else(|| Error::Config {
            message: format!("no private key for api key index {}", self.api_key_index),
        })
    }

    /// Public key of the selected api key.
    pub fn public_key(&self) -> Result<Fp5> {
        Ok(self.key()?.public_key())
    }

    /// Public key of the selected api key as 40-byte little-endian hex.
    pub fn public_key_hex(&self) -> Result<String> {
        Ok(self.key()?.public_key_hex())
    }

    /// Sign an arbitrary hashed message with the selected key.
    pub fn sign_hash(&self, hash: &Fp5) -> Result<Signature> {
        Ok(self.key()?.sign_random(hash))
    }

    /// Sign a create-order transaction.
    pub fn sign_create_order(&self, order: &OrderInfo, opts: TxOptions) -> Result<SignedTx> {
        let now = now_ms();
        let mut order = order.clone();
        if order.order_expiry == DEFAULT_ORDER_EXPIRY {
            order.order_expiry = now + DEFAULT_ORDER_EXPIRY_MS;
        }

        let tx = CreateOrderTxInfo {
            account_index: self.account_index,
            api_key_index: self.api_key_index,
            order_info: order,
            expired_at: resolve_expiry(opts, now),
            nonce: opts.nonce,
            sig: String::new(),
        };
        self.sign_tx(tx)
    }

    /// Sign a cancel-order transaction.
    pub fn sign_cancel_order(
        &self,
        market_index: u32,
        order_index: i64,
        opts: TxOptions,
    ) -> Result<SignedTx> {
        let tx = CancelOrderTxInfo {
            account_index: self.account_index,
            api_key_index: self.api_key_index,
            market_index,
            index: order_index,
            expired_at: resolve_expiry(opts, now_ms()),
            nonce: opts.nonce,
            sig: String::new(),
        };
        self.sign_tx(tx)
    }

    /// Sign a cancel-all-orders transaction.
    pub fn sign_cancel_all_orders(
        &self,
        time_in_force: CancelAllTimeInForce,
        time: i64,
        opts: TxOptions,
    ) -> Result<SignedTx> {
        let tx = CancelAllOrdersTxInfo {
            account_index: self.account_index,
            api_key_index: self.api_key_index,
            time_in_force: time_in_force.as_u8(),
            time,
            expired_at: resolve_expiry(opts, now_ms()),
            nonce: opts.nonce,
            sig: String::new(),
        };
        self.sign_tx(tx)
    }

    /// Validate, hash, sign and serialize a transaction.
    pub fn sign_tx<T: TxInfo>(&self, mut tx: T) -> Result<SignedTx> {
        tx.validate()?;
        let hash = tx.hash(self.chain_id);
        let signature = self.sign_hash(&hash)?;
        tx.set_signature(&signature);

        let signed = SignedTx::new(&tx, &hash)?;
        debug!(
            tx_type = signed.tx_type,
            tx_hash = %signed.tx_hash,
            api_key_index = self.api_key_index,
            "Signed transaction"
        );
        Ok(signed)
    }

    /// Create an auth token valid until `deadline` (unix seconds).
    ///
    /// A zero deadline means now plus seven hours. The token is
    /// `"{deadline}:{account}:{api_key}:0x{signature hex}"`.
    pub fn create_auth_token(&self, deadline: i64) -> Result<String> {
        if deadline < 0 {
            return Err(Error::Validation {
                message: format!("auth token deadline must not be negative, got {}", deadline),
            });
        }
        let deadline = if deadline == 0 {
            Utc::now().timestamp() + DEFAULT_AUTH_TOKEN_TTL_SECS
        } else {
            deadline
        };

        let message = auth_token_message(deadline, self.account_index, self.api_key_index);
        let hash = hash_to_fp5(&pack_message_bytes(message.as_bytes()));
        let signature = self.sign_hash(&hash)?;

        debug!(deadline, api_key_index = self.api_key_index, "Created auth token");
        Ok(format!("{}:0x{}", message, signature.to_hex()))
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn resolve_expiry(opts: TxOptions, now: i64) -> i64 {
    opts.expired_at.unwrap_or(now + DEFAULT_TX_EXPIRY_MS)
}

/// Message signed by an auth token.
pub fn auth_token_message(deadline: i64, account_index: i64, api_key_index: u8) -> String {
    format!("{}:{}:{}", deadline, account_index, api_key_index)
}

/// Pack bytes into field elements, eight little-endian bytes per element,
/// zero-padding the last one.
pub fn pack_message_bytes(bytes: &[u8]) -> Vec<Fp> {
    bytes
        .chunks(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            Fp::from_u64(u64::from_le_bytes(buf))
        })
        .collect()
}

impl std::fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose private keys in debug output
        f.debug_struct("TxSigner")
            .field("chain_id", &self.chain_id)
            .field("account_index", &self.account_index)
            .field("api_key_index", &self.api_key_index)
            .field("api_key_indices", &self.api_key_indices())
            .finish()
    }
}
