//! Transaction types for exchange signing.
//!
//! Each transaction is hashed as a fixed sequence of Goldilocks field
//! elements (chain id and transaction type first) and serialized for
//! submission as the JSON `tx_info` form field.

use goldilocks_crypto::{hash_to_fp5, Fp, Fp5, Signature};
use serde::{Deserialize, Serialize};

use super::domain::{
    check_api_key_index, CancelAllTimeInForce, OrderType, TimeInForce, TX_TYPE_CANCEL_ALL_ORDERS,
    TX_TYPE_CANCEL_ORDER, TX_TYPE_CREATE_ORDER,
};
use crate::{Error, Result};

/// Integers beyond the IEEE 754 safe range travel as decimal strings.
pub mod safe_int {
    use serde::{Deserialize, Deserializer, Serializer};

    /// 2^53 - 1
    pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
            serializer.serialize_str(&value.to_string())
        } else {
            serializer.serialize_i64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

fn check_non_negative(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::Validation {
            message: format!("{} must be non-negative, got {}", field, value),
        });
    }
    Ok(())
}

fn check_flag(field: &str, value: u8) -> Result<()> {
    if value > 1 {
        return Err(Error::Validation {
            message: format!("{} must be 0 or 1, got {}", field, value),
        });
    }
    Ok(())
}

/// A transaction that can be hashed and signed.
pub trait TxInfo: Serialize {
    /// Numeric transaction type, hashed right after the chain id.
    const TX_TYPE: u8;

    /// Field elements hashed for this transaction, in wire order.
    fn field_elements(&self, chain_id: u32) -> Vec<Fp>;

    /// Reject values the exchange would refuse.
    fn validate(&self) -> Result<()>;

    /// Attach a signature (base64 of the 80 signature bytes).
    fn set_signature(&mut self, signature: &Signature);

    /// Transaction hash.
    fn hash(&self, chain_id: u32) -> Fp5 {
        hash_to_fp5(&self.field_elements(chain_id))
    }
}

fn encode_signature(signature: &Signature) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(signature.to_bytes())
}

/// Order parameters of a create-order transaction.
///
/// Prices and amounts are pre-scaled integers in the market's units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderInfo {
    pub market_index: u32,
    #[serde(with = "safe_int")]
    pub client_order_index: i64,
    #[serde(with = "safe_int")]
    pub base_amount: i64,
    pub price: u32,
    /// 1 for asks (sell), 0 for bids.
    pub is_ask: u8,
    #[serde(rename = "Type")]
    pub order_type: u8,
    pub time_in_force: u8,
    pub reduce_only: u8,
    pub trigger_price: u32,
    /// Order expiry in ms; 0 for immediate orders.
    #[serde(with = "safe_int")]
    pub order_expiry: i64,
}

impl OrderInfo {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("client order index", self.client_order_index)?;
        check_non_negative("base amount", self.base_amount)?;
        check_non_negative("order expiry", self.order_expiry)?;
        check_flag("is_ask", self.is_ask)?;
        check_flag("reduce_only", self.reduce_only)?;
        OrderType::try_from(self.order_type)?;
        TimeInForce::try_from(self.time_in_force)?;
        Ok(())
    }
}

/// Order builder for creating orders with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    market_index: u32,
    client_order_index: i64,
    base_amount: Option<i64>,
    price: Option<u32>,
    is_ask: bool,
    order_type: OrderType,
    time_in_force: TimeInForce,
    reduce_only: bool,
    trigger_price: u32,
    order_expiry: i64,
}

impl OrderBuilder {
    /// Create a new order builder: a GTT limit bid with the default expiry.
    pub fn new() -> Self {
        Self {
            order_expiry: super::domain::DEFAULT_ORDER_EXPIRY,
            ..Self::default()
        }
    }

    pub fn market_index(mut self, market_index: u32) -> Self {
        self.market_index = market_index;
        self
    }

    pub fn client_order_index(mut self, index: i64) -> Self {
        self.client_order_index = index;
        self
    }

    /// Set the size in base-asset units.
    pub fn base_amount(mut self, amount: i64) -> Self {
        self.base_amount = Some(amount);
        self
    }

    pub fn price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    /// Sell side.
    pub fn ask(mut self) -> Self {
        self.is_ask = true;
        self
    }

    /// Buy side.
    pub fn bid(mut self) -> Self {
        self.is_ask = false;
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn trigger_price(mut self, trigger_price: u32) -> Self {
        self.trigger_price = trigger_price;
        self
    }

    /// Set the order expiry in ms; -1 resolves to the default at signing.
    pub fn order_expiry(mut self, order_expiry: i64) -> Self {
        self.order_expiry = order_expiry;
        self
    }

    /// Build the order info.
    ///
    /// Fails if base amount or price is missing.
    pub fn build(self) -> Result<OrderInfo> {
        let base_amount = self.base_amount.ok_or_else(|| Error::Validation {
            message: "base amount is required".to_string(),
        })?;
        let price = self.price.ok_or_else(|| Error::Validation {
            message: "price is required".to_string(),
        })?;

        Ok(OrderInfo {
            market_index: self.market_index,
            client_order_index: self.client_order_index,
            base_amount,
            price,
            is_ask: self.is_ask as u8,
            order_type: self.order_type.as_u8(),
            time_in_force: self.time_in_force.as_u8(),
            reduce_only: self.reduce_only as u8,
            trigger_price: self.trigger_price,
            order_expiry: self.order_expiry,
        })
    }
}

/// Signed create-order transaction as submitted to the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOrderTxInfo {
    #[serde(with = "safe_int")]
    pub account_index: i64,
    pub api_key_index: u8,
    pub order_info: OrderInfo,
    #[serde(with = "safe_int")]
    pub expired_at: i64,
    #[serde(with = "safe_int")]
    pub nonce: i64,
    /// Base64 signature; empty until signed.
    pub sig: String,
}

impl TxInfo for CreateOrderTxInfo {
    const TX_TYPE: u8 = TX_TYPE_CREATE_ORDER;

    fn field_elements(&self, chain_id: u32) -> Vec<Fp> {
        let order = &self.order_info;
        vec![
            Fp::from_u32(chain_id),
            Fp::from_u32(Self::TX_TYPE as u32),
            Fp::from_i64(self.nonce),
            Fp::from_i64(self.expired_at),
            Fp::from_i64(self.account_index),
            Fp::from_u32(self.api_key_index as u32),
            Fp::from_u32(order.market_index),
            Fp::from_i64(order.client_order_index),
            Fp::from_i64(order.base_amount),
            Fp::from_u32(order.price),
            Fp::from_u32(order.is_ask as u32),
            Fp::from_u32(order.order_type as u32),
            Fp::from_u32(order.time_in_force as u32),
            Fp::from_u32(order.reduce_only as u32),
            Fp::from_u32(order.trigger_price),
            Fp::from_i64(order.order_expiry),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_header(
            self.account_index,
            self.api_key_index,
            self.expired_at,
            self.nonce,
        )?;
        self.order_info.validate()
    }

    fn set_signature(&mut self, signature: &Signature) {
        self.sig = encode_signature(signature);
    }
}

/// Signed cancel-order transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelOrderTxInfo {
    #[serde(with = "safe_int")]
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u32,
    /// Exchange-assigned order index, or the client order index.
    #[serde(with = "safe_int")]
    pub index: i64,
    #[serde(with = "safe_int")]
    pub expired_at: i64,
    #[serde(with = "safe_int")]
    pub nonce: i64,
    pub sig: String,
}

impl TxInfo for CancelOrderTxInfo {
    const TX_TYPE: u8 = TX_TYPE_CANCEL_ORDER;

    fn field_elements(&self, chain_id: u32) -> Vec<Fp> {
        vec![
            Fp::from_u32(chain_id),
            Fp::from_u32(Self::TX_TYPE as u32),
            Fp::from_i64(self.nonce),
            Fp::from_i64(self.expired_at),
            Fp::from_i64(self.account_index),
            Fp::from_u32(self.api_key_index as u32),
            Fp::from_u32(self.market_index),
            Fp::from_i64(self.index),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_header(
            self.account_index,
            self.api_key_index,
            self.expired_at,
            self.nonce,
        )?;
        check_non_negative("order index", self.index)
    }

    fn set_signature(&mut self, signature: &Signature) {
        self.sig = encode_signature(signature);
    }
}

/// Signed cancel-all-orders transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelAllOrdersTxInfo {
    #[serde(with = "safe_int")]
    pub account_index: i64,
    pub api_key_index: u8,
    pub time_in_force: u8,
    /// Scheduled cancel time in ms; 0 when immediate.
    #[serde(with = "safe_int")]
    pub time: i64,
    #[serde(with = "safe_int")]
    pub expired_at: i64,
    #[serde(with = "safe_int")]
    pub nonce: i64,
    pub sig: String,
}

impl TxInfo for CancelAllOrdersTxInfo {
    const TX_TYPE: u8 = TX_TYPE_CANCEL_ALL_ORDERS;

    fn field_elements(&self, chain_id: u32) -> Vec<Fp> {
        vec![
            Fp::from_u32(chain_id),
            Fp::from_u32(Self::TX_TYPE as u32),
            Fp::from_i64(self.nonce),
            Fp::from_i64(self.expired_at),
            Fp::from_i64(self.account_index),
            Fp::from_u32(self.api_key_index as u32),
            Fp::from_u32(self.time_in_force as u32),
            Fp::from_i64(self.time),
        ]
    }

    fn validate(&self) -> Result<()> {
        validate_header(
            self.account_index,
            self.api_key_index,
            self.expired_at,
            self.nonce,
        )?;
        CancelAllTimeInForce::try_from(self.time_in_force)?;
        check_non_negative("time", self.time)
    }

    fn set_signature(&mut self, signature: &Signature) {
        self.sig = encode_signature(signature);
    }
}

fn validate_header(
    account_index: i64,
    api_key_index: u8,
    expired_at: i64,
    nonce: i64,
) -> Result<()> {
    check_non_negative("account index", account_index)?;
    check_api_key_index(api_key_index)?;
    check_non_negative("expired_at", expired_at)?;
    check_non_negative("nonce", nonce)
}

/// Per-transaction options supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxOptions {
    pub nonce: i64,
    /// Absolute expiry in ms; `None` means now plus the default lifetime.
    pub expired_at: Option<i64>,
}

impl TxOptions {
    pub fn new(nonce: i64) -> Self {
        Self {
            nonce,
            expired_at: None,
        }
    }

    pub fn expired_at(mut self, expired_at: i64) -> Self {
        self.expired_at = Some(expired_at);
        self
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTx {
    /// Numeric transaction type (form field `tx_type`).
    pub tx_type: u8,
    /// JSON transaction body (form field `tx_info`).
    pub tx_info: String,
    /// Hex of the 40-byte transaction hash, for logging.
    pub tx_hash: String,
}

impl SignedTx {
    pub fn new<T: TxInfo>(tx: &T, tx_hash: &Fp5) -> Result<Self> {
        Ok(Self {
            tx_type: T::TX_TYPE,
            tx_info: serde_json::to_string(tx)?,
            tx_hash: hex::encode(tx_hash.to_bytes_le()),
        })
    }
}
