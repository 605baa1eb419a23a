//! Signing module for exchange transactions.
//!
//! Transactions are hashed with Poseidon2 over the Goldilocks field and
//! signed with Schnorr signatures on ECgFp5, then serialized as the JSON
//! `tx_info` the exchange API expects.
//!
//! # Architecture
//!
//! ```text
//! SignerConfig
//!       │
//!       ▼
//! TxSigner ─── signs ──► SignedTx { tx_type, tx_info, tx_hash }
//!       │                        │
//!       │                        ▼
//!       │                 sendTx form fields
//!       │
//!       └── auth token ──► "{deadline}:{account}:{api_key}:0x{sig}"
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dex_core::signing::{OrderBuilder, TxOptions, TxSigner, TESTNET_CHAIN_ID};
//!
//! let signer = TxSigner::from_private_key(TESTNET_CHAIN_ID, 65, 3, "ed63...")?;
//!
//! let order = OrderBuilder::new()
//!     .market_index(1)
//!     .client_order_index(42)
//!     .base_amount(1000)
//!     .price(50_000)
//!     .bid()
//!     .build()?;
//!
//! let signed = signer.sign_create_order(&order, TxOptions::new(5))?;
//! ```

pub mod domain;
pub mod signer;
pub mod tx_types;

pub use domain::{
    CancelAllTimeInForce, OrderType, TimeInForce, DEFAULT_AUTH_TOKEN_TTL_SECS,
    DEFAULT_ORDER_EXPIRY, DEFAULT_ORDER_EXPIRY_MS, DEFAULT_TX_EXPIRY_MS, MAINNET_CHAIN_ID,
    MAX_API_KEY_INDEX, TESTNET_CHAIN_ID, TX_TYPE_CANCEL_ALL_ORDERS, TX_TYPE_CANCEL_ORDER,
    TX_TYPE_CREATE_ORDER,
};

pub use tx_types::{
    CancelAllOrdersTxInfo, CancelOrderTxInfo, CreateOrderTxInfo, OrderBuilder, OrderInfo,
    SignedTx, TxInfo, TxOptions,
};

pub use signer::{auth_token_message, pack_message_bytes, TxSigner};
