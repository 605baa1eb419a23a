//! JSON-lines RPC handling for the signing bridge.
//!
//! One request per line: `{"id", "method", "params"}`. Every request gets
//! exactly one response line carrying the same `id` and either `result`
//! or `error`.

use std::collections::BTreeMap;

use dex_core::config::SignerConfig;
use dex_core::signing::{
    CancelAllTimeInForce, OrderBuilder, OrderType, TimeInForce, TxOptions, TxSigner,
    MAINNET_CHAIN_ID,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors reported back to the caller in the `error` field.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("client_not_initialized")]
    ClientNotInitialized,

    #[error("exception:missing parameter {0}")]
    MissingParam(&'static str),

    #[error("exception:invalid parameter {name}: {reason}")]
    InvalidParam {
        name: &'static str,
        reason: &'static str,
    },

    #[error("{0}")]
    Core(#[from] dex_core::Error),
}

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, error: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Request handler holding one signer per registered api key.
#[derive(Debug, Default)]
pub struct Bridge {
    signers: BTreeMap<u8, TxSigner>,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every api key of a configuration up front.
    pub fn preload(&mut self, config: &SignerConfig) -> Result<(), BridgeError> {
        let signer = TxSigner::new(config)?;
        for index in signer.api_key_indices() {
            self.signers.insert(index, signer.with_api_key(index)?);
        }
        info!(keys = self.signers.len(), "Preloaded api keys");
        Ok(())
    }

    /// Registered api key indices, ascending.
    pub fn api_key_indices(&self) -> Vec<u8> {
        self.signers.keys().copied().collect()
    }

    /// Handle one input line. Blank lines produce no response.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed request line");
                return Some(Response::err(Value::Null, format!("invalid_json:{}", e)));
            }
        };

        Some(self.handle(request))
    }

    pub fn handle(&mut self, request: Request) -> Response {
        let Request { id, method, params } = request;
        let method = method.unwrap_or_default();
        debug!(method = %method, "Handling request");

        let outcome = match method.as_str() {
            "create_client" => self.create_client(&params),
            "sign_create_order" => self.sign_create_order(&params),
            "sign_cancel_order" => self.sign_cancel_order(&params),
            "sign_cancel_all" => self.sign_cancel_all(&params),
            "create_auth_token" => self.create_auth_token(&params),
            _ => return Response::err(id, format!("unknown_method:{}", method)),
        };

        match outcome {
            Ok(result) => Response::ok(id, result),
            Err(e) => {
                warn!(method = %method, error = %e, "Request rejected");
                Response::err(id, e.to_string())
            }
        }
    }

    /// Register the key carried in `params` if any, then return the signer
    /// for the requested api key.
    fn ensure_client(&mut self, params: &Map<String, Value>) -> Result<TxSigner, BridgeError> {
        let api_key_index: u8 = required(params, "apiKeyIndex")?;

        if let Some(private_key) = string_param(params, "privateKey")? {
            let chain_id = optional(params, "chainId")?.unwrap_or(MAINNET_CHAIN_ID);
            let account_index: i64 = required(params, "accountIndex")?;
            let signer =
                TxSigner::from_private_key(chain_id, account_index, api_key_index, &private_key)?;
            info!(chain_id, account_index, api_key_index, "Registered api key");
            self.signers.insert(api_key_index, signer);
        }

        self.signers
            .get(&api_key_index)
            .cloned()
            .ok_or(BridgeError::ClientNotInitialized)
    }

    fn create_client(&mut self, params: &Map<String, Value>) -> Result<Value, BridgeError> {
        self.ensure_client(params)?;
        Ok(Value::String("ok".to_string()))
    }

    fn sign_create_order(&mut self, params: &Map<String, Value>) -> Result<Value, BridgeError> {
        let signer = self.ensure_client(params)?;

        let builder = OrderBuilder::new()
            .market_index(required(params, "marketIndex")?)
            .client_order_index(required(params, "clientOrderIndex")?)
            .base_amount(required(params, "baseAmount")?)
            .price(required(params, "price")?)
            .order_type(OrderType::try_from(required::<u8>(params, "orderType")?)?)
            .time_in_force(TimeInForce::try_from(required::<u8>(
                params,
                "timeInForce",
            )?)?)
            .reduce_only(optional_flag(params, "reduceOnly")?.unwrap_or(false))
            .trigger_price(optional(params, "triggerPrice")?.unwrap_or(0));
        let builder = match optional(params, "orderExpiry")? {
            Some(expiry) => builder.order_expiry(expiry),
            None => builder,
        };
        let builder = if flag(params, "isAsk")? {
            builder.ask()
        } else {
            builder.bid()
        };

        let signed = signer.sign_create_order(&builder.build()?, tx_options(params)?)?;
        Ok(Value::String(signed.tx_info))
    }

    fn sign_cancel_order(&mut self, params: &Map<String, Value>) -> Result<Value, BridgeError> {
        let signer = self.ensure_client(params)?;
        let signed = signer.sign_cancel_order(
            required(params, "marketIndex")?,
            required(params, "orderIndex")?,
            tx_options(params)?,
        )?;
        Ok(Value::String(signed.tx_info))
    }

    fn sign_cancel_all(&mut self, params: &Map<String, Value>) -> Result<Value, BridgeError> {
        let signer = self.ensure_client(params)?;
        let time_in_force = CancelAllTimeInForce::try_from(required::<u8>(params, "timeInForce")?)?;
        let signed = signer.sign_cancel_all_orders(
            time_in_force,
            required(params, "scheduledTime")?,
            tx_options(params)?,
        )?;
        Ok(Value::String(signed.tx_info))
    }

    fn create_auth_token(&mut self, params: &Map<String, Value>) -> Result<Value, BridgeError> {
        let signer = self.ensure_client(params)?;
        // Passed through unchanged: the signer reads it as unix seconds.
        let deadline: i64 = optional(params, "deadlineMs")?.unwrap_or(0);
        if deadline < 0 {
            return Err(BridgeError::InvalidParam {
                name: "deadlineMs",
                reason: "must not be negative",
            });
        }
        let token = signer.create_auth_token(deadline)?;
        Ok(Value::String(token))
    }
}

fn tx_options(params: &Map<String, Value>) -> Result<TxOptions, BridgeError> {
    let opts = TxOptions::new(required(params, "nonce")?);
    Ok(match optional(params, "expiredAt")? {
        Some(expired_at) => opts.expired_at(expired_at),
        None => opts,
    })
}

/// Integer parameter given as a JSON number, a numeric string or a bool.
fn int_param(params: &Map<String, Value>, name: &'static str) -> Result<Option<i64>, BridgeError> {
    let invalid = || BridgeError::InvalidParam {
        name,
        reason: "not an integer",
    };
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(Value::Bool(b)) => Ok(Some(i64::from(*b))),
        Some(_) => Err(invalid()),
    }
}

fn optional<T: TryFrom<i64>>(
    params: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<T>, BridgeError> {
    int_param(params, name)?
        .map(|value| {
            T::try_from(value).map_err(|_| BridgeError::InvalidParam {
                name,
                reason: "out of range",
            })
        })
        .transpose()
}

fn required<T: TryFrom<i64>>(
    params: &Map<String, Value>,
    name: &'static str,
) -> Result<T, BridgeError> {
    optional(params, name)?.ok_or(BridgeError::MissingParam(name))
}

fn optional_flag(
    params: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<bool>, BridgeError> {
    match int_param(params, name)? {
        None => Ok(None),
        Some(0) => Ok(Some(false)),
        Some(1) => Ok(Some(true)),
        Some(_) => Err(BridgeError::InvalidParam {
            name,
            reason: "expected 0 or 1",
        }),
    }
}

fn flag(params: &Map<String, Value>, name: &'static str) -> Result<bool, BridgeError> {
    optional_flag(params, name)?.ok_or(BridgeError::MissingParam(name))
}

fn string_param(
    params: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, BridgeError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(BridgeError::InvalidParam {
            name,
            reason: "not a string",
        }),
    }
}
