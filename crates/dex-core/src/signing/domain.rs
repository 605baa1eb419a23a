//! Transaction domain constants for the exchange's signing layer.
//!
//! Every signed transaction hash starts with the chain id and a numeric
//! transaction type, which separates networks and transaction kinds.

use std::fmt;

use crate::{Error, Result};

/// Chain ID for the public testnet.
pub const TESTNET_CHAIN_ID: u32 = 300;

/// Chain ID for mainnet.
pub const MAINNET_CHAIN_ID: u32 = 304;

pub const TX_TYPE_CREATE_ORDER: u8 = 14;
pub const TX_TYPE_CANCEL_ORDER: u8 = 15;
pub const TX_TYPE_CANCEL_ALL_ORDERS: u8 = 16;

/// Highest usable api key index; 255 is reserved.
pub const MAX_API_KEY_INDEX: u8 = 254;

/// Default transaction lifetime: 10 minutes minus one second, in ms.
pub const DEFAULT_TX_EXPIRY_MS: i64 = 10 * 60 * 1000 - 1000;

/// Sentinel `order_expiry` asking for the default order lifetime.
pub const DEFAULT_ORDER_EXPIRY: i64 = -1;

/// Default order lifetime: 28 days, in ms.
pub const DEFAULT_ORDER_EXPIRY_MS: i64 = 28 * 24 * 60 * 60 * 1000;

/// Default auth token lifetime: 7 hours, in seconds.
pub const DEFAULT_AUTH_TOKEN_TTL_SECS: i64 = 7 * 60 * 60;

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderType {
    #[default]
    Limit = 0,
    Market = 1,
    StopLoss = 2,
    StopLossLimit = 3,
    TakeProfit = 4,
    TakeProfitLimit = 5,
    Twap = 6,
}

impl OrderType {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for OrderType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(OrderType::Limit),
            1 => Ok(OrderType::Market),
            2 => Ok(OrderType::StopLoss),
            3 => Ok(OrderType::StopLossLimit),
            4 => Ok(OrderType::TakeProfit),
            5 => Ok(OrderType::TakeProfitLimit),
            6 => Ok(OrderType::Twap),
            other => Err(Error::Validation {
                message: format!("unknown order type {}", other),
            }),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::StopLoss => write!(f, "STOP_LOSS"),
            OrderType::StopLossLimit => write!(f, "STOP_LOSS_LIMIT"),
            OrderType::TakeProfit => write!(f, "TAKE_PROFIT"),
            OrderType::TakeProfitLimit => write!(f, "TAKE_PROFIT_LIMIT"),
            OrderType::Twap => write!(f, "TWAP"),
        }
    }
}

/// Time in force for new orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeInForce {
    ImmediateOrCancel = 0,
    #[default]
    GoodTillTime = 1,
    PostOnly = 2,
}

impl TimeInForce {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for TimeInForce {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TimeInForce::ImmediateOrCancel),
            1 => Ok(TimeInForce::GoodTillTime),
            2 => Ok(TimeInForce::PostOnly),
            other => Err(Error::Validation {
                message: format!("unknown time in force {}", other),
            }),
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::ImmediateOrCancel => write!(f, "IOC"),
            TimeInForce::GoodTillTime => write!(f, "GTT"),
            TimeInForce::PostOnly => write!(f, "POST_ONLY"),
        }
    }
}

/// Time in force for cancel-all requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelAllTimeInForce {
    #[default]
    Immediate = 0,
    Scheduled = 1,
    Abort = 2,
}

impl CancelAllTimeInForce {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for CancelAllTimeInForce {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CancelAllTimeInForce::Immediate),
            1 => Ok(CancelAllTimeInForce::Scheduled),
            2 => Ok(CancelAllTimeInForce::Abort),
            other => Err(Error::Validation {
                message: format!("unknown cancel-all time in force {}", other),
            }),
        }
    }
}

impl fmt::Display for CancelAllTimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelAllTimeInForce::Immediate => write!(f, "IMMEDIATE"),
            CancelAllTimeInForce::Scheduled => write!(f, "SCHEDULED"),
            CancelAllTimeInForce::Abort => write!(f, "ABORT"),
        }
    }
}

/// Check an api key index against the usable range.
pub fn check_api_key_index(index: u8) -> Result<()> {
    if index > MAX_API_KEY_INDEX {
        return Err(Error::Config {
            message: format!(
                "api key index {} out of range (max {})",
                index, MAX_API_KEY_INDEX
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_types() {
        assert_eq!(TX_TYPE_CREATE_ORDER, 14);
        assert_eq!(TX_TYPE_CANCEL_ORDER, 15);
        assert_eq!(TX_TYPE_CANCEL_ALL_ORDERS, 16);
    }

    #[test]
    fn test_order_type() {
        assert_eq!(OrderType::Limit.as_u8(), 0);
        assert_eq!(OrderType::Market.as_u8(), 1);
        assert_eq!(OrderType::Twap.as_u8(), 6);
        assert_eq!(OrderType::try_from(5).unwrap(), OrderType::TakeProfitLimit);
        assert!(OrderType::try_from(7).is_err());
        assert_eq!(format!("{}", OrderType::Market), "MARKET");
    }

    #[test]
    fn test_time_in_force() {
        assert_eq!(TimeInForce::ImmediateOrCancel.as_u8(), 0);
        assert_eq!(TimeInForce::GoodTillTime.as_u8(), 1);
        assert_eq!(TimeInForce::PostOnly.as_u8(), 2);
        assert_eq!(TimeInForce::try_from(0).unwrap(), TimeInForce::ImmediateOrCancel);
        assert!(matches!(
            TimeInForce::try_from(3),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_cancel_all_time_in_force() {
        assert_eq!(CancelAllTimeInForce::Immediate.as_u8(), 0);
        assert_eq!(CancelAllTimeInForce::Scheduled.as_u8(), 1);
        assert_eq!(CancelAllTimeInForce::Abort.as_u8(), 2);
        assert!(CancelAllTimeInForce::try_from(9).is_err());
        assert_eq!(CancelAllTimeInForce::Scheduled.to_string(), "SCHEDULED");
    }

    #[test]
    fn test_expiry_constants() {
        assert_eq!(DEFAULT_TX_EXPIRY_MS, 599_000);
        assert_eq!(DEFAULT_ORDER_EXPIRY_MS, 2_419_200_000);
        assert_eq!(DEFAULT_AUTH_TOKEN_TTL_SECS, 25_200);
    }

    #[test]
    fn test_api_key_index_range() {
        assert!(check_api_key_index(0).is_ok());
        assert!(check_api_key_index(254).is_ok());
        assert!(matches!(
            check_api_key_index(255),
            Err(Error::Config { .. })
        ));
    }
}
