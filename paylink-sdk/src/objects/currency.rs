use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Stablecoin + network pairs accepted by the gateway
pub enum CurrencyType {
    #[default]
    #[serde(rename = "USDT-ERC20")]
    UsdtErc20,
    #[serde(rename = "USDT-TRC20")]
    UsdtTrc20,
}

impl CurrencyType {
    pub const ALL: [CurrencyType; 2] = [CurrencyType::UsdtErc20, CurrencyType::UsdtTrc20];

    /// Wire name, as sent in `currencyType`.
    pub fn as_str(self) -> &'static str {
        match self {
            CurrencyType::UsdtErc20 => "USDT-ERC20",
            CurrencyType::UsdtTrc20 => "USDT-TRC20",
        }
    }

    /// Human readable label for selection lists.
    pub fn label(self) -> &'static str {
        match self {
            CurrencyType::UsdtErc20 => "USDT (ERC-20)",
            CurrencyType::UsdtTrc20 => "USDT (TRC-20)",
        }
    }
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency type: {0}")]
pub struct UnknownCurrencyType(pub String);

impl FromStr for CurrencyType {
    type Err = UnknownCurrencyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyType::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCurrencyType(s.to_owned()))
    }
}
