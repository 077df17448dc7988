//! Refund ("complaint") request and response types.

use crate::objects::currency::CurrencyType;
use serde::{Deserialize, Serialize};

/// Body of `POST /refund`.
///
/// `amount`, `message` and `subject` are free text and are sent as entered,
/// empty strings included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub wallet_address: String,
    pub amount: String,
    pub message: String,
    pub subject: String,
    pub currency_type: CurrencyType,
}

/// Body returned by `POST /refund`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefundResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

impl RefundResponse {
    pub fn failure_message(&self) -> Option<String> {
        self.message.clone()
    }
}

/// Acknowledgement of an accepted refund request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundReceipt {
    pub message: Option<String>,
}
