use crate::objects::currency::CurrencyType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for `GET /transaction/create`.
///
/// Sent as query parameters rather than a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransaction {
    pub amount: Decimal,
    pub currency_type: CurrencyType,
    /// Passed through to the backend, which embeds it in the payment token.
    pub callback_url: Option<Url>,
}

impl CreateTransaction {
    /// Query pairs in wire order. `callbackUrl` is only present when set.
    ///
    /// The amount keeps its scale, so `12.50` is sent as `12.50`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("amount", self.amount.to_string()),
            ("currencyType", self.currency_type.as_str().to_owned()),
        ];
        if let Some(callback) = &self.callback_url {
            pairs.push(("callbackUrl", callback.to_string()));
        }
        pairs
    }
}

/// Body returned by `GET /transaction/create`, on success and on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl TransactionResponse {
    /// The backend's explanation of a failure. `error` wins over `message`.
    pub fn failure_message(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }

    /// The hosted payment link, if the backend produced one.
    pub fn into_link(self) -> Option<PaymentLink> {
        match (self.success, self.url) {
            (true, Some(url)) if !url.is_empty() => Some(PaymentLink { url }),
            _ => None,
        }
    }
}

/// A hosted payment page the payer can be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    pub url: String,
}
