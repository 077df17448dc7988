//! Client-side checks run before any request leaves the view.

use crate::view::{ComplaintForm, PaymentForm};
use paylink_sdk::credentials::Credentials;
use paylink_sdk::objects::refund::RefundRequest;
use paylink_sdk::objects::transaction::CreateTransaction;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// A required field is missing or unusable. The message is shown as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required parameters (amount, API key, or API secret)")]
    MissingPaymentParameters,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Amount is too large")]
    AmountTooLarge,

    #[error("Callback URL must be an absolute http(s) URL")]
    InvalidCallbackUrl,

    #[error("Wallet address is required")]
    MissingWalletAddress,

    #[error("API Key and API Secret are required")]
    MissingCredentials,
}

/// Build the payment request, or explain why it cannot be sent yet.
pub fn payment_request(
    credentials: &Credentials,
    form: &PaymentForm,
) -> Result<CreateTransaction, ValidationError> {
    if form.amount.is_empty() || !credentials.is_complete() {
        return Err(ValidationError::MissingPaymentParameters);
    }

    let amount = parse_amount(&form.amount)?;
    let callback_url = match form.callback_url.trim() {
        "" => None,
        raw => Some(parse_callback_url(raw)?),
    };

    Ok(CreateTransaction {
        amount,
        currency_type: form.currency_type,
        callback_url,
    })
}

/// Build the refund request. Only the wallet address and the credentials are
/// mandatory; the amount is forwarded as typed.
pub fn refund_request(
    credentials: &Credentials,
    form: &ComplaintForm,
) -> Result<RefundRequest, ValidationError> {
    if form.wallet_address.trim().is_empty() {
        return Err(ValidationError::MissingWalletAddress);
    }
    if !credentials.is_complete() {
        return Err(ValidationError::MissingCredentials);
    }

    Ok(RefundRequest {
        wallet_address: form.wallet_address.trim().to_owned(),
        amount: form.amount.clone(),
        message: form.message.clone(),
        subject: form.subject.clone(),
        currency_type: form.currency_type,
    })
}

/// Plain (`12.50`) and exponent (`1.25e1`) notation are both accepted. The
/// scale of plain input is kept, so `10.00` goes out as `10.00`; exponent
/// input goes out expanded (`1e2` as `100`).
fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    let amount = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(amount) => amount,
        // numeric, but beyond what a Decimal holds
        Err(_) if raw.parse::<f64>().is_ok_and(|v| v.is_finite() && v >= 1.0) => {
            return Err(ValidationError::AmountTooLarge);
        }
        Err(_) => return Err(ValidationError::InvalidAmount),
    };
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

fn parse_callback_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|_| ValidationError::InvalidCallbackUrl)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ValidationError::InvalidCallbackUrl),
    }
}
