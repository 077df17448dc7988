//! Merchant credentials and the headers that carry them.
//!
//! Every PayGlobal endpoint authenticates the merchant with two headers:
//!
//! ```text
//! apiKey: {api_key}
//! x-api-secret: {api_secret}
//! ```
//!
//! Header names are case-insensitive on the wire, so the constants below use
//! the lowercase form accepted by every HTTP stack.

use std::fmt;

/// Header name for the merchant API key.
pub const API_KEY_HEADER: &str = "apikey";

/// Header name for the merchant API secret.
pub const API_SECRET_HEADER: &str = "x-api-secret";

/// Merchant API key / secret pair.
///
/// Both values are opaque strings that only live in memory for the duration
/// of a session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// `true` when both the key and the secret are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
