//! Launch parameters and the one-shot auto-submit they can trigger.
//!
//! A checkout can be opened with `?api_key=..&api_secret=..&amount=..` to
//! pre-fill the payment form. When all three are present the payment is
//! submitted once, shortly after the view is mounted.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Delay between mounting the view and the automatic submission.
pub const AUTO_SUBMIT_DELAY: Duration = Duration::from_millis(100);

/// Values read from the launch query string. Missing values are empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub api_key: String,
    pub api_secret: String,
    pub amount: String,
}

impl LaunchParams {
    /// Read the parameters from a full launch URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Read the parameters from a bare query string, with or without the
    /// leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>) -> Self {
        let (mut key, mut secret, mut amount) = (None, None, None);
        for (name, value) in pairs {
            // first occurrence wins
            let slot = match name.as_ref() {
                "api_key" => &mut key,
                "api_secret" => &mut secret,
                "amount" => &mut amount,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Self {
            api_key: key.unwrap_or_default(),
            api_secret: secret.unwrap_or_default(),
            amount: amount.unwrap_or_default(),
        }
    }

    /// `true` when the amount and both credentials were supplied.
    pub fn should_auto_submit(&self) -> bool {
        !self.amount.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl fmt::Debug for LaunchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchParams")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("amount", &self.amount)
            .finish()
    }
}

/// Latch that lets the automatic submission happen at most once.
#[derive(Debug, Default)]
pub struct AutoSubmit {
    armed: bool,
}

impl AutoSubmit {
    pub fn new(armed: bool) -> Self {
        Self { armed }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Disarm and report whether the latch was still armed.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}
