//! Wire types and HTTP client for the PayGlobal merchant API.
//!
//! The API exposes two merchant operations: creating a hosted payment link
//! for a USDT amount and filing a refund request against a transaction.
//! Both are authenticated with a plain API key / secret header pair.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod credentials;
pub mod objects;

#[cfg(feature = "client")]
pub mod client;
