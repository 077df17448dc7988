#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod gateway;
pub mod launch;
pub mod navigator;
pub mod shell;
pub mod validation;
pub mod view;
