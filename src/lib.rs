//! Client for the CashBill payment gateway.
//!
//! Creates payments, looks up their status and authenticates the status-change
//! notifications the gateway sends back to the shop. Every exchange is signed
//! with a keyed digest over a fixed sequence of fields (see [`domain::digest`]).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::client::GatewayClient;
pub use config::{Environment, GatewayConfig};
pub use error::{GatewayError, Result};
