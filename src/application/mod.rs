//! Application layer orchestrating the signed exchanges with the gateway.
//!
//! `GatewayClient` issues the outbound calls through an injected transport;
//! `StatusMonitor` layers status-finality checks on top of any payment lookup.

pub mod client;
pub mod monitor;
