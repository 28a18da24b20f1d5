use crate::domain::payment::PaymentStatus;
use std::fmt;
use thiserror::Error;

/// The outbound gateway call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePayment,
    GetPayment,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreatePayment => f.write_str("create payment"),
            Operation::GetPayment => f.write_str("get payment"),
        }
    }
}

/// Failure reported by an [`HttpTransport`](crate::domain::ports::HttpTransport).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Could not build {operation} request: {reason}")]
    Request { operation: Operation, reason: String },
    #[error("Transport error during {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },
    #[error("Protocol error during {operation}: {reason}")]
    Protocol { operation: Operation, reason: String },
    #[error("Callback authentication failed")]
    Authentication,
    #[error("{operation} was cancelled")]
    Cancelled { operation: Operation },
    #[error("Payment {payment_id} moved from terminal status {from} to {to}")]
    StatusRegression {
        payment_id: String,
        from: PaymentStatus,
        to: PaymentStatus,
    },
}

impl GatewayError {
    pub fn protocol(operation: Operation, reason: impl Into<String>) -> Self {
        Self::Protocol {
            operation,
            reason: reason.into(),
        }
    }

    /// True for failures that happened before or during the network exchange,
    /// as opposed to failures in what the gateway answered.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
