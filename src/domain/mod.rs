pub mod callback;
pub mod credential;
pub mod digest;
pub mod payment;
pub mod ports;
pub mod signing;
