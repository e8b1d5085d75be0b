//! Calculator SDK
//!
//! This crate provides everything needed to talk to the calculator:
//! - Arithmetic contract (`CalculatorApi`)
//! - Request/reply client trait (`CalculatorClient`)
//! - Operation and request types (`Operation`, `OperationRequest`)
//! - Error types (`CalculatorError`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::CalculatorClient;
//!
//! let result = client.calculate("add", 2.0, 3.0).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAITS AND TYPES ===
mod api;
pub use api::{
    CalculatorApi, CalculatorClient, CalculatorError, Operation, OperationRequest, ReplySender,
};

/// Service name attached to dispatcher lifecycle logs.
pub const SERVICE_NAME: &str = "calculator";
