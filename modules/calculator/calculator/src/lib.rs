//! Calculator Module
//!
//! Arithmetic service fronted by a single-consumer request dispatcher.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - Core arithmetic logic, serialized by a lock
//! - `dispatcher.rs` - Background task that drains the request queue
//!
//! Consumers talk to the dispatcher through `calculator_sdk::CalculatorClient`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod dispatcher;
pub mod domain;

pub use dispatcher::{DispatcherHandle, RequestSender, run_dispatcher, spawn_dispatcher, submit};
pub use domain::Service;
