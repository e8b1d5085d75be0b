//! Domain service for calculator
//!
//! Contains the core arithmetic logic.

use calculator_sdk::{CalculatorApi, CalculatorError};
use parking_lot::Mutex;
use tracing::debug;

/// Domain service that performs arithmetic operations.
///
/// Every operation holds `lock` for the duration of the computation, so
/// calls coming from several producers never overlap. Results are returned
/// directly; the service keeps no record of previous computations.
#[derive(Default)]
pub struct Service {
    lock: Mutex<()>,
}

impl Service {
    /// Create a new service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CalculatorApi for Service {
    fn add(&self, a: f64, b: f64) -> f64 {
        let _guard = self.lock.lock();
        debug!(a, b, "performing addition");
        a + b
    }

    fn subtract(&self, a: f64, b: f64) -> f64 {
        let _guard = self.lock.lock();
        debug!(a, b, "performing subtraction");
        a - b
    }

    fn multiply(&self, a: f64, b: f64) -> f64 {
        let _guard = self.lock.lock();
        debug!(a, b, "performing multiplication");
        a * b
    }

    fn divide(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        let _guard = self.lock.lock();
        if b == 0.0 {
            debug!(a, "rejecting division by zero");
            return Err(CalculatorError::DivisionByZero);
        }
        debug!(a, b, "performing division");
        Ok(a / b)
    }
}
