//! Calculator API traits and types
//!
//! Contract traits and types shared by the calculator module and its consumers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::sync::oneshot;

/// Synchronous arithmetic contract.
///
/// Implementations must serialize calls so that at most one operation
/// executes at a time.
pub trait CalculatorApi: Send + Sync {
    /// Return `a + b`.
    fn add(&self, a: f64, b: f64) -> f64;

    /// Return `a - b`.
    fn subtract(&self, a: f64, b: f64) -> f64;

    /// Return `a * b`.
    fn multiply(&self, a: f64, b: f64) -> f64;

    /// Return `a / b`.
    ///
    /// # Errors
    /// Returns [`CalculatorError::DivisionByZero`] when `b` is zero.
    fn divide(&self, a: f64, b: f64) -> Result<f64, CalculatorError>;

    /// Route a parsed [`Operation`] to the matching method.
    ///
    /// # Errors
    /// Propagates the error of the underlying operation.
    fn apply(&self, op: Operation, a: f64, b: f64) -> Result<f64, CalculatorError> {
        match op {
            Operation::Add => Ok(self.add(a, b)),
            Operation::Subtract => Ok(self.subtract(a, b)),
            Operation::Multiply => Ok(self.multiply(a, b)),
            Operation::Divide => self.divide(a, b),
        }
    }
}

/// Request/reply client for the calculator.
///
/// Callers pass the operation name exactly as the user typed it; name
/// resolution happens on the serving side.
#[async_trait]
pub trait CalculatorClient: Send + Sync {
    /// Evaluate `op_name` over `a` and `b` and wait for the outcome.
    ///
    /// # Errors
    /// Returns [`CalculatorError::UnknownOperation`] for unrecognized names,
    /// the operation's own error, or [`CalculatorError::Internal`] when the
    /// serving side is unavailable.
    async fn calculate(&self, op_name: &str, a: f64, b: f64) -> Result<f64, CalculatorError>;
}

/// Arithmetic operations understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All supported operations, in prompt order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Wire name of the operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| CalculatorError::UnknownOperation {
                name: s.to_owned(),
            })
    }
}

/// Single-use reply channel for one [`OperationRequest`].
pub type ReplySender = oneshot::Sender<Result<f64, CalculatorError>>;

/// One unit of work for the dispatcher.
///
/// Consumed exactly once; the dispatcher answers on `reply` and drops it.
#[derive(Debug)]
pub struct OperationRequest {
    pub op: String,
    pub a: f64,
    pub b: f64,
    pub reply: ReplySender,
}

impl OperationRequest {
    /// Build a request together with the receiving half of its reply channel.
    #[must_use]
    pub fn new(
        op: impl Into<String>,
        a: f64,
        b: f64,
    ) -> (Self, oneshot::Receiver<Result<f64, CalculatorError>>) {
        let (reply, rx) = oneshot::channel();
        let request = Self {
            op: op.into(),
            a,
            b,
            reply,
        };
        (request, rx)
    }
}

/// Error type for Calculator operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown operation")]
    UnknownOperation { name: String },

    #[error("internal error: {0}")]
    Internal(String),
}
