//! Request dispatcher
//!
//! A single background task drains the request queue and evaluates each
//! request against a [`CalculatorApi`]. Because there is exactly one
//! consumer, requests are processed strictly in arrival order.

use std::sync::Arc;

use async_trait::async_trait;
use calculator_sdk::{
    CalculatorApi, CalculatorClient, CalculatorError, Operation, OperationRequest, SERVICE_NAME,
};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Sending side of the request queue.
pub type RequestSender = mpsc::UnboundedSender<OperationRequest>;

/// Resolve and evaluate one request.
fn evaluate(api: &dyn CalculatorApi, op: &str, a: f64, b: f64) -> Result<f64, CalculatorError> {
    let op: Operation = op.parse()?;
    api.apply(op, a, b)
}

/// Drain `rx` until every sender is dropped, replying once per request.
pub async fn run_dispatcher(
    api: Arc<dyn CalculatorApi>,
    mut rx: mpsc::UnboundedReceiver<OperationRequest>,
) {
    tracing::info!(service = SERVICE_NAME, "dispatcher started");

    while let Some(request) = rx.recv().await {
        let OperationRequest { op, a, b, reply } = request;
        tracing::debug!(op = %op, a, b, "dispatching request");

        let outcome = evaluate(api.as_ref(), &op, a, b);
        if let Err(e) = &outcome {
            tracing::debug!(op = %op, error = %e, "request failed");
        }

        if reply.send(outcome).is_err() {
            tracing::warn!(op = %op, "requester went away before reply");
        }
    }

    tracing::info!(service = SERVICE_NAME, "dispatcher stopped: queue closed");
}

/// Handle to a running dispatcher.
///
/// Cloning the sender keeps the queue open; the dispatcher exits once the
/// handle and every clone of its sender are dropped.
pub struct DispatcherHandle {
    tx: RequestSender,
    task: JoinHandle<()>,
}

/// Start the dispatcher on the current tokio runtime.
#[must_use]
pub fn spawn_dispatcher(api: Arc<dyn CalculatorApi>) -> DispatcherHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_dispatcher(api, rx));
    DispatcherHandle { tx, task }
}

impl DispatcherHandle {
    /// Another producer for the same queue.
    #[must_use]
    pub fn sender(&self) -> RequestSender {
        self.tx.clone()
    }

    /// Close the queue and wait for the dispatcher to drain it.
    ///
    /// # Errors
    /// Returns the join error if the dispatcher task panicked or was aborted.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        let Self { tx, task } = self;
        drop(tx);
        task.await
    }
}

#[async_trait]
impl CalculatorClient for DispatcherHandle {
    async fn calculate(&self, op_name: &str, a: f64, b: f64) -> Result<f64, CalculatorError> {
        submit(&self.tx, op_name, a, b).await
    }
}

/// Submit one request on `tx` and wait for its reply.
///
/// # Errors
/// Returns the calculator's error, or [`CalculatorError::Internal`] when the
/// dispatcher is gone.
pub async fn submit(
    tx: &RequestSender,
    op_name: &str,
    a: f64,
    b: f64,
) -> Result<f64, CalculatorError> {
    let (request, rx) = OperationRequest::new(op_name, a, b);
    tx.send(request)
        .map_err(|_| CalculatorError::Internal("dispatcher is not running".to_owned()))?;
    rx.await
        .map_err(|_| CalculatorError::Internal("dispatcher dropped the reply".to_owned()))?
}
