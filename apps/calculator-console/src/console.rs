//! Interactive read-eval-print loop.
//!
//! Reads an operation name and two operands per round, hands them to a
//! [`CalculatorClient`] and prints the outcome. The loop is strictly
//! sequential: the next prompt is printed only after the reply arrived.

use anyhow::{Context, Result};
use calculator_sdk::CalculatorClient;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const OPERATION_PROMPT: &str =
    "Enter operation (add, subtract, multiply, divide) or 'exit' to quit:";
pub const FIRST_NUMBER_PROMPT: &str = "Enter the first number:";
pub const SECOND_NUMBER_PROMPT: &str = "Enter the second number:";
pub const EXIT_COMMAND: &str = "exit";

/// First whitespace-delimited token of `line`, if any.
fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Parse an operand; only finite numbers are accepted.
fn parse_operand(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub struct Console<R, W> {
    input: R,
    out: W,
    precision: usize,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    #[must_use]
    pub fn new(input: R, out: W, precision: usize) -> Self {
        Self {
            input,
            out,
            precision,
        }
    }

    /// Run until `exit` is typed or the input ends.
    ///
    /// Calculator errors are printed and the loop continues.
    ///
    /// # Errors
    /// Returns an error only when reading input or writing output fails.
    pub async fn run(&mut self, client: &dyn CalculatorClient) -> Result<()> {
        loop {
            self.write_line(OPERATION_PROMPT).await?;
            let Some(line) = self.next_line().await? else {
                tracing::debug!("input closed at operation prompt");
                break;
            };
            let Some(op) = first_token(&line) else {
                continue;
            };
            if op == EXIT_COMMAND {
                break;
            }

            let Some(a) = self.read_operand(FIRST_NUMBER_PROMPT).await? else {
                break;
            };
            let Some(b) = self.read_operand(SECOND_NUMBER_PROMPT).await? else {
                break;
            };

            let message = match client.calculate(op, a, b).await {
                Ok(result) => format!("Result: {result:.prec$}", prec = self.precision),
                Err(e) => format!("Error: {e}"),
            };
            self.write_line(&message).await?;
        }

        tracing::debug!("console session ended");
        Ok(())
    }

    /// Prompt until a valid number is entered. `None` means the input ended.
    async fn read_operand(&mut self, prompt: &str) -> Result<Option<f64>> {
        loop {
            self.write_line(prompt).await?;
            let Some(line) = self.next_line().await? else {
                tracing::debug!(prompt, "input closed at number prompt");
                return Ok(None);
            };
            let token = first_token(&line).unwrap_or_default();
            if let Some(value) = parse_operand(token) {
                return Ok(Some(value));
            }
            self.write_line(&format!("Invalid number: '{token}'. Please try again."))
                .await?;
        }
    }

    /// Next input line without its terminator. Bytes that are not valid
    /// UTF-8 are replaced, so they surface as an unparsable token.
    async fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }

    async fn write_line(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(format!("{text}\n").as_bytes())
            .await
            .context("failed to write output")?;
        self.out.flush().await.context("failed to flush output")
    }

    #[cfg(test)]
    fn into_writer(self) -> W {
        self.out
    }
}
