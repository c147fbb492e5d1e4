// src/checker/checker.rs
use super::result::{CheckResult, FailureKind, Outcome};
use super::transport::{HttpTransport, Transport, TransportError};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{dispatcher, error, info, warn, Dispatch};

pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

const CONNECTION_ERROR: &str = "Connection error - Website might be down";

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Invalid timeout {0}: must be a positive, finite number of seconds")]
    InvalidTimeout(f64),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Performs one-shot reachability checks against HTTP targets.
///
/// A `Checker` holds no per-check state and can be shared between tasks.
pub struct Checker {
    transport: Arc<dyn Transport>,
    timeout_secs: f64,
    timeout: Duration,
    dispatch: Option<Dispatch>,
}

impl Checker {
    /// Create a checker backed by a real HTTP client.
    pub fn new(timeout_secs: f64) -> Result<Self, CheckError> {
        let transport = HttpTransport::new()?;
        Self::with_transport(Arc::new(transport), timeout_secs)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        timeout_secs: f64,
    ) -> Result<Self, CheckError> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(CheckError::InvalidTimeout(timeout_secs));
        }
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|_| CheckError::InvalidTimeout(timeout_secs))?;

        Ok(Self {
            transport,
            timeout_secs,
            timeout,
            dispatch: None,
        })
    }

    /// Route this checker's log lines to `dispatch` instead of the caller's
    /// current default subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check `target` once. Every failure is reported in the returned record.
    pub async fn check(&self, target: &str) -> CheckResult {
        let observed_at = Utc::now();

        let start = Instant::now();
        let response = timeout(self.timeout, self.transport.get(target)).await;
        let elapsed = start.elapsed().as_secs_f64();

        let (outcome, detail) = match response {
            Ok(Ok(status_code)) => (Outcome::from_response(status_code, elapsed), None),
            Ok(Err(err)) => (self.transport_failure(&err), Some(err.detail)),
            Err(_) => {
                let err = TransportError::new(FailureKind::Timeout, "deadline elapsed");
                (self.transport_failure(&err), Some(err.detail))
            }
        };

        let result = CheckResult::new(target, observed_at, outcome);
        self.log_outcome(&result, detail.as_deref().unwrap_or_default());
        result
    }

    fn transport_failure(&self, err: &TransportError) -> Outcome {
        let message = match err.kind {
            FailureKind::Connection => CONNECTION_ERROR.to_string(),
            FailureKind::Timeout => {
                format!("Request timed out after {} seconds", self.timeout_secs)
            }
            FailureKind::Other => format!("Request failed: {}", err.detail),
        };
        Outcome::TransportFailure {
            kind: err.kind,
            message,
        }
    }

    /// Exactly one line per check.
    fn log_outcome(&self, result: &CheckResult, detail: &str) {
        let url = result.target();
        self.emit(|| match result.outcome() {
            Outcome::Success {
                status_code,
                elapsed_seconds,
            } => info!(
                url = %url,
                "Website is UP - Status: {}, Response time: {:.2}s",
                status_code, elapsed_seconds
            ),
            Outcome::FailureResponse {
                status_code,
                elapsed_seconds,
            } => warn!(
                url = %url,
                "Website returned status {} - Response time: {:.2}s",
                status_code, elapsed_seconds
            ),
            Outcome::TransportFailure { kind, message } => {
                error!(url = %url, kind = ?kind, detail = %detail, "{}", message)
            }
        });
    }

    fn emit(&self, f: impl FnOnce()) {
        match &self.dispatch {
            Some(dispatch) => dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

/// Check `target` once with a fresh HTTP client.
pub async fn check(target: &str, timeout_secs: f64) -> Result<CheckResult, CheckError> {
    let checker = Checker::new(timeout_secs)?;
    Ok(checker.check(target).await)
}
