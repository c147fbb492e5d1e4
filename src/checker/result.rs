// src/checker/result.rs
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Status code a site must answer with to count as up.
pub const OK_STATUS: u16 = 200;

/// Why no HTTP response could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// DNS failure, refused or reset connection, TLS handshake failure
    Connection,
    /// No response before the deadline
    Timeout,
    /// Malformed target, redirect loop, protocol error, ...
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        status_code: u16,
        elapsed_seconds: f64,
    },
    /// A response arrived, but not with `OK_STATUS`. Not an error.
    FailureResponse {
        status_code: u16,
        elapsed_seconds: f64,
    },
    TransportFailure {
        kind: FailureKind,
        message: String,
    },
}

impl Outcome {
    /// Classify a received response by its status code.
    pub fn from_response(status_code: u16, elapsed_seconds: f64) -> Self {
        let elapsed_seconds = elapsed_seconds.max(0.0);
        if status_code == OK_STATUS {
            Outcome::Success {
                status_code,
                elapsed_seconds,
            }
        } else {
            Outcome::FailureResponse {
                status_code,
                elapsed_seconds,
            }
        }
    }
}

/// The record produced by a single check. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    target: String,
    observed_at: DateTime<Utc>,
    outcome: Outcome,
}

impl CheckResult {
    pub fn new(target: impl Into<String>, observed_at: DateTime<Utc>, outcome: Outcome) -> Self {
        Self {
            target: target.into(),
            observed_at,
            outcome,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Present iff a response was received at all.
    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            Outcome::Success { status_code, .. } | Outcome::FailureResponse { status_code, .. } => {
                Some(status_code)
            }
            Outcome::TransportFailure { .. } => None,
        }
    }

    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Success {
                elapsed_seconds, ..
            }
            | Outcome::FailureResponse {
                elapsed_seconds, ..
            } => Some(elapsed_seconds),
            Outcome::TransportFailure { .. } => None,
        }
    }

    /// Only set when no HTTP response could be obtained.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::TransportFailure { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.outcome {
            Outcome::TransportFailure { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Human readable reason the site counts as down, `None` when it is up.
    pub fn failure_reason(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::FailureResponse { status_code, .. } => Some(format!("HTTP {}", status_code)),
            Outcome::TransportFailure { message, .. } => Some(message.clone()),
        }
    }
}

// Flat shape handed to external consumers.
#[derive(Serialize)]
struct CheckRecord<'a> {
    target: &'a str,
    observed_at: DateTime<Utc>,
    succeeded: bool,
    status_code: Option<u16>,
    elapsed_seconds: Option<f64>,
    error_message: Option<&'a str>,
    failure_kind: Option<FailureKind>,
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CheckRecord {
            target: &self.target,
            observed_at: self.observed_at,
            succeeded: self.succeeded(),
            status_code: self.status_code(),
            elapsed_seconds: self.elapsed_seconds(),
            error_message: self.error_message(),
            failure_kind: self.failure_kind(),
        }
        .serialize(serializer)
    }
}
