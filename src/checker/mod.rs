// src/checker/mod.rs
mod checker;
mod result;
mod transport;

pub use checker::{check, CheckError, Checker, DEFAULT_TIMEOUT_SECS};
pub use result::{CheckResult, FailureKind, Outcome, OK_STATUS};
pub use transport::{HttpTransport, Transport, TransportError};
