// src/checker/transport.rs
use super::result::FailureKind;
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::fmt::Write;
use std::io;

/// Something that can issue a GET and report the response status.
///
/// The checker owns the deadline; implementations only need to surface
/// transport failures.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, target: &str) -> Result<u16, TransportError>;
}

/// No HTTP response could be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{detail}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // A connect attempt that ran out of time reports both; timeout wins.
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_connect() || is_dropped_connection(&err) {
            FailureKind::Connection
        } else {
            FailureKind::Other
        };
        Self::new(kind, describe(&err))
    }
}

/// The peer reset or closed the connection before a response arrived.
fn is_dropped_connection(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() {
                return true;
            }
        }
        current = err.source();
    }
    false
}

/// Flatten an error and its sources into one line. Sources whose text the
/// parent already printed are skipped.
fn describe(mut err: &(dyn StdError + 'static)) -> String {
    let mut s = err.to_string();
    while let Some(src) = err.source() {
        let text = src.to_string();
        if !s.contains(&text) {
            let _ = write!(s, ": {}", text);
        }
        err = src;
    }
    s
}

/// `Transport` backed by a reqwest client with its default redirect policy.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("site-checker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, target: &str) -> Result<u16, TransportError> {
        let response = self.client.get(target).send().await?;
        Ok(response.status().as_u16())
    }
}
