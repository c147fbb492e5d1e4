// src/lib.rs
pub mod checker;
pub mod config;
pub mod logging;
pub mod report;

pub use checker::{check, CheckError, CheckResult, Checker, FailureKind, Outcome};
