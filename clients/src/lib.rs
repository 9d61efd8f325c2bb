//! Shared plumbing for the ontoval binaries: configuration, logging and
//! input discovery.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod inputs;
pub mod logging;

pub use config::{ClientConfig, ReportFormat};
