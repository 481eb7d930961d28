//! httpget Core Library
//!
//! This library provides the core functionality for the `httpget` tool,
//! which issues a single HTTP request and prints the response.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Resolved, immutable options for one run
//! - [`duration`] - Duration strings for the timeout flag
//! - [`client`] - HTTP client construction, request building, sending
//! - [`report`] - Writing the response (body stream or summary line)
//! - [`driver`] - The full request/response cycle
//! - [`diagnostics`] - Verbose output sink
//! - [`error`] - Error taxonomy and user-facing messages
//! - [`exit`] - Process exit codes

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod duration;
pub mod error;
pub mod exit;
pub mod report;
mod user_agent;

// Re-export commonly used types
pub use client::HttpClient;
pub use config::{Config, ConfigBuilder, DEFAULT_METHOD, DEFAULT_TIMEOUT};
pub use diagnostics::{Diagnostics, Silent, Verbose};
pub use driver::run;
pub use duration::{DurationError, SignedDuration, parse_duration};
pub use error::FetchError;
pub use exit::{ProcessExit, determine_exit_outcome};
pub use report::report;
