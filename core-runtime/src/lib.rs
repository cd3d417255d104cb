//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the put.io files core:
//! - Logging and tracing infrastructure
//! - Client configuration with fail-fast validation
//!
//! ## Overview
//!
//! This crate establishes the logging conventions and the configuration
//! object the files service is constructed from. It holds no request logic.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
