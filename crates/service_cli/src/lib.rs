//! Synth CLI - command-line front end for synthetic shocked price datasets.
//!
//! The binary (`synth`) is a thin wrapper around this library so the
//! commands can be driven from integration tests.
//!
//! # Commands
//!
//! - `synth generate` - Simulate the configured scenario and write it as CSV
//! - `synth check` - Validate the configuration and print the asset table

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
