//! Foundation types for DEVCON.
//!
//! This crate holds the pieces shared by the console engine and its hosts:
//! the error type, the TOML-backed configuration, and the color type used by
//! the log palette.

pub mod color;
pub mod config;
pub mod error;
