//! Tether Core Library
//!
//! This crate provides shared types, errors, and configuration for Tether.

pub mod config;
pub mod error;
pub mod types;

pub use config::ShellConfig;
pub use error::{TetherError, TetherResult};
