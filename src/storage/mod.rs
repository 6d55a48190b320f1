//! Storage layer for manifold-cli
//!
//! Handles configuration management and credential storage.
//! Uses the OS keyring for the session token and TOML for configuration files.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
