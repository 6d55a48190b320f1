//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Conversions from transport errors into [`crate::error::ApiError`]
pub mod error_helpers;

/// Logger initialisation and verbose output
pub mod logging;

/// Input validation and sanitization utilities
pub mod validation;
