//! Core layer: identifiers, sessions, prompts and the command orchestrators.

pub mod identity;
pub mod prompts;
pub mod services;
pub mod session;
