pub mod billing_service;
pub mod config_service;
pub mod oauth_service;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use traits::Collaborators;
pub use types::Outcome;
