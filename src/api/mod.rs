//! HTTP clients for the Manifold backend services and the card tokenizer.

pub mod analytics;
pub mod billing;
pub mod client;
pub mod factory;
pub mod identity;
pub mod models;
pub mod oauth;
pub mod stripe;
