use serde::{Deserialize, Serialize};
use std::fmt;

/// How a command finished successfully. Both variants exit with status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(String),
    /// Informational terminus of the OAuth link flow.
    Linked(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Completed(msg) | Outcome::Linked(msg) => msg,
        }
    }

    /// Informational outcomes are reported on stderr, like error messages,
    /// so that stdout only carries results of completed work.
    pub fn is_informational(&self) -> bool {
        matches!(self, Outcome::Linked(_))
    }
}

/// Third party identity providers supported by `manifold oauth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Github => "github",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::Github => "GitHub",
        }
    }
}

/// Which remote flow to run: establish a session or attach to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthState {
    Login,
    Link,
}

impl fmt::Display for OAuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OAuthState::Login => f.write_str("login"),
            OAuthState::Link => f.write_str("link"),
        }
    }
}

/// Result of a finished OAuth web flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthCompletion {
    /// Session token, present for the login flow.
    pub token: Option<String>,
}

/// Opaque single-use payment credential returned by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardToken {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_message() {
        assert_eq!(Outcome::Completed("done".to_string()).message(), "done");
        assert_eq!(Outcome::Linked("linked".to_string()).message(), "linked");
    }

    #[test]
    fn test_only_link_outcome_is_informational() {
        assert!(Outcome::Linked("linked".to_string()).is_informational());
        assert!(!Outcome::Completed("done".to_string()).is_informational());
    }

    #[test]
    fn test_oauth_state_wire_format() {
        assert_eq!(serde_json::to_string(&OAuthState::Login).unwrap(), "\"login\"");
        assert_eq!(serde_json::to_string(&OAuthState::Link).unwrap(), "\"link\"");
        assert_eq!(OAuthState::Link.to_string(), "link");
        assert_eq!(OAuthProvider::Github.as_str(), "github");
    }
}
