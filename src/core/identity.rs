//! Manifold identifiers and the user-vs-team acting identity.

use crate::error::CliError;
use crate::storage::config::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ID_LENGTH: usize = 29;
const ID_ALPHABET: &str = "0123456789abcdefghjkmnpqrtuvwxyz";

/// Opaque Manifold identifier. The empty id means "acting as yourself".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a user supplied identifier, rejecting anything that is not a
    /// 29 character base32 string.
    pub fn parse(input: &str) -> Result<Self, CliError> {
        let value = input.trim();
        let valid = value.len() == ID_LENGTH && value.chars().all(|c| ID_ALPHABET.contains(c));
        if !valid {
            return Err(CliError::InvalidArguments(format!(
                "Invalid team ID: '{}'",
                input
            )));
        }
        Ok(Self(value.to_string()))
    }
}

impl FromStr for Id {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team flags as given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamArgs {
    pub team: Option<String>,
    pub me: bool,
}

impl TeamArgs {
    pub fn me() -> Self {
        Self {
            team: None,
            me: true,
        }
    }

    pub fn team(id: impl Into<String>) -> Self {
        Self {
            team: Some(id.into()),
            me: false,
        }
    }

    /// Resolve the team id to act as. Returns the empty id when acting as
    /// the logged in user. `--me` wins over the configured default team.
    pub fn team_id(&self, config: &Config) -> Result<Id, CliError> {
        if self.me {
            return Ok(Id::empty());
        }
        match self.team.as_deref().or(config.default_team.as_deref()) {
            Some(team) => Id::parse(team),
            None => Ok(Id::empty()),
        }
    }
}

/// Owner of a billing profile: exactly one of a user or a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    User(Id),
    Team(Id),
}

impl Actor {
    pub fn resolve(team_id: &Id, user_id: &Id) -> Self {
        if team_id.is_empty() {
            Actor::User(user_id.clone())
        } else {
            Actor::Team(team_id.clone())
        }
    }

    pub fn id(&self) -> &Id {
        match self {
            Actor::User(id) | Actor::Team(id) => id,
        }
    }
}
