use crate::core::identity::{Actor, Id};
use crate::core::services::types::{OAuthProvider, OAuthState};
use crate::core::session::User;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Billing models

/// Body of `POST /profiles`. Carries exactly one of `user_id` or `team_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCreateRequest {
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<Id>,
}

impl ProfileCreateRequest {
    pub fn new(token: impl Into<String>, owner: Actor) -> Self {
        let (user_id, team_id) = match owner {
            Actor::User(id) => (Some(id), None),
            Actor::Team(id) => (None, Some(id)),
        };
        Self {
            token: token.into(),
            user_id,
            team_id,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> Option<&Id> {
        self.user_id.as_ref()
    }

    pub fn team_id(&self) -> Option<&Id> {
        self.team_id.as_ref()
    }
}

/// Body of `PATCH /profiles/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdateRequest {
    pub token: String,
}

// Identity models

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: Id,
    pub body: UserBody,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        User {
            id: response.id,
            name: response.body.name,
            email: response.body.email,
        }
    }
}

// OAuth models

#[derive(Debug, Serialize)]
pub struct OAuthSessionRequest {
    pub source: OAuthProvider,
    pub state_type: OAuthState,
}

#[derive(Debug, Deserialize)]
pub struct OAuthSessionResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthSessionState {
    Pending,
    Complete,
    Failed,
}

#[derive(Debug, Deserialize)]
pub struct OAuthSessionStatus {
    pub status: OAuthSessionState,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// Analytics models

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event_name: String,
    pub properties: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            properties: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

// Card tokenizer models

#[derive(Debug, Deserialize)]
pub struct CardTokenResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenizerErrorResponse {
    pub error: TokenizerError,
}

#[derive(Debug, Deserialize)]
pub struct TokenizerError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER_ID: &str = "200e7aeg2kf2d6nud8jran3zxnz5j";
    const TEAM_ID: &str = "1ea6vyxcz0n3dmarpg9pfhq3hbpmj";

    #[test]
    fn test_create_request_for_user_omits_team() {
        let request =
            ProfileCreateRequest::new("tok_1", Actor::User(Id::parse(USER_ID).unwrap()));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "token": "tok_1", "user_id": USER_ID })
        );
        assert!(request.team_id().is_none());
    }

    #[test]
    fn test_create_request_for_team_omits_user() {
        let request =
            ProfileCreateRequest::new("tok_2", Actor::Team(Id::parse(TEAM_ID).unwrap()));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "token": "tok_2", "team_id": TEAM_ID })
        );
        assert!(request.user_id().is_none());
    }

    #[test]
    fn test_user_response_conversion() {
        let response: UserResponse = serde_json::from_value(json!({
            "id": USER_ID,
            "version": 1,
            "body": { "name": "Ada", "email": "ada@example.test", "alias": "ada" }
        }))
        .unwrap();
        let user: User = response.into();
        assert_eq!(user.id.as_str(), USER_ID);
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_oauth_session_request_shape() {
        let request = OAuthSessionRequest {
            source: OAuthProvider::Github,
            state_type: OAuthState::Link,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "source": "github", "state_type": "link" })
        );
    }

    #[test]
    fn test_oauth_status_parsing() {
        let status: OAuthSessionStatus =
            serde_json::from_value(json!({ "status": "complete", "token": "abc" })).unwrap();
        assert_eq!(status.status, OAuthSessionState::Complete);
        assert_eq!(status.token.as_deref(), Some("abc"));

        let status: OAuthSessionStatus =
            serde_json::from_value(json!({ "status": "pending" })).unwrap();
        assert_eq!(status.status, OAuthSessionState::Pending);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_analytics_event_properties() {
        let event = AnalyticsEvent::new("oauth_completed").with("provider", "github");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "event_name": "oauth_completed", "properties": { "provider": "github" } })
        );
    }
}
