use serde::{Deserialize, Serialize};

use crate::accounts::repo_types::{Role, User};

/// Request body for registration. Fields are optional so that missing input
/// is reported through the service's own validation error, not a decode
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

/// Plain acknowledgment envelope.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Minimal user summary returned by login.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Public part of the user record. Never carries the id or the hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_carries_envelope_and_summary() {
        let response = LoginResponse {
            success: true,
            message: "Login successful.".into(),
            token: "tok".into(),
            user: UserSummary {
                username: "alice".into(),
                role: Role::Doctor,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""token":"tok""#));
        assert!(json.contains(r#""role":"doctor""#));
        assert!(!json.contains("password"));
    }

    #[test]
    fn profile_uses_camel_case_phone_number() {
        let profile = UserProfile {
            username: "alice".into(),
            email: "alice@x.com".into(),
            phone_number: "555-0100".into(),
            role: Role::User,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""phoneNumber":"555-0100""#));
    }

    #[test]
    fn register_request_accepts_camel_case_payload() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","email":"alice@x.com","password":"pw12345",
                "phoneNumber":"555-0100","role":"doctor"}"#,
        )
        .unwrap();
        assert_eq!(payload.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(payload.role.as_deref(), Some("doctor"));
    }

    #[test]
    fn register_request_tolerates_missing_fields() {
        let payload: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert!(payload.email.is_none());
        assert!(payload.password.is_none());
    }
}
