use serde::{Deserialize, Serialize};

/// Gmail `users.messages.send` envelope
#[derive(Debug, Serialize)]
pub struct GmailMessage {
    pub raw: String,
}

/// Google OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body the token endpoint returns on 4xx
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
