use serde::{Deserialize, Serialize};

/// Body both functions accept
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
}

/// Organization role granted by an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    DirectMember,
}

/// POST /orgs/{org}/invitations body
#[derive(Debug, Serialize)]
pub struct InvitationPayload<'a> {
    pub email: &'a str,
    pub role: OrgRole,
}

/// Health response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub function: String,
    pub timestamp: String,
}
