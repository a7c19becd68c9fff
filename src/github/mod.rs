//! GitHub REST client
//!
//! Only the organization-invitation endpoint is needed.

use reqwest::Client;

use crate::config::InvitationConfig;
use crate::error::Result;
use crate::models::{InvitationPayload, OrgRole};

pub const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "nysd-autosignup";

/// Status and body of the upstream answer, kept for the caller to judge
#[derive(Debug, Clone)]
pub struct InvitationOutcome {
    pub status: u16,
    pub body: String,
}

impl InvitationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    pub fn new(client: Client, config: &InvitationConfig) -> Self {
        Self {
            client,
            token: config.github_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Invite `email` to `org` as a direct member.
    ///
    /// Transport failures are errors; any HTTP answer, including 4xx/5xx, is
    /// returned as an [`InvitationOutcome`].
    pub async fn invite_to_org(&self, org: &str, email: &str) -> Result<InvitationOutcome> {
        let url = format!("{}/orgs/{}/invitations", self.api_base, org);
        let payload = InvitationPayload {
            email,
            role: OrgRole::DirectMember,
        };

        let res = self
            .client
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();

        Ok(InvitationOutcome { status, body })
    }
}
