use axum::{body::Bytes, extract::State, http::StatusCode};

use crate::config::UpstreamPolicy;
use crate::error::{AppError, Result};
use crate::state::InvitationState;

/// POST / - Invite the address to the GitHub organization
pub async fn invite(State(state): State<InvitationState>, body: Bytes) -> Result<StatusCode> {
    let request = super::parse_signup(&body)?;
    let org = &state.config.org;

    let outcome = state.github.invite_to_org(org, &request.email).await?;

    if outcome.is_success() {
        tracing::info!(org = %org, email = %request.email, status = outcome.status, "Invitation sent");
        return Ok(StatusCode::OK);
    }

    match state.upstream_policy() {
        UpstreamPolicy::Mask => {
            tracing::warn!(
                org = %org,
                email = %request.email,
                status = outcome.status,
                body = %outcome.body,
                "GitHub rejected invitation, answering 200 anyway"
            );
            Ok(StatusCode::OK)
        }
        UpstreamPolicy::Report => Err(AppError::Upstream {
            service: "GitHub",
            status: outcome.status,
            body: outcome.body,
        }),
    }
}
