use axum::{body::Bytes, extract::State, http::StatusCode};

use crate::error::Result;
use crate::state::EmailState;

/// POST / - Send the welcome email
pub async fn send_welcome(State(state): State<EmailState>, body: Bytes) -> Result<StatusCode> {
    let request = super::parse_signup(&body)?;

    state.mailer.send_welcome(&request.email).await?;

    tracing::info!(email = %request.email, "Welcome email sent");
    Ok(StatusCode::OK)
}
