pub mod health;
pub mod invitation;
pub mod welcome;

use axum::routing::post;
use axum::Router;

use crate::state::{EmailState, InvitationState};

pub const INVITATION_FUNCTION: &str = "gh-invitation";
pub const EMAIL_FUNCTION: &str = "nysd-email";

/// Router for the invitation function. The path is irrelevant: any POST,
/// `/health` included, is an invitation request.
pub fn invitation_router(state: InvitationState) -> Router {
    Router::new()
        .route(
            "/health",
            health::health(INVITATION_FUNCTION).post(invitation::invite),
        )
        .route("/", post(invitation::invite))
        .route("/{*path}", post(invitation::invite))
        .with_state(state)
}

/// Router for the welcome-email function
pub fn email_router(state: EmailState) -> Router {
    Router::new()
        .route(
            "/health",
            health::health(EMAIL_FUNCTION).post(welcome::send_welcome),
        )
        .route("/", post(welcome::send_welcome))
        .route("/{*path}", post(welcome::send_welcome))
        .with_state(state)
}

/// Parse the request body the way both functions expect it. Content-Type is
/// not checked; a body that isn't `{"email": ...}` fails here, before any
/// outbound call.
fn parse_signup(body: &[u8]) -> crate::Result<crate::models::SignupRequest> {
    Ok(serde_json::from_slice(body)?)
}
