pub mod google;
pub mod signup;

pub use google::{GmailMessage, TokenErrorResponse, TokenResponse};
pub use signup::{HealthResponse, InvitationPayload, OrgRole, SignupRequest};
