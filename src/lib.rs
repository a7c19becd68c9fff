pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod mail;
pub mod models;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{EmailConfig, InvitationConfig, ServerConfig};
pub use error::{AppError, Result};
pub use state::{EmailState, InvitationState};
