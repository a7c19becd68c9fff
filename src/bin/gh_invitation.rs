use nysd_autosignup::api;
use nysd_autosignup::config::{InvitationConfig, ServerConfig};
use nysd_autosignup::github::GitHubClient;
use nysd_autosignup::server;
use nysd_autosignup::state::InvitationState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env()?;
    server::init_tracing(&server_config);

    tracing::info!("Starting GitHub invitation function...");

    // Fail fast on missing credentials
    let config = InvitationConfig::from_env()?;
    tracing::info!(
        org = %config.org,
        policy = ?config.upstream_policy,
        port = server_config.port,
        "Configuration loaded"
    );

    let client = server::http_client(&server_config)?;
    let github = GitHubClient::new(client, &config);
    let state = InvitationState::new(config, github);

    server::serve(api::invitation_router(state), &server_config).await
}
