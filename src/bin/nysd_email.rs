use nysd_autosignup::api;
use nysd_autosignup::config::{EmailConfig, ServerConfig};
use nysd_autosignup::mail::Mailer;
use nysd_autosignup::server;
use nysd_autosignup::state::EmailState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env()?;
    server::init_tracing(&server_config);

    tracing::info!("Starting welcome email function...");

    // Fail fast on missing credentials
    let config = EmailConfig::from_env()?;
    tracing::info!(
        application = %config.application_name,
        sender = %config.sender,
        port = server_config.port,
        "Configuration loaded"
    );

    let client = server::http_client(&server_config)?;
    let mailer = Mailer::new(client, &config);

    // Exchange the refresh token at cold start
    match mailer.credential().access_token().await {
        Ok(_) => tracing::info!("Gmail credential ready"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to obtain Gmail access token");
            // Continue anyway, the first request retries the exchange
        }
    }

    let state = EmailState::new(mailer);

    server::serve(api::email_router(state), &server_config).await
}
