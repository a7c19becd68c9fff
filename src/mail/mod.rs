pub mod gmail;
pub mod mime;
pub mod oauth;

use reqwest::Client;

use crate::config::EmailConfig;
use crate::error::Result;

pub use mime::{Email, EmailAddress, WELCOME_SUBJECT};
pub use oauth::RefreshTokenCredential;

/// Mailer abstraction (currently backed by Gmail)
pub struct Mailer {
    sender: EmailAddress,
    credential: RefreshTokenCredential,
    gmail: gmail::GmailClient,
}

impl Mailer {
    pub fn new(client: Client, config: &EmailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            credential: RefreshTokenCredential::new(client.clone(), config),
            gmail: gmail::GmailClient::new(client, config),
        }
    }

    /// Send the fixed welcome email to `to`
    pub async fn send_welcome(&self, to: &str) -> Result<()> {
        // Build first so a bad address never costs a token exchange
        let email = Email::welcome(&self.sender, to)?;
        let raw = email.to_gmail_raw();

        let token = self.credential.access_token().await?;
        self.gmail.send_raw(&token, raw).await
    }

    pub fn credential(&self) -> &RefreshTokenCredential {
        &self.credential
    }
}
