use reqwest::Client;

use crate::config::EmailConfig;
use crate::error::{AppError, Result};
use crate::models::GmailMessage;

/// Gmail `users.messages.send` for the authenticated account
#[derive(Clone)]
pub struct GmailClient {
    client: Client,
    api_base: String,
    application_name: String,
}

impl GmailClient {
    pub fn new(client: Client, config: &EmailConfig) -> Self {
        Self {
            client,
            api_base: config.gmail_api_base.trim_end_matches('/').to_string(),
            application_name: config.application_name.clone(),
        }
    }

    pub async fn send_raw(&self, access_token: &str, raw: String) -> Result<()> {
        let url = format!("{}/gmail/v1/users/me/messages/send", self.api_base);

        let res = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .header("User-Agent", &self.application_name)
            .json(&GmailMessage { raw })
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                service: "Gmail",
                status,
                body,
            });
        }

        Ok(())
    }
}
