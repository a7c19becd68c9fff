//! Google OAuth2 credential backed by a long-lived refresh token
//!
//! No interactive authorization happens here: the refresh token was obtained
//! out of band and is exchanged for short-lived access tokens on demand.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::config::EmailConfig;
use crate::error::{AppError, Result};
use crate::models::{TokenErrorResponse, TokenResponse};

pub const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";

/// Tokens this close to expiry are exchanged again before use
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Used when the token endpoint omits `expires_in`
const DEFAULT_LIFETIME_SECONDS: i64 = 3600;

/// Longest lifetime accepted from the token endpoint
const MAX_LIFETIME_SECONDS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub secret: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECONDS) < self.expires_at
    }
}

pub struct RefreshTokenCredential {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    cached: Mutex<Option<AccessToken>>,
}

impl RefreshTokenCredential {
    pub fn new(client: Client, config: &EmailConfig) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Current access token, exchanging the refresh token when none is cached
    /// or the cached one is about to expire.
    ///
    /// The lock is held across the exchange, so concurrent callers on a cold
    /// instance wait for the first exchange instead of starting their own.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.secret.clone());
            }
            tracing::debug!(expires_at = %token.expires_at, "Access token expiring, refreshing");
        }

        let token = self.exchange().await?;
        let secret = token.secret.clone();
        *cached = Some(token);

        Ok(secret)
    }

    async fn exchange(&self) -> Result<AccessToken> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("scope", GMAIL_SEND_SCOPE),
        ];

        let res = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::OAuth(format!("token endpoint unreachable: {}", e)))?;

        let status = res.status();
        let body = res.text().await.unwrap_or_default();

        if !status.is_success() {
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(desc) => format!("{}: {}", e.error, desc),
                    None => e.error,
                })
                .unwrap_or_else(|_| format!("status {}", status.as_u16()));
            return Err(AppError::OAuth(reason));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::OAuth(format!("unreadable token response: {}", e)))?;

        if let Some(kind) = parsed.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                return Err(AppError::OAuth(format!("unexpected token type {}", kind)));
            }
        }

        let expires_at = expiry_after(Utc::now(), parsed.expires_in)?;

        tracing::info!(expires_at = %expires_at, "Obtained Gmail access token");

        Ok(AccessToken {
            secret: parsed.access_token,
            expires_at,
        })
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, token: AccessToken) {
        *self.cached.lock().await = Some(token);
    }
}

/// Deadline for a token issued at `now`. `expires_in` comes from upstream, so
/// it is clamped to `0..=MAX_LIFETIME_SECONDS` before any date arithmetic.
fn expiry_after(now: DateTime<Utc>, expires_in: Option<i64>) -> Result<DateTime<Utc>> {
    let lifetime = expires_in
        .unwrap_or(DEFAULT_LIFETIME_SECONDS)
        .clamp(0, MAX_LIFETIME_SECONDS);

    Duration::try_seconds(lifetime)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| AppError::OAuth(format!("unusable expires_in {}", lifetime)))
}
