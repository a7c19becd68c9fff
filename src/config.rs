use std::env;
use std::time::Duration;

use crate::mail::EmailAddress;

/// GitHub organization new students are invited to
pub const GITHUB_ORG: &str = "nysd-followers";

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com";

/// Listener and outbound-client settings shared by both functions
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upstream_timeout_seconds: u64,
    pub json_logs: bool,
}

/// What the invitation function does with a non-2xx answer from GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamPolicy {
    /// Answer 200 regardless of what GitHub said
    Mask,
    /// Turn a non-2xx answer into a 502
    Report,
}

#[derive(Debug, Clone)]
pub struct InvitationConfig {
    pub github_token: String,
    pub org: String,
    pub api_base: String,
    pub upstream_policy: UpstreamPolicy,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub application_name: String,
    pub sender: EmailAddress,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: String,
    pub gmail_api_base: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            upstream_timeout_seconds: lookup("UPSTREAM_TIMEOUT_SECONDS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or(ConfigError::InvalidVar("UPSTREAM_TIMEOUT_SECONDS"))?,
            json_logs: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

impl InvitationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let report = lookup("INVITE_REPORT_UPSTREAM_ERRORS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(InvitationConfig {
            github_token: required(&lookup, "GH_TOKEN")?,
            org: GITHUB_ORG.to_string(),
            api_base: lookup("GITHUB_API_BASE")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
            upstream_policy: if report {
                UpstreamPolicy::Report
            } else {
                UpstreamPolicy::Mask
            },
        })
    }
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(EmailConfig {
            application_name: required(&lookup, "GAPI_APPLICATION_NAME")?,
            sender: EmailAddress::parse(&required(&lookup, "GAPI_EMAIL")?)
                .map_err(|_| ConfigError::InvalidVar("GAPI_EMAIL"))?,
            client_id: required(&lookup, "GAPI_CLIENT_ID")?,
            client_secret: required(&lookup, "GAPI_CLIENT_SECRET")?,
            refresh_token: required(&lookup, "GAPI_REFRESH_TOKEN")?,
            token_url: lookup("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.to_string()),
            gmail_api_base: lookup("GMAIL_API_BASE")
                .unwrap_or_else(|| DEFAULT_GMAIL_API_BASE.to_string()),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("{0} environment variable is invalid")]
    InvalidVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn test_upstream_timeout_must_be_positive() {
        for bad in ["0", "thirty", "-5", ""] {
            let result =
                ServerConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECONDS", bad)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidVar("UPSTREAM_TIMEOUT_SECONDS"))),
                "expected {:?} to be rejected",
                bad
            );
        }

        let config =
            ServerConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECONDS", "12")])).unwrap();
        assert_eq!(config.upstream_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_invitation_requires_token() {
        let result = InvitationConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingVar("GH_TOKEN"))));

        let result = InvitationConfig::from_lookup(lookup_from(&[("GH_TOKEN", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingVar("GH_TOKEN"))));
    }

    #[test]
    fn test_invitation_defaults_to_masking() {
        let config = InvitationConfig::from_lookup(lookup_from(&[("GH_TOKEN", "ghp_x")])).unwrap();
        assert_eq!(config.org, "nysd-followers");
        assert_eq!(config.api_base, DEFAULT_GITHUB_API_BASE);
        assert_eq!(config.upstream_policy, UpstreamPolicy::Mask);

        let config = InvitationConfig::from_lookup(lookup_from(&[
            ("GH_TOKEN", "ghp_x"),
            ("INVITE_REPORT_UPSTREAM_ERRORS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.upstream_policy, UpstreamPolicy::Report);
    }

    #[test]
    fn test_email_names_missing_variable() {
        let result = EmailConfig::from_lookup(lookup_from(&[
            ("GAPI_APPLICATION_NAME", "nysd"),
            ("GAPI_EMAIL", "nysd@example.com"),
            ("GAPI_CLIENT_ID", "id"),
            ("GAPI_CLIENT_SECRET", "secret"),
        ]));
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "GAPI_REFRESH_TOKEN environment variable is required"
        );
    }

    fn email_vars(sender: &'static str) -> Vec<(&'static str, &'static str)> {
        vec![
            ("GAPI_APPLICATION_NAME", "nysd"),
            ("GAPI_EMAIL", sender),
            ("GAPI_CLIENT_ID", "id"),
            ("GAPI_CLIENT_SECRET", "secret"),
            ("GAPI_REFRESH_TOKEN", "refresh"),
        ]
    }

    #[test]
    fn test_email_sender_is_validated_at_load() {
        for bad in ["misconfigured sender", "no-at-sign", "a@b@c"] {
            let result = EmailConfig::from_lookup(lookup_from(&email_vars(bad)));
            assert!(
                matches!(result, Err(ConfigError::InvalidVar("GAPI_EMAIL"))),
                "expected {:?} to be rejected",
                bad
            );
        }

        let config = EmailConfig::from_lookup(lookup_from(&email_vars("nysd@nyjc.edu.sg"))).unwrap();
        assert_eq!(config.sender.as_str(), "nysd@nyjc.edu.sg");
        assert_eq!(config.token_url, DEFAULT_GOOGLE_TOKEN_URL);
    }
}
