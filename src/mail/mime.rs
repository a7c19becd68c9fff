//! RFC 5322 message construction for the Gmail `raw` field

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};

pub const WELCOME_SUBJECT: &str = "[NYSD] You're on the road to joining NYSD!";

const WELCOME_BODY: &str = include_str!("welcome_body.txt");

/// Body line length for the base64 transfer encoding
const LINE_LEN: usize = 76;

/// The welcome text, identical for every recipient
pub fn welcome_body() -> &'static str {
    WELCOME_BODY.trim()
}

/// A bare `local@domain` address that is safe to put in a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: &str) -> Result<Self> {
        let addr = input.trim();

        if addr.is_empty() {
            return Err(AppError::InvalidAddress("address is empty".to_string()));
        }
        if addr.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::InvalidAddress(format!(
                "{:?} contains whitespace or control characters",
                addr
            )));
        }

        let (local, domain) = addr
            .split_once('@')
            .ok_or_else(|| AppError::InvalidAddress(format!("{:?} has no '@'", addr)))?;

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(AppError::InvalidAddress(format!(
                "{:?} is not of the form local@domain",
                addr
            )));
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return Err(AppError::InvalidAddress(format!(
                "{:?} has a malformed domain",
                addr
            )));
        }

        Ok(Self(addr.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-part text email
#[derive(Debug, Clone)]
pub struct Email {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

impl Email {
    /// The fixed welcome email addressed to `to`
    pub fn welcome(from: &EmailAddress, to: &str) -> Result<Self> {
        Ok(Self {
            from: from.clone(),
            to: EmailAddress::parse(to)?,
            subject: WELCOME_SUBJECT.to_string(),
            body: welcome_body().to_string(),
        })
    }

    /// Serialize headers and body with CRLF line endings
    pub fn to_rfc5322(&self) -> Vec<u8> {
        let mut out = String::new();

        push_header(&mut out, "From", self.from.as_str());
        push_header(&mut out, "To", self.to.as_str());
        push_header(&mut out, "Subject", &encode_header_value(&self.subject));
        push_header(&mut out, "Date", &Utc::now().to_rfc2822());
        push_header(
            &mut out,
            "Message-ID",
            &format!("<{}@{}>", Uuid::new_v4(), self.from.domain()),
        );
        push_header(&mut out, "MIME-Version", "1.0");
        push_header(&mut out, "Content-Type", "text/plain; charset=UTF-8");
        push_header(&mut out, "Content-Transfer-Encoding", "base64");
        out.push_str("\r\n");

        let encoded = STANDARD.encode(self.body.as_bytes());
        // base64 output is ASCII so byte slicing stays on char boundaries
        for chunk in encoded.as_bytes().chunks(LINE_LEN) {
            out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
            out.push_str("\r\n");
        }

        out.into_bytes()
    }

    /// URL-safe, unpadded base64 of the raw message, as Gmail expects
    pub fn to_gmail_raw(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_rfc5322())
    }
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str("\r\n");
}

/// RFC 2047 B-encoding for non-ASCII header values
fn encode_header_value(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
    }
}
