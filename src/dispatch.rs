//! Direct-action dispatchers for SMS and email
//!
//! Both operations check their inputs for presence, build the URI with the
//! same rule the payload builder uses, and hand it to a [`UriOpener`].

use crate::error::{Error, Result};
use crate::payload::{mailto_uri, sms_uri};
use async_trait::async_trait;
use std::io;

/// Platform capability that opens a URI in its default handler
#[async_trait]
pub trait UriOpener: Send + Sync {
    /// Open `uri`; an error means the platform refused it
    async fn open(&self, uri: &str) -> io::Result<()>;
}

/// Opens URIs by spawning the desktop handler (`xdg-open`, `open`)
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    /// Use the platform default handler
    pub fn new() -> Self {
        Self::with_program(default_program())
    }

    /// Use a specific handler program
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Handler program this opener spawns
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

fn default_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

#[async_trait]
impl UriOpener for SystemOpener {
    async fn open(&self, uri: &str) -> io::Result<()> {
        tracing::debug!(program = %self.program, uri, "opening URI");
        let status = tokio::process::Command::new(&self.program)
            .arg(uri)
            .stdin(std::process::Stdio::null())
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

/// Open the SMS composer prefilled with `message`. Returns the dispatched URI.
pub async fn send_sms(opener: &dyn UriOpener, number: &str, message: &str) -> Result<String> {
    require("phone number", &[number, message])?;
    dispatch(opener, "sms", sms_uri(number, message)).await
}

/// Open the mail composer prefilled with `message`. Returns the dispatched URI.
pub async fn send_email(opener: &dyn UriOpener, address: &str, message: &str) -> Result<String> {
    require("email address", &[address, message])?;
    dispatch(opener, "mailto", mailto_uri(address, message)).await
}

// Recipient and message are checked together and reported under the
// recipient's name, so both gaps surface as the same alert.
fn require(recipient: &str, values: &[&str]) -> Result<()> {
    if values.iter().any(|value| value.is_empty()) {
        Err(Error::MissingField(recipient.to_string()))
    } else {
        Ok(())
    }
}

async fn dispatch(opener: &dyn UriOpener, scheme: &'static str, uri: String) -> Result<String> {
    match opener.open(&uri).await {
        Ok(()) => {
            tracing::info!(scheme, "URI handed to platform");
            Ok(uri)
        }
        Err(err) => {
            tracing::warn!(scheme, error = %err, "platform refused URI");
            Err(Error::DispatchFailed {
                scheme,
                reason: err.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_dispatch_failure() {
        let opener = SystemOpener::with_program("/nonexistent/qrform-opener");
        let err = send_sms(&opener, "555", "hi").await.unwrap_err();
        assert!(matches!(err, Error::DispatchFailed { scheme: "sms", .. }));
    }

    #[test]
    fn test_default_program() {
        assert!(!SystemOpener::new().program().is_empty());
    }
}
