//! Request execution against the MotherDuck admin API.
//!
//! Every request and response is logged to stdout in full, with the
//! admin credential masked down to a short prefix. The executor performs
//! no retries; any non-2xx status or transport failure is returned to
//! the caller as an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::error;

use crate::error::{ProvisionError, Result};

/// Base URL of the MotherDuck REST API.
pub const API_BASE: &str = "https://api.motherduck.com";

/// Fixed timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of credential characters shown in logged Authorization headers.
const MASK_PREFIX_LEN: usize = 13;

/// Seam over the admin API, letting the provisioning loop run against
/// a scripted implementation in tests.
#[async_trait]
pub trait ApiExecutor: Send + Sync {
    /// Send a request and return the parsed JSON body of a 2xx response.
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value>;
}

/// Executor backed by reqwest.
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    credential: String,
}

impl HttpExecutor {
    /// Create an executor holding the admin credential.
    pub fn new(credential: String) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: API_BASE.to_string(),
            credential,
        })
    }
}

#[async_trait]
impl ApiExecutor for HttpExecutor {
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        println!("\n{}", "=".repeat(60));
        println!("REQUEST: {method} {url}");
        println!("{}", "=".repeat(60));
        println!("\nRequest Headers:");
        println!(
            "  Authorization: Bearer {}",
            mask_credential(&self.credential)
        );
        println!("  Content-Type: application/json");

        if let Some(body) = body {
            println!("\nRequest Body:");
            println!("{}", pretty(body));
        }

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.credential)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Request failed: {e}");
                return Err(e.into());
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        println!("\n{}", "=".repeat(60));
        println!(
            "RESPONSE: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );
        println!("{}", "=".repeat(60));
        println!("\nResponse Headers:");
        for (name, value) in headers.iter() {
            println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }

        println!("\nResponse Body:");
        let parsed: std::result::Result<Value, _> = serde_json::from_str(&text);
        match &parsed {
            Ok(json) => println!("{}", pretty(json)),
            Err(_) => println!("{text}"),
        }

        if !status.is_success() {
            error!("Request failed with status {status}");
            return Err(ProvisionError::Api { status, body: text });
        }

        match parsed {
            Ok(json) => Ok(json),
            Err(e) => {
                error!("Response was not valid JSON: {e}");
                Err(e.into())
            }
        }
    }
}

/// Truncate a credential for log output; only a short prefix is ever shown.
///
/// Credentials of `MASK_PREFIX_LEN` characters or fewer come through
/// whole; real admin tokens are far longer than the bound.
fn mask_credential(credential: &str) -> String {
    let prefix: String = credential.chars().take(MASK_PREFIX_LEN).collect();
    format!("{prefix}...")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_truncates_long_credential() {
        let credential = "abcdefghijklmnopqrstuvwxyz0123456789";
        let masked = mask_credential(credential);
        assert_eq!(masked, "abcdefghijklm...");
        assert!(!masked.contains(credential));
    }

    #[test]
    fn test_mask_short_credential() {
        assert_eq!(mask_credential("abc123"), "abc123...");
    }

    #[test]
    fn test_mask_empty_credential() {
        assert_eq!(mask_credential(""), "...");
    }

    #[test]
    fn test_mask_bound_is_thirteen_chars() {
        let masked = mask_credential(&"x".repeat(100));
        assert_eq!(masked.len(), MASK_PREFIX_LEN + 3);
    }
}
