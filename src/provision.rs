//! Account creation, token issuance and the per-store provisioning loop.
//!
//! Each store gets one service account and one read-write token. Failures
//! are isolated per store: a failed account or token call skips that store
//! and the loop moves on to the next index.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::executor::ApiExecutor;

/// Number of stores provisioned per run.
pub const STORE_COUNT: u32 = 12;

/// Pause between account creation and token issuance, giving the remote
/// side time to finish creating the account before it is used.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// A successfully provisioned store: service account plus issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningResult {
    pub store_index: u32,
    pub account_name: String,
    pub issued_token: String,
}

/// Body of a create-account request.
#[derive(Debug, Serialize)]
struct CreateUserRequest {
    username: String,
}

/// Body of a token-issuance request.
#[derive(Debug, Serialize)]
struct CreateTokenRequest {
    name: String,
    token_type: &'static str,
}

/// Deterministic service-account username for a store.
fn account_username(store_index: u32) -> String {
    format!("store_{store_index}_service")
}

/// Deterministic token label for a store.
fn token_label(store_index: u32) -> String {
    format!("store_{store_index}_token")
}

/// Create the service account for a store and return its username.
pub async fn create_account(executor: &dyn ApiExecutor, store_index: u32) -> Result<String> {
    let username = account_username(store_index);

    println!("\n{}", "=".repeat(60));
    println!("Creating service account: {username}");
    println!("{}", "=".repeat(60));

    let body = serde_json::to_value(CreateUserRequest {
        username: username.clone(),
    })?;

    match executor.execute(Method::POST, "/v1/users", Some(&body)).await {
        Ok(_) => {
            info!("Created service account: {username}");
            Ok(username)
        }
        Err(e) => {
            error!("Failed to create service account {username}: {e}");
            Err(e)
        }
    }
}

/// Issue a read-write token for a service account.
///
/// The API has returned the token under both `token` and `access_token`;
/// check both, preferring `token`. A response carrying neither field is a
/// soft failure: logged as a warning and reported as `None` rather than
/// an error.
pub async fn issue_token(
    executor: &dyn ApiExecutor,
    username: &str,
    store_index: u32,
) -> Result<Option<String>> {
    let name = token_label(store_index);

    println!("\n{}", "=".repeat(60));
    println!("Generating token for: {username}");
    println!("{}", "=".repeat(60));

    let body = serde_json::to_value(CreateTokenRequest {
        name,
        token_type: "read_write",
    })?;

    let response = match executor
        .execute(
            Method::POST,
            &format!("/v1/users/{username}/tokens"),
            Some(&body),
        )
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to generate token for {username}: {e}");
            return Err(e);
        }
    };

    match extract_token(&response) {
        Some(token) => {
            info!("Generated token for {username}");
            Ok(Some(token))
        }
        None => {
            warn!("No token found in response. Full response: {response}");
            Ok(None)
        }
    }
}

/// Pull the issued token out of a response, checking both known field names.
fn extract_token(response: &Value) -> Option<String> {
    ["token", "access_token"]
        .into_iter()
        .find_map(|key| {
            response
                .get(key)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
        })
        .map(str::to_string)
}

/// Runs the per-store provisioning loop against an executor.
pub struct Orchestrator<'a> {
    executor: &'a dyn ApiExecutor,
    settle_delay: Duration,
}

impl<'a> Orchestrator<'a> {
    pub fn new(executor: &'a dyn ApiExecutor) -> Self {
        Self {
            executor,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay (tests run with a zero delay).
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Provision every store index from 1 to `store_count` inclusive.
    ///
    /// The loop always completes all indices; a failure at one index is
    /// logged and that store is skipped, never aborting the run.
    pub async fn run(&self, store_count: u32) -> Vec<ProvisioningResult> {
        let mut results = Vec::new();

        for store_index in 1..=store_count {
            let account_name = match create_account(self.executor, store_index).await {
                Ok(name) => name,
                Err(e) => {
                    error!("Failed for store {store_index}: {e}");
                    continue;
                }
            };

            tokio::time::sleep(self.settle_delay).await;

            match issue_token(self.executor, &account_name, store_index).await {
                Ok(Some(token)) => results.push(ProvisioningResult {
                    store_index,
                    account_name,
                    issued_token: token,
                }),
                Ok(None) => {}
                Err(e) => {
                    error!("Failed for store {store_index}: {e}");
                }
            }
        }

        results
    }
}
