//! Admin Profile Client
//!
//! Resolves the admin identity the chat controller connects on behalf of.
//! The core treats an unresolved identity as "cannot connect"; a load
//! failure is surfaced separately from connection errors.

use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::shared::error::ChatError;

use super::config::ConsoleConfig;

/// The administrator identity behind the console session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    /// Stable admin id, announced to the server on join
    pub id: String,
    /// Account email
    pub email: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Account role label
    pub role: String,
    /// Whether the account is active
    #[serde(default)]
    pub is_active: bool,
    /// Whether the account is blocked
    #[serde(default)]
    pub is_blocked: bool,
}

impl AdminProfile {
    /// Display name shown as the sender of admin messages: full name,
    /// falling back to the email, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                if self.email.is_empty() {
                    "Admin"
                } else {
                    self.email.as_str()
                }
            }
        }
    }
}

/// HTTP client for the admin profile endpoint
pub struct ProfileClient {
    config: ConsoleConfig,
    client: reqwest::Client,
}

impl ProfileClient {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the current administrator's profile from the backend
    pub fn fetch_admin_profile(&self) -> Result<AdminProfile, ChatError> {
        let url = self.config.api_url("/api/users/profile");
        let token = self
            .config
            .get_token()
            .ok_or_else(|| ChatError::profile_load("Not authenticated"))?
            .to_string();

        let rt = Runtime::new()
            .map_err(|e| ChatError::profile_load(format!("Failed to create runtime: {}", e)))?;

        rt.block_on(async {
            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await
                .map_err(|e| ChatError::profile_load(format!("Network error: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
                return Err(ChatError::profile_load(format!(
                    "Request failed: {} - {}",
                    status, error_text
                )));
            }

            response
                .json::<AdminProfile>()
                .await
                .map_err(|e| ChatError::profile_load(format!("Failed to parse response: {}", e)))
        })
    }
}
