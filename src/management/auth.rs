use std::path::PathBuf;

use chrono::Utc;

use crate::{config, config::Credentials, spotify, types::Token, warning};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it
    /// is about to expire. A failed refresh keeps the old token and lets the
    /// next API call report the authorization error.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(&self.token.refresh_token, credentials).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh access token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    /// True when every word of `scope` was granted to the cached token.
    pub fn covers_scope(&self, scope: &str) -> bool {
        let granted: Vec<&str> = self.token.scope.split_whitespace().collect();
        scope.split_whitespace().all(|s| granted.contains(&s))
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
