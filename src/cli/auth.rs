use crate::{config::Credentials, error, management::TokenManager, spotify};

/// Runs the browser authorization even if a cached token exists.
pub async fn auth() {
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let token = match spotify::auth::login(&credentials).await {
        Ok(t) => t,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = TokenManager::new(token).persist().await {
        error!("Failed to save token to cache: {}", e);
    }
}
