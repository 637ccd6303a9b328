use axum::{Extension, Router, routing::get};
use reqwest::Url;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, config::Credentials, types::AuthState};

/// Binds a listener to the host and port of `redirect_uri` and returns it
/// together with the callback path the server has to answer on.
pub async fn bind(redirect_uri: &str) -> Res<(TcpListener, String)> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| format!("Invalid redirect URI '{}': {}", redirect_uri, e))?;

    let host = url
        .host_str()
        .ok_or_else(|| format!("Redirect URI '{}' has no host", redirect_uri))?
        .to_string();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("Redirect URI '{}' has no port", redirect_uri))?;
    validate_callback_path(url.path())?;

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| format!("Failed to bind callback server to {}:{}: {}", host, port, e))?;

    Ok((listener, url.path().to_string()))
}

/// Checks that `path` can be routed next to `/health` as a literal route.
pub fn validate_callback_path(path: &str) -> Res<()> {
    if path == "/health" {
        return Err(format!("Callback path '{}' is reserved for the health check", path).into());
    }

    let dynamic = path.split('/').any(|segment| {
        segment.starts_with(':') || segment.starts_with('*') || segment.contains('{')
    });
    if dynamic {
        return Err(format!("Callback path '{}' must not contain route parameters", path).into());
    }
    Ok(())
}

pub async fn start_api_server(
    listener: TcpListener,
    callback_path: String,
    state: Arc<Mutex<AuthState>>,
    credentials: Credentials,
) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(&callback_path, get(api::callback))
        .layer(Extension(state))
        .layer(Extension(credentials));

    if let Err(e) = axum::serve(listener, app).await {
        crate::warning!("Callback server stopped: {}", e);
    }
}
