use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::Mutex;

use crate::{
    Res, config,
    config::Credentials,
    info,
    management::TokenManager,
    server, success,
    types::{AuthState, Token, TokenResponse},
    utils, warning,
};

/// How long the authorization waits for the browser callback.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Returns a token manager holding a token that covers the requested scope.
///
/// A cached token is reused when its granted scope covers every requested
/// scope word. Otherwise the interactive authorization runs and the new token
/// is persisted. A token that cannot be persisted is still used for this run.
pub async fn authorize(credentials: &Credentials) -> Res<TokenManager> {
    match TokenManager::load().await {
        Ok(manager) if manager.covers_scope(&credentials.scope) => return Ok(manager),
        Ok(_) => warning!("Cached token lacks the required scope, authorizing again."),
        Err(_) => info!("No cached token found, starting authorization."),
    }

    let manager = TokenManager::new(login(credentials).await?);
    if let Err(e) = manager.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }
    Ok(manager)
}

/// Runs the OAuth 2.0 authorization-code flow against Spotify.
///
/// 1. Binds the local callback server to the redirect URI
/// 2. Opens the authorization URL in the browser (or prints it)
/// 3. Waits for the callback handler to exchange the code for a token
///
/// Without a client secret the PKCE variant is used: a random verifier is
/// kept in the shared state and its S256 challenge is sent with the
/// authorization request.
///
/// # Errors
///
/// Fails if the redirect URI cannot be served locally, the user denies
/// access, the code exchange fails or no callback arrives within two minutes.
pub async fn login(credentials: &Credentials) -> Res<Token> {
    let (listener, callback_path) = server::bind(&credentials.redirect_uri).await?;

    let csrf_state = utils::generate_state();
    let code_verifier = credentials
        .uses_pkce()
        .then(utils::generate_code_verifier);
    let auth_url = authorize_url(credentials, &csrf_state, code_verifier.as_deref())?;

    let shared_state = Arc::new(Mutex::new(AuthState {
        csrf_state,
        code_verifier,
        token: None,
        error: None,
    }));

    let server = tokio::spawn(server::start_api_server(
        listener,
        callback_path,
        Arc::clone(&shared_state),
        credentials.clone(),
    ));

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_token(shared_state).await;
    server.abort();

    let token = result?;
    success!("Authentication successful!");
    Ok(token)
}

/// Builds the URL of the authorization page.
pub fn authorize_url(
    credentials: &Credentials,
    state: &str,
    code_verifier: Option<&str>,
) -> Result<Url, String> {
    let mut params = vec![
        ("client_id", credentials.client_id.clone()),
        ("response_type", "code".to_string()),
        ("redirect_uri", credentials.redirect_uri.clone()),
        ("scope", credentials.scope.clone()),
        ("state", state.to_string()),
    ];

    if let Some(verifier) = code_verifier {
        params.push(("code_challenge_method", "S256".to_string()));
        params.push(("code_challenge", utils::generate_code_challenge(verifier)));
    }

    Url::parse_with_params(&config::spotify_apiauth_url(), &params).map_err(|e| e.to_string())
}

async fn wait_for_token(shared_state: Arc<Mutex<AuthState>>) -> Res<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = &lock.token {
                return Ok(token.clone());
            }
            if let Some(error) = &lock.error {
                return Err(format!("Authentication failed: {}", error).into());
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err("Authentication timed out.".into())
}

/// Exchanges an authorization code for a token.
///
/// `code_verifier` must be the verifier of the PKCE challenge sent with the
/// authorization request, or `None` for the client-secret flow.
pub async fn exchange_code(
    code: &str,
    code_verifier: Option<&str>,
    credentials: &Credentials,
) -> Result<Token, reqwest::Error> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", credentials.redirect_uri.as_str()),
    ];
    if let Some(verifier) = code_verifier {
        form.push(("code_verifier", verifier));
    }
    if credentials.uses_pkce() {
        form.push(("client_id", credentials.client_id.as_str()));
    }

    let request = token_request(credentials).form(&form);
    let json = request
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(into_token(json, String::new()))
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may omit the refresh token in the response, in which case the
/// given one stays valid and is carried over.
pub async fn refresh_token(
    refresh_token: &str,
    credentials: &Credentials,
) -> Result<Token, reqwest::Error> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];
    if credentials.uses_pkce() {
        form.push(("client_id", credentials.client_id.as_str()));
    }

    let json = token_request(credentials)
        .form(&form)
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(into_token(json, refresh_token.to_string()))
}

// Confidential clients authenticate with HTTP Basic, PKCE clients send their
// client id in the form instead.
fn token_request(credentials: &Credentials) -> RequestBuilder {
    let request = Client::new().post(config::spotify_apitoken_url());

    match &credentials.client_secret {
        Some(secret) => request.basic_auth(&credentials.client_id, Some(secret)),
        None => request,
    }
}

fn into_token(json: TokenResponse, previous_refresh_token: String) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or(previous_refresh_token),
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
