use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config::Credentials, spotify, types::AuthState, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<AuthState>>>,
    Extension(credentials): Extension<Credentials>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;

    if params.get("state") != Some(&state.csrf_state) {
        return Html("<h4>State mismatch, ignoring callback.</h4>");
    }

    if let Some(error) = params.get("error") {
        state.error = Some(error.clone());
        return Html("<h4>Login failed.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = state.code_verifier.clone();
    match spotify::auth::exchange_code(code, verifier.as_deref(), &credentials).await {
        Ok(token) => {
            state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
