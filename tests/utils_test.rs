use bandlist::config::Credentials;
use bandlist::management::TokenManager;
use bandlist::spotify::auth::authorize_url;
use bandlist::types::Token;
use bandlist::utils::*;
use chrono::Utc;

fn create_test_token(scope: &str, expires_in: u64, age: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: scope.to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64 - age,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // SHA256 digest encoded without padding
    assert_eq!(challenge.len(), 43);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 16);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_similarity_known_values() {
    assert_eq!(similarity("abcd", "bcde"), 0.75);
    assert_eq!(similarity("tommy", "tommi"), 0.8);
    assert_eq!(similarity("abcdefghij", "abcdefgxyz"), 0.7);
    assert_eq!(similarity("Paranoid", "Paranoid (Remastered)"), 16.0 / 29.0);
}

#[test]
fn test_similarity_ignores_case() {
    assert_eq!(similarity("Walk", "WALK"), 1.0);
    assert_eq!(similarity("Cowboys From Hell", "cowboys from hell"), 1.0);
}

#[test]
fn test_similarity_identity_and_empty() {
    assert_eq!(similarity("Cemetery Gates", "Cemetery Gates"), 1.0);
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(similarity("Walk", ""), 0.0);
    assert_eq!(similarity("", "Walk"), 0.0);
    assert_eq!(similarity("abc", "xyz"), 0.0);
}

#[test]
fn test_similarity_symmetric_and_bounded() {
    let names = [
        "Walk",
        "Walk (Live)",
        "Cemetery Gates",
        "Domination",
        "Floods",
        "Schism",
        "Sober",
        "Forty Six & 2",
        "Ænema",
        "abab",
        "baba",
        "",
    ];

    for a in names {
        for b in names {
            let ab = similarity(a, b);
            let ba = similarity(b, a);
            assert_eq!(ab, ba, "similarity({a:?}, {b:?}) is not symmetric");
            assert!((0.0..=1.0).contains(&ab), "similarity({a:?}, {b:?}) = {ab}");
        }
    }
}

#[test]
fn test_parse_threshold_valid_inputs() {
    assert_eq!(parse_threshold("0.7").unwrap(), 0.7);
    assert_eq!(parse_threshold(" 0 ").unwrap(), 0.0);
    assert_eq!(parse_threshold("1").unwrap(), 1.0);
}

#[test]
fn test_parse_threshold_invalid_inputs() {
    let result = parse_threshold("high");
    assert!(result.unwrap_err().contains("expected a number"));

    let result = parse_threshold("1.5");
    assert!(result.unwrap_err().contains("between 0 and 1"));

    let result = parse_threshold("-0.1");
    assert!(result.is_err());
}

#[test]
fn test_token_scope_coverage() {
    let manager = TokenManager::new(create_test_token(
        "playlist-modify-private playlist-modify-public user-read-email",
        3600,
        0,
    ));
    assert!(manager.covers_scope("playlist-modify-public playlist-modify-private"));

    let manager = TokenManager::new(create_test_token("playlist-modify-public", 3600, 0));
    assert!(!manager.covers_scope("playlist-modify-public playlist-modify-private"));
}

#[test]
fn test_token_expiry() {
    // fresh token
    assert!(!TokenManager::new(create_test_token("", 3600, 0)).is_expired());

    // inside the refresh margin
    assert!(TokenManager::new(create_test_token("", 3600, 3500)).is_expired());

    // long gone
    assert!(TokenManager::new(create_test_token("", 3600, 7200)).is_expired());
}

#[test]
fn test_authorize_url_with_client_secret() {
    let credentials = Credentials::new(
        "client".to_string(),
        Some("secret".to_string()),
        "http://localhost:8888/callback".to_string(),
    );
    assert!(!credentials.uses_pkce());

    let url = authorize_url(&credentials, "xyz", None).unwrap();
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert!(params.contains(&("client_id".to_string(), "client".to_string())));
    assert!(params.contains(&("response_type".to_string(), "code".to_string())));
    assert!(params.contains(&(
        "redirect_uri".to_string(),
        "http://localhost:8888/callback".to_string()
    )));
    assert!(params.contains(&(
        "scope".to_string(),
        "playlist-modify-public playlist-modify-private".to_string()
    )));
    assert!(params.contains(&("state".to_string(), "xyz".to_string())));
    assert!(!params.iter().any(|(k, _)| k == "code_challenge"));
}

#[test]
fn test_authorize_url_with_pkce() {
    // an empty secret counts as no secret
    let credentials = Credentials::new(
        "client".to_string(),
        Some("  ".to_string()),
        "http://localhost:8888/callback".to_string(),
    );
    assert!(credentials.uses_pkce());

    let verifier = generate_code_verifier();
    let url = authorize_url(&credentials, "xyz", Some(&verifier)).unwrap();
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert!(params.contains(&("code_challenge_method".to_string(), "S256".to_string())));
    assert!(params.contains(&(
        "code_challenge".to_string(),
        generate_code_challenge(&verifier)
    )));
}

#[tokio::test]
async fn test_health_reports_version() {
    let axum::Json(body) = bandlist::api::health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "bandlist");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_bind_callback_server_from_redirect_uri() {
    let (listener, path) = bandlist::server::bind("http://127.0.0.1:0/callback")
        .await
        .unwrap();
    assert_eq!(path, "/callback");
    assert!(listener.local_addr().unwrap().port() > 0);

    assert!(bandlist::server::bind("not a uri").await.is_err());
}

#[tokio::test]
async fn test_bind_rejects_unroutable_callback_paths() {
    let err = bandlist::server::bind("http://127.0.0.1:0/health")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("reserved"));

    assert!(bandlist::server::validate_callback_path("/cb/:id").is_err());
    assert!(bandlist::server::validate_callback_path("/*rest").is_err());
    assert!(bandlist::server::validate_callback_path("/auth/{code}").is_err());

    assert!(bandlist::server::validate_callback_path("/callback").is_ok());
    assert!(bandlist::server::validate_callback_path("/").is_ok());
}

#[tokio::test]
async fn test_callback_server_serves_health_and_callback() {
    use bandlist::types::AuthState;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    let (listener, path) = bandlist::server::bind("http://127.0.0.1:0/callback")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();

    let state = Arc::new(Mutex::new(AuthState {
        csrf_state: "xyz".to_string(),
        code_verifier: None,
        token: None,
        error: None,
    }));
    let credentials = Credentials::new(
        "client".to_string(),
        None,
        format!("http://127.0.0.1:{}/callback", port),
    );
    tokio::spawn(bandlist::server::start_api_server(
        listener,
        path,
        state.clone(),
        credentials,
    ));

    let base = format!("http://127.0.0.1:{}", port);
    let health: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    // wrong state is ignored
    reqwest::get(format!("{}/callback?state=nope&error=access_denied", base))
        .await
        .unwrap();
    assert!(state.lock().await.error.is_none());

    reqwest::get(format!("{}/callback?state=xyz&error=access_denied", base))
        .await
        .unwrap();
    assert_eq!(state.lock().await.error.as_deref(), Some("access_denied"));
}
