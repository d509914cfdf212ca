use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Method, Request, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::SystemTime;
use supportflow_gate::auth::{
    CurrentSession, JwtSessionDecoder, Role, SessionClaims, SessionDecoder, SessionError,
    SessionToken, extract_token,
};

// --- Helper Functions ---

const TEST_SECRET: &str = "test-session-secret-1234567890";
const TEST_COOKIE: &str = "supportflow.session-token";

fn now() -> usize {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn mint(role: &str, name: &str, company_id: Option<&str>, exp: usize, secret: &str) -> String {
    let claims = serde_json::json!({
        "type": role,
        "name": name,
        "company_id": company_id,
        "exp": exp,
        "iat": now(),
    });
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn valid_client_token() -> String {
    mint("client", "alice", Some("acme"), now() + 3600, TEST_SECRET)
}

fn decoder() -> JwtSessionDecoder {
    JwtSessionDecoder::new(TEST_SECRET, TEST_COOKIE)
}

fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn get_request_parts(uri: Uri) -> Parts {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Tests ---

#[tokio::test]
async fn test_decode_session_cookie() {
    let headers = cookie_headers(&format!(
        "theme=dark; {}={}; other=1",
        TEST_COOKIE,
        valid_client_token()
    ));

    let session = decoder().decode(&headers).await.unwrap();

    assert_eq!(
        session,
        Some(SessionToken {
            role: Role::Client,
            identity: "alice".to_string(),
            company_id: Some("acme".to_string()),
        })
    );
}

#[tokio::test]
async fn test_decode_secure_cookie_variant() {
    let headers = cookie_headers(&format!("__Secure-{}={}", TEST_COOKIE, valid_client_token()));

    let session = decoder().decode(&headers).await.unwrap();

    assert_eq!(session.map(|s| s.identity), Some("alice".to_string()));
}

#[tokio::test]
async fn test_decode_bearer_token() {
    let token = mint("Admin", "bob", None, now() + 3600, TEST_SECRET);

    let session = decoder().decode(&bearer_headers(&token)).await.unwrap().unwrap();

    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.identity, "bob");
    assert_eq!(session.company_id, None);
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_bearer() {
    let mut headers = bearer_headers(&mint("Admin", "bob", None, now() + 3600, TEST_SECRET));
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{}={}", TEST_COOKIE, valid_client_token())).unwrap(),
    );

    let session = decoder().decode(&headers).await.unwrap().unwrap();

    assert_eq!(session.role, Role::Client);
}

#[tokio::test]
async fn test_no_token_is_anonymous() {
    let session = decoder().decode(&HeaderMap::new()).await.unwrap();
    assert!(session.is_none());

    // Unrelated cookies and non-bearer schemes do not count as a token.
    let mut headers = cookie_headers("theme=dark");
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Ym9iOnB3"));
    assert!(decoder().decode(&headers).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    // Well past the default validation leeway.
    let token = mint("client", "alice", Some("acme"), now() - 3600, TEST_SECRET);

    let result = decoder().decode(&bearer_headers(&token)).await;

    assert!(matches!(result, Err(SessionError::Expired)));
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let token = mint("client", "alice", Some("acme"), now() + 3600, "someone-elses-secret");

    let result = decoder().decode(&bearer_headers(&token)).await;

    assert!(matches!(result, Err(SessionError::InvalidToken(_))));
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let result = decoder()
        .decode(&cookie_headers(&format!("{}=not-a-jwt", TEST_COOKIE)))
        .await;

    assert!(matches!(result, Err(SessionError::InvalidToken(_))));
}

#[tokio::test]
async fn test_missing_required_claim_is_rejected() {
    let claims = serde_json::json!({ "type": "client", "exp": now() + 3600 });
    let key = EncodingKey::from_secret(TEST_SECRET.as_bytes());
    let token = encode(&Header::default(), &claims, &key).unwrap();

    let result = decoder().decode(&bearer_headers(&token)).await;

    assert!(matches!(result, Err(SessionError::InvalidToken(_))));
}

#[tokio::test]
async fn test_claims_that_cannot_form_a_home_route_are_rejected() {
    let cases = [
        ("helper", "carol/x", Some("acme"), "name"),
        ("helper", "", Some("acme"), "name"),
        ("client", "alice", Some(""), "company_id"),
        ("client", "alice", Some("acme/other"), "company_id"),
        ("Admin", "bob/../root", None, "name"),
    ];

    for (role, name, company_id, claim) in cases {
        let token = mint(role, name, company_id, now() + 3600, TEST_SECRET);

        let result = decoder().decode(&bearer_headers(&token)).await;

        assert!(
            matches!(result, Err(SessionError::InvalidClaims(c)) if c == claim),
            "{role} {name:?} {company_id:?}: {result:?}"
        );
    }
}

#[tokio::test]
async fn test_unknown_role_tag_decodes_as_unrecognized() {
    let token = mint("superuser", "mallory", Some("acme"), now() + 3600, TEST_SECRET);

    let session = decoder().decode(&bearer_headers(&token)).await.unwrap().unwrap();

    assert_eq!(session.role, Role::Unrecognized);
}

#[test]
fn test_role_tags_are_case_sensitive() {
    let role: Role = serde_json::from_str("\"Admin\"").unwrap();
    assert_eq!(role, Role::Admin);
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Unrecognized);
    let role: Role = serde_json::from_str("\"Client\"").unwrap();
    assert_eq!(role, Role::Unrecognized);
}

#[test]
fn test_claims_map_to_session_token() {
    let claims = SessionClaims {
        role: Role::Helper,
        name: "carol".to_string(),
        company_id: Some("acme".to_string()),
        exp: 0,
        iat: None,
    };

    let token = SessionToken::from(claims);

    assert_eq!(token.role, Role::Helper);
    assert_eq!(token.identity, "carol");
    assert_eq!(token.company_id.as_deref(), Some("acme"));
}

#[test]
fn test_extract_token_ignores_empty_values() {
    let names = vec![TEST_COOKIE.to_string()];

    let headers = cookie_headers(&format!("{}=", TEST_COOKIE));
    assert_eq!(extract_token(&headers, &names).unwrap(), None);

    let headers = bearer_headers("");
    assert_eq!(extract_token(&headers, &names).unwrap(), None);
}

#[tokio::test]
async fn test_current_session_reads_request_extensions() {
    let mut parts = get_request_parts("/company/acme/client/alice".parse().unwrap());

    let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
        .await
        .unwrap();
    assert!(session.is_none());

    let token = SessionToken {
        role: Role::Client,
        identity: "alice".to_string(),
        company_id: Some("acme".to_string()),
    };
    parts.extensions.insert(token.clone());

    let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
        .await
        .unwrap();
    assert_eq!(session, Some(token));
}
