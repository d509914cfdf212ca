use std::env;

const LOCAL_SESSION_SECRET: &str = "supportflow-local-session-secret";
const DEFAULT_SESSION_COOKIE: &str = "supportflow.session-token";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the gate's entire configuration. Loaded once at startup, immutable
/// afterwards, and pulled into handlers and middleware through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and secret requirements.
    pub env: Env,
    // Shared secret used to verify session JWTs issued by the auth backend.
    pub session_secret: String,
    // Name of the session cookie. The `__Secure-` variant is accepted as well.
    pub session_cookie: String,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Absolute origin prefixed to redirect targets. Relative redirects when unset.
    pub public_base_url: Option<String>,
}

/// Env
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Non-panicking configuration for tests; reads no environment variables.
    fn default() -> Self {
        Self {
            env: Env::Local,
            session_secret: LOCAL_SESSION_SECRET.to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            public_base_url: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics when `SESSION_SECRET` is missing in production. Starting with a
    /// guessable secret would let anyone mint sessions.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let session_secret = match env {
            Env::Production => env::var("SESSION_SECRET")
                .expect("FATAL: SESSION_SECRET must be set in production."),
            Env::Local => {
                env::var("SESSION_SECRET").unwrap_or_else(|_| LOCAL_SESSION_SECRET.to_string())
            }
        };

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            env,
            session_secret,
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            public_base_url,
        }
    }

    /// Builds the `Location` value for a redirect to `path`.
    pub fn redirect_location(&self, path: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}{}", base, path),
            None => path.to_string(),
        }
    }
}
