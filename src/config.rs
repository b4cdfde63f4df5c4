use std::{env, time::Duration};

/// AppConfig
///
/// Holds the gateway's configuration. Loaded once at startup and shared by value
/// through `AppState` (pulled into handlers via `FromRef`).
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the backend REST API that server actions proxy to.
    pub api_base: String,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Per-request timeout for backend calls. There are no retries.
    pub request_timeout: Duration,
    // Runtime environment marker. Controls cookie security and log format.
    pub env: Env,
}

/// Env
///
/// Runtime context. `Production` switches on secure cookies and JSON logs.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Default for AppConfig {
    /// Safe, non-panicking values for tests.
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `API_URL` is missing, so the gateway never
    /// starts pointed at the development backend.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_base = match env {
            Env::Production => {
                env::var("API_URL").expect("FATAL: API_URL must be set in production.")
            }
            Env::Local => env::var("API_URL")
                .or_else(|_| env::var("NEXT_PUBLIC_API_URL"))
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        };

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            request_timeout,
            env,
        }
    }

    /// Session cookies carry the `Secure` attribute only in production.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
