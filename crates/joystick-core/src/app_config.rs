/// Runtime configuration, resolved once at process start.
///
/// The original deployment hardcoded `http://localhost:4000` at every call
/// site; here it is read from the environment exactly once and threaded to
/// the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the REST data server (products live under `/products`).
    pub api_base_url: String,
    /// Per-request timeout for the HTTP client, in seconds.
    pub request_timeout_secs: u64,
    /// `User-Agent` sent on every request.
    pub user_agent: String,
    /// Default tracing filter directive (e.g. `info`, `joystick=debug`).
    pub log_level: String,
}
