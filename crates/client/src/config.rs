//! Client configuration loaded from environment variables.

use poolbuy_core::session::{Role, SessionContext};

/// Connection settings for the marketplace backend.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base HTTP URL of the backend API (default:
    /// `http://localhost:4000/api`).
    pub api_url: String,
    /// WebSocket URL of the push channel (default: `ws://localhost:4000`).
    pub ws_url: String,
    /// Session identifier sent with every request.
    pub session_id: String,
    /// The caller's role string (default: `member`).
    pub role: Role,
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `POOLBUY_API_URL`    | `http://localhost:4000/api` |
    /// | `POOLBUY_WS_URL`     | `ws://localhost:4000`       |
    /// | `POOLBUY_SESSION_ID` | (empty)                     |
    /// | `POOLBUY_ROLE`       | `member`                    |
    pub fn from_env() -> Self {
        let api_url = std::env::var("POOLBUY_API_URL")
            .unwrap_or_else(|_| "http://localhost:4000/api".into());

        let ws_url =
            std::env::var("POOLBUY_WS_URL").unwrap_or_else(|_| "ws://localhost:4000".into());

        let session_id = std::env::var("POOLBUY_SESSION_ID").unwrap_or_default();

        let role = Role::parse(&std::env::var("POOLBUY_ROLE").unwrap_or_else(|_| "member".into()));

        Self {
            api_url,
            ws_url,
            session_id,
            role,
        }
    }

    /// The session context this configuration describes.
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.session_id.clone(), self.role)
    }
}
