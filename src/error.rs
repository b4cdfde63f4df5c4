use thiserror::Error;

/// Message used when the backend rejects a request without saying why.
pub const DEFAULT_BACKEND_MESSAGE: &str = "请求失败";

/// ActionError
///
/// Every way a server action can fail. Actions never propagate these to the
/// HTTP layer; they are folded into `ActionResult::error`.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The envelope came back with a code outside {200, 0}.
    #[error("{}", .message.as_deref().filter(|m| !m.is_empty()).unwrap_or(DEFAULT_BACKEND_MESSAGE))]
    Backend { code: i64, message: Option<String> },

    /// The request never produced a response (connect, timeout, body read).
    #[error("{0}")]
    Transport(String),

    /// The response body was not a valid envelope, or `data` had the wrong shape.
    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        ActionError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        ActionError::Decode(err.to_string())
    }
}
