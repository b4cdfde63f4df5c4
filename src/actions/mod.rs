//! Server actions.
//!
//! Each action makes one authenticated call to the backend REST API and folds
//! the outcome into an [`ActionResult`]. Nothing is retried. Mutations mark the
//! affected cache tag and page paths stale.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    backend::{BackendRequest, BackendState},
    cache::CacheState,
    error::ActionError,
    models::ActionResult,
};

pub mod calendar;
pub mod user;

/// ActionContext
///
/// Everything an action needs: the backend transport, the cache to invalidate
/// and the caller's session token (if any).
#[derive(Clone)]
pub struct ActionContext {
    pub backend: BackendState,
    pub cache: CacheState,
    pub token: Option<String>,
}

impl ActionContext {
    pub fn new(backend: BackendState, cache: CacheState, token: Option<String>) -> Self {
        Self {
            backend,
            cache,
            token,
        }
    }

    /// Sends `request` with the session token and decodes `data` as `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: BackendRequest,
    ) -> Result<Option<T>, ActionError> {
        let data = self
            .backend
            .send(request.with_token(self.token.clone()))
            .await?;
        Ok(data.map(serde_json::from_value).transpose()?)
    }

    /// Sends `request` and discards whatever `data` came back.
    async fn execute(&self, request: BackendRequest) -> Result<Option<()>, ActionError> {
        self.backend
            .send(request.with_token(self.token.clone()))
            .await
            .map(|_| None)
    }

    fn revalidate(&self, tag: Option<&str>, paths: &[&str]) {
        if let Some(tag) = tag {
            self.cache.revalidate_tag(tag);
        }
        for path in paths {
            self.cache.revalidate_path(path);
        }
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ActionError> {
    Ok(serde_json::to_value(value)?)
}

/// Logs a failed action and converts its outcome.
fn finish<T>(
    action: &'static str,
    outcome: Result<Option<T>, ActionError>,
    fallback: &str,
) -> ActionResult<T> {
    match &outcome {
        Ok(_) => tracing::info!(action, "action succeeded"),
        Err(err) => tracing::warn!(action, error = %err, "action failed"),
    }
    ActionResult::from_outcome(outcome, fallback)
}
