//! Capped-exponential-backoff retry decorator.
//!
//! Retry policy is composable middleware around any [`CompletionProvider`],
//! applied by the composition layer — never hardcoded inside an adapter or
//! the chat pipeline.

use std::sync::Arc;
use std::time::Duration;

use nandi_domain::error::{Error, Result};

use crate::traits::{CompletionProvider, CompletionRequest};

const BASE_DELAY: Duration = Duration::from_secs(2);
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Wraps a provider and retries transient failures with capped
/// exponential backoff (2s, 4s, 8s, ... capped at 10s).
pub struct RetryProvider {
    inner: Arc<dyn CompletionProvider>,
    max_attempts: u32,
}

impl RetryProvider {
    /// `max_attempts` is the total number of tries, including the first
    /// (clamped to at least 1).
    pub fn new(inner: Arc<dyn CompletionProvider>, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Delay before retry number `retry` (0-based).
    fn delay_for(retry: u32) -> Duration {
        BASE_DELAY
            .saturating_mul(1u32 << retry.min(8))
            .min(MAX_DELAY)
    }
}

/// Auth and config problems will not heal on their own; everything that
/// reaches the network may.
fn is_retryable(e: &Error) -> bool {
    matches!(
        e,
        Error::Timeout(_) | Error::Http(_) | Error::Provider { .. }
    )
}

#[async_trait::async_trait]
impl CompletionProvider for RetryProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.inner.complete(req).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    if attempt >= self.max_attempts || !is_retryable(&e) {
                        return Err(e);
                    }
                    let delay = Self::delay_for(attempt - 1);
                    tracing::warn!(
                        provider = self.inner.provider_id(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "completion failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn provider_id(&self) -> &str {
        self.inner.provider_id()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
