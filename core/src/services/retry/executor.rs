//! Retry executor with deterministic backoff

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::Span;

use crate::errors::DomainError;

use super::classifier::ErrorClassifier;
use super::policy::RetryPolicy;

/// Terminal failure of a retried operation
#[derive(Error, Debug)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Classified permanent; returned on the attempt that produced it
    #[error(transparent)]
    Permanent(E),

    /// Every attempt failed with a transient error
    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// The underlying error of the last attempt
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Permanent(e) => e,
            RetryError::Exhausted { last, .. } => last,
        }
    }

    /// Number of attempts made, when retries ran out
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::Permanent(_) => None,
            RetryError::Exhausted { attempts, .. } => Some(*attempts),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }
}

impl From<RetryError<DomainError>> for DomainError {
    fn from(error: RetryError<DomainError>) -> Self {
        match error {
            RetryError::Permanent(e) => e,
            RetryError::Exhausted { attempts, last } => DomainError::RetriesExhausted {
                attempts,
                last: Box::new(last),
            },
        }
    }
}

/// Runs fallible async operations under a [`RetryPolicy`]
///
/// Backoff sleeps only suspend the calling task. A retry sequence runs to
/// completion or exhaustion; dropping the returned future is the only way
/// to stop it early.
#[derive(Clone)]
pub struct RetryExecutor {
    classifier: Arc<ErrorClassifier>,
    span: Span,
}

impl RetryExecutor {
    pub fn new(classifier: ErrorClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            span: Span::none(),
        }
    }

    /// Log retry events under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Invoke `operation` until it succeeds, fails permanently or the
    /// policy runs out of attempts
    ///
    /// # Returns
    /// * `Ok(T)` - Result of the first successful attempt
    /// * `Err(RetryError::Permanent)` - First permanent failure, no sleep after it
    /// * `Err(RetryError::Exhausted)` - Last transient failure and the attempt count
    pub async fn execute<T, E, F, Fut>(
        &self,
        policy: &RetryPolicy,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error + 'static,
    {
        let mut attempt = 1;

        loop {
            let error = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(parent: &self.span, attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => e,
            };

            if let Some(predicate) = self.classifier.matching_predicate(&error) {
                let Some(delay) = policy.delay_before(attempt + 1) else {
                    tracing::error!(
                        parent: &self.span,
                        attempts = attempt,
                        error = %error,
                        "Retries exhausted"
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: error,
                    });
                };

                tracing::warn!(
                    parent: &self.span,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    predicate,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            } else {
                tracing::debug!(parent: &self.span, attempt, error = %error, "Permanent failure");
                return Err(RetryError::Permanent(error));
            }
        }
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(ErrorClassifier::default())
    }
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("classifier", &self.classifier)
            .finish()
    }
}
