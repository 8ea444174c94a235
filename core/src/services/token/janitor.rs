//! Background purging of expired blacklist entries
//!
//! The janitor wakes on a fixed interval and deletes every entry whose own
//! expiry has passed, retrying transient storage failures. A sweep that
//! still fails is logged and the loop carries on with the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::Span;

use tg_shared::RevocationConfig;

use crate::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::RevocationStore;
use crate::services::retry::{RetryExecutor, RetryPolicy};

/// Periodic purge task for a [`RevocationStore`]
pub struct RevocationJanitor<R: RevocationStore + ?Sized + 'static> {
    store: Arc<R>,
    clock: Arc<dyn Clock>,
    executor: RetryExecutor,
    policy: RetryPolicy,
    interval: Duration,
    span: Span,
}

impl<R: RevocationStore + ?Sized + 'static> RevocationJanitor<R> {
    /// Create a janitor sweeping every hour with the default retry policy
    pub fn new(store: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            executor: RetryExecutor::default(),
            policy: RetryPolicy::default(),
            interval: Duration::from_secs(RevocationConfig::default().sweep_interval_secs),
            span: Span::none(),
        }
    }

    /// Time between two sweeps
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_retry(mut self, executor: RetryExecutor, policy: RetryPolicy) -> Self {
        self.executor = executor;
        self.policy = policy;
        self
    }

    /// Log under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single purge through the retry executor
    ///
    /// # Returns
    /// * `Ok(count)` - Number of entries removed
    /// * `Err(DomainError)` - Permanent failure or retries exhausted
    pub async fn sweep(&self) -> Result<u64, DomainError> {
        let store: &R = &self.store;
        let clock: &dyn Clock = self.clock.as_ref();

        let removed = self
            .executor
            .execute(&self.policy, move || store.purge(clock.now()))
            .await?;

        Ok(removed)
    }

    /// Spawn the sweep loop
    ///
    /// The first sweep runs one interval after start. The loop only exits
    /// through [`JanitorHandle::shutdown`] (or when the handle is dropped);
    /// a sweep in progress always finishes first.
    ///
    /// # Returns
    /// * `Ok(JanitorHandle)` - Task running
    /// * `Err(DomainError::Configuration)` - Zero interval
    pub fn start(self) -> Result<JanitorHandle, DomainError> {
        if self.interval.is_zero() {
            return Err(DomainError::configuration(
                "Janitor sweep interval must be positive",
            ));
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let span = self.span.clone();

        let task = tokio::spawn(async move {
            tracing::info!(
                parent: &self.span,
                interval_secs = self.interval.as_secs(),
                "Revocation janitor started"
            );

            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.sweep().await {
                            Ok(removed) => {
                                tracing::info!(parent: &self.span, removed, "Purged expired blacklist entries");
                            }
                            Err(e) => {
                                tracing::warn!(parent: &self.span, error = %e, "Blacklist purge failed, retrying next interval");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            tracing::info!(parent: &self.span, "Revocation janitor stopped");
        });

        Ok(JanitorHandle {
            shutdown: shutdown_tx,
            task,
            span,
        })
    }
}

/// Handle to a running janitor
pub struct JanitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    span: Span,
}

impl JanitorHandle {
    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(self) -> Result<(), DomainError> {
        let JanitorHandle {
            shutdown,
            task,
            span,
        } = self;

        // The receiver is gone only if the task already ended
        let _ = shutdown.send(true);

        task.await.map_err(|e| {
            tracing::error!(parent: &span, error = %e, "Revocation janitor task failed");
            DomainError::Internal {
                message: format!("Revocation janitor task failed: {}", e),
            }
        })
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
