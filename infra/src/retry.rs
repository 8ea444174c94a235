//! Retry classification for sqlx failures

use std::error::Error;

use tg_core::services::retry::{ConnectionStatePredicate, ErrorClassifier, RetryPredicate};

/// Pool and transport level sqlx failures
///
/// Recognizes pool acquire timeouts, a closed pool, I/O and TLS failures,
/// a crashed connection worker, and server errors carrying a connection
/// SQLSTATE when the sqlx error was not wrapped in a storage error.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlxTransportPredicate;

impl RetryPredicate for SqlxTransportPredicate {
    fn name(&self) -> &'static str {
        "sqlx_transport"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        let Some(error) = error.downcast_ref::<sqlx::Error>() else {
            return false;
        };

        match error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => true,
            sqlx::Error::Database(db) => db
                .code()
                .map(|code| ConnectionStatePredicate::is_connection_state(&code))
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Core predicates followed by [`SqlxTransportPredicate`]
pub fn default_classifier() -> ErrorClassifier {
    ErrorClassifier::default().with_predicate(SqlxTransportPredicate)
}
