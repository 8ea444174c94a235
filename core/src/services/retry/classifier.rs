//! Transient/permanent classification of failures
//!
//! The classifier walks the whole `source()` chain of an error and asks an
//! ordered list of predicates whether any link is a known transient
//! condition. Anything no predicate recognizes is permanent, which keeps
//! constraint violations such as duplicate keys out of the retry loop.

use std::error::Error;
use std::io;

use crate::errors::StorageError;

/// Outcome of classifying a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected to resolve on a later attempt
    Transient,
    /// Will fail the same way again
    Permanent,
}

impl ErrorCategory {
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::Transient)
    }
}

/// One recognizable transient condition
///
/// Predicates see every link of the error chain separately and only have to
/// recognize the concrete types they know about.
pub trait RetryPredicate: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this link of the chain is a transient failure
    fn matches(&self, error: &(dyn Error + 'static)) -> bool;
}

/// Iterate over an error and all of its sources, outermost first
pub fn error_chain<'a>(
    error: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(error), |e: &&'a (dyn Error + 'static)| (*e).source())
}

fn io_kind(error: &(dyn Error + 'static)) -> Option<io::ErrorKind> {
    error.downcast_ref::<io::Error>().map(io::Error::kind)
}

/// SQLSTATE codes for lost or refused database connections
///
/// Covers the whole `08` class (connection exception, connection does not
/// exist, connection failure, unable to establish, rejected establishment,
/// transaction resolution unknown, protocol violation) plus the operator
/// intervention codes `57P01` admin shutdown, `57P02` crash shutdown and
/// `57P03` cannot connect now.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectionStatePredicate;

impl ConnectionStatePredicate {
    pub fn is_connection_state(code: &str) -> bool {
        code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03")
    }
}

impl RetryPredicate for ConnectionStatePredicate {
    fn name(&self) -> &'static str {
        "connection_state"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        error
            .downcast_ref::<StorageError>()
            .and_then(StorageError::code)
            .map(Self::is_connection_state)
            .unwrap_or(false)
    }
}

/// Network-layer I/O failures: timeouts, resets, refused or dropped connections
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkIoPredicate;

impl RetryPredicate for NetworkIoPredicate {
    fn name(&self) -> &'static str {
        "network_io"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        matches!(
            io_kind(error),
            Some(
                io::ErrorKind::TimedOut
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::NotConnected
                    | io::ErrorKind::UnexpectedEof
            )
        )
    }
}

/// Permission denied on a resource, treated as lock contention
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissionDeniedPredicate;

impl RetryPredicate for PermissionDeniedPredicate {
    fn name(&self) -> &'static str {
        "permission_denied"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        io_kind(error) == Some(io::ErrorKind::PermissionDenied)
    }
}

/// Busy or would-block resources and interrupted calls
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceBusyPredicate;

/// `EBUSY` on unix targets
#[cfg(unix)]
const EBUSY: i32 = 16;

impl RetryPredicate for ResourceBusyPredicate {
    fn name(&self) -> &'static str {
        "resource_busy"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        let Some(io_error) = error.downcast_ref::<io::Error>() else {
            return false;
        };

        if matches!(
            io_error.kind(),
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
        ) {
            return true;
        }

        #[cfg(unix)]
        {
            io_error.raw_os_error() == Some(EBUSY)
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

/// Storage errors their producer already tagged as transient
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkedTransientPredicate;

impl RetryPredicate for MarkedTransientPredicate {
    fn name(&self) -> &'static str {
        "marked_transient"
    }

    fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        error
            .downcast_ref::<StorageError>()
            .map(StorageError::is_marked_transient)
            .unwrap_or(false)
    }
}

/// Ordered set of transient-failure predicates
///
/// # Example
/// ```
/// use tg_core::services::retry::{ErrorCategory, ErrorClassifier};
///
/// let classifier = ErrorClassifier::default();
/// let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
/// assert_eq!(classifier.classify(&refused), ErrorCategory::Transient);
/// ```
pub struct ErrorClassifier {
    predicates: Vec<Box<dyn RetryPredicate>>,
}

impl ErrorClassifier {
    /// Classifier that recognizes nothing; every failure is permanent
    pub fn empty() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Append a predicate evaluated after the existing ones
    pub fn with_predicate<P: RetryPredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Name of the first predicate recognizing any link of the chain
    pub fn matching_predicate(&self, error: &(dyn Error + 'static)) -> Option<&'static str> {
        self.predicates
            .iter()
            .find(|p| error_chain(error).any(|link| p.matches(link)))
            .map(|p| p.name())
    }

    pub fn classify(&self, error: &(dyn Error + 'static)) -> ErrorCategory {
        match self.matching_predicate(error) {
            Some(_) => ErrorCategory::Transient,
            None => ErrorCategory::Permanent,
        }
    }

    pub fn is_retryable(&self, error: &(dyn Error + 'static)) -> bool {
        self.classify(error).is_transient()
    }

    pub fn predicate_names(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|p| p.name()).collect()
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::empty()
            .with_predicate(ConnectionStatePredicate)
            .with_predicate(NetworkIoPredicate)
            .with_predicate(PermissionDeniedPredicate)
            .with_predicate(ResourceBusyPredicate)
            .with_predicate(MarkedTransientPredicate)
    }
}

impl std::fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorClassifier")
            .field("predicates", &self.predicate_names())
            .finish()
    }
}
