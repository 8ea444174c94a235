//! Retry module for transient storage failures
//!
//! This module provides:
//! - Deterministic linear backoff policies
//! - An extensible error classifier built from ordered predicates
//! - An executor that retries transient failures and surfaces permanent ones immediately

mod classifier;
mod executor;
mod policy;

#[cfg(test)]
mod tests;

pub use classifier::{
    error_chain, ConnectionStatePredicate, ErrorCategory, ErrorClassifier, MarkedTransientPredicate,
    NetworkIoPredicate, PermissionDeniedPredicate, ResourceBusyPredicate, RetryPredicate,
};
pub use executor::{RetryError, RetryExecutor};
pub use policy::RetryPolicy;
