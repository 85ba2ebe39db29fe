//! Common error infrastructure for mdp-core.
//!
//! Domain-specific errors (e.g. [`crate::env::SnapshotError`],
//! [`crate::config::ConfigError`]) are defined next to the code they validate.
//! This module only provides the shared severity classification so callers can
//! decide how loudly to fail without matching on every variant.

/// Severity level of an error, used for categorization and logging.
///
/// - **Validation**: the caller supplied inconsistent input
/// - **Internal**: a contract between components was violated
/// - **Fatal**: the solver is misconfigured and cannot produce a decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or misconfiguration.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all solver errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to act, not by impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}
