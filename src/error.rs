//! Error taxonomy for the managers
//!
//! Every variant is recoverable by the caller. Codes are stable strings for
//! logs and API bodies.

use serde::Serialize;
use thiserror::Error;

use crate::types::ParameterName;

/// Caller-visible failures of the isolation and body managers
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TwinError {
    /// Operation needs `initialize_state` / `initialize_body` first
    #[error("{component} not initialized")]
    NotInitialized { component: &'static str },

    /// `initialize_body` called twice without `reset`
    #[error("body state already initialized; reset before initializing again")]
    AlreadyInitialized,

    /// Candidate state differed in zero or several tracked parameters
    #[error("change isolation violated: expected only [{parameter}] to change, got [{}]", join_names(.changed))]
    IsolationViolation {
        parameter: ParameterName,
        changed: Vec<ParameterName>,
    },

    /// Operation that must never succeed
    #[error("forbidden operation: {operation}")]
    ForbiddenOperation { operation: &'static str },
}

impl TwinError {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized { .. } => "E100_NOT_INITIALIZED",
            Self::AlreadyInitialized => "E101_ALREADY_INITIALIZED",
            Self::IsolationViolation { .. } => "E200_ISOLATION_VIOLATION",
            Self::ForbiddenOperation { .. } => "E300_FORBIDDEN_OPERATION",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotInitialized { .. } => "Initialize before updating",
            Self::AlreadyInitialized => "Existing state kept untouched",
            Self::IsolationViolation { .. } => "Update rejected and rolled back",
            Self::ForbiddenOperation { .. } => "Operation is never permitted",
        }
    }
}

fn join_names(names: &[ParameterName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
