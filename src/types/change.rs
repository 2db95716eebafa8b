//! Audit records and update outcomes for change isolation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TwinError;
use crate::types::{DesignState, ParameterName, ParameterUpdate};

/// One committed, verified parameter change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub parameter: ParameterName,
    pub old_value: ParameterUpdate,
    pub new_value: ParameterUpdate,
    pub timestamp: DateTime<Utc>,
    pub verified: bool,
}

/// Outcome of `update_parameter`
///
/// On failure `state` holds the untouched pre-update state (or `None` when
/// nothing was initialized).
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResult {
    pub success: bool,
    pub state: Option<DesignState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TwinError>,
}

impl UpdateResult {
    /// Create success result
    pub fn success(state: DesignState) -> Self {
        Self {
            success: true,
            state: Some(state),
            error: None,
        }
    }

    /// Create failure result
    pub fn failure(state: Option<DesignState>, error: TwinError) -> Self {
        Self {
            success: false,
            state,
            error: Some(error),
        }
    }

    /// Check if successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Committed state, or the error that rejected the update
    pub fn into_result(self) -> Result<DesignState, TwinError> {
        match (self.error, self.state) {
            (None, Some(state)) => Ok(state),
            (Some(err), _) => Err(err),
            (None, None) => Err(TwinError::NotInitialized {
                component: "change isolation",
            }),
        }
    }
}
