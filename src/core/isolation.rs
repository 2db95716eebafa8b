//! Change isolation: update exactly one tracked parameter, verified
//!
//! Update protocol:
//! 1. Reject if uninitialized
//! 2. Lock every parameter except the target, snapshot the old value
//! 3. Build a candidate state with only the target replaced
//! 4. Diff all 12 parameters; the changed set must be exactly {target}
//! 5. Commit + audit on success, discard the candidate on failure
//!
//! Every mutation takes `&mut self`, so steps 2-5 form a critical section for
//! the owner. Shared owners wrap the manager in a lock.

use std::collections::{BTreeSet, VecDeque};

use chrono::Utc;

use crate::error::TwinError;
use crate::types::{ChangeRecord, DesignState, ParameterName, ParameterUpdate, UpdateResult};
use crate::HISTORY_CAPACITY;

/// Lock bookkeeping phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationPhase {
    /// No parameter locked
    Idle,
    /// Every parameter but this one is locked
    Updating(ParameterName),
}

/// Holder of the tracked design state
#[derive(Debug)]
pub struct ChangeIsolationManager {
    /// Current committed state
    current: Option<DesignState>,
    /// Parameters locked during an update
    locked: BTreeSet<ParameterName>,
    /// Current phase
    phase: IsolationPhase,
    /// Verified changes, oldest first
    history: VecDeque<ChangeRecord>,
}

impl Default for ChangeIsolationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeIsolationManager {
    /// Create new, uninitialized manager
    pub fn new() -> Self {
        Self {
            current: None,
            locked: BTreeSet::new(),
            phase: IsolationPhase::Idle,
            history: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Set the tracked state. Must precede any update.
    pub fn initialize_state(&mut self, state: DesignState) {
        self.current = Some(state);
        tracing::info!("change isolation initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Replace exactly one parameter, verifying nothing else moved
    pub fn update_parameter(&mut self, update: ParameterUpdate) -> UpdateResult {
        let parameter = update.name();

        let Some(current) = self.current.clone() else {
            return UpdateResult::failure(
                None,
                TwinError::NotInitialized {
                    component: "change isolation",
                },
            );
        };

        self.lock_all_except(parameter);

        let old_value = current.value_of(parameter);
        let candidate = current.with_update(&update);

        if let Err(err) = verify_isolation(parameter, &current, &candidate) {
            tracing::warn!(
                code = err.code(),
                %parameter,
                "isolation violated, update rolled back: {}",
                err
            );
            self.unlock_all();
            return UpdateResult::failure(Some(current), err);
        }

        self.current = Some(candidate.clone());
        self.record_change(parameter, old_value, update);
        self.unlock_all();

        tracing::debug!(%parameter, "isolated change committed");
        UpdateResult::success(candidate)
    }

    fn lock_all_except(&mut self, parameter: ParameterName) {
        self.locked = ParameterName::ALL
            .into_iter()
            .filter(|p| *p != parameter)
            .collect();
        self.phase = IsolationPhase::Updating(parameter);
        tracing::debug!(%parameter, locked = self.locked.len(), "parameters locked");
    }

    fn unlock_all(&mut self) {
        self.locked.clear();
        self.phase = IsolationPhase::Idle;
    }

    fn record_change(&mut self, parameter: ParameterName, old_value: ParameterUpdate, new_value: ParameterUpdate) {
        self.history.push_back(ChangeRecord {
            parameter,
            old_value,
            new_value,
            timestamp: Utc::now(),
            verified: true,
        });
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Copy of the audit log, oldest first
    pub fn get_change_history(&self) -> Vec<ChangeRecord> {
        self.history.iter().cloned().collect()
    }

    /// Copy of the current state
    pub fn get_current_state(&self) -> Option<DesignState> {
        self.current.clone()
    }

    /// Current lock phase
    pub fn phase(&self) -> IsolationPhase {
        self.phase
    }

    /// Parameters currently locked (empty when idle)
    pub fn locked_parameters(&self) -> Vec<ParameterName> {
        self.locked.iter().copied().collect()
    }

    /// Clear state, history and locks for a new session
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!("change isolation reset");
    }
}

/// Isolation holds iff the changed set between `before` and `after` is
/// exactly `{parameter}`. No change at all is a violation too.
pub fn verify_isolation(
    parameter: ParameterName,
    before: &DesignState,
    after: &DesignState,
) -> Result<(), TwinError> {
    let changed = before.diff(after);
    if changed.len() == 1 && changed[0] == parameter {
        Ok(())
    } else {
        Err(TwinError::IsolationViolation { parameter, changed })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyProportions, NecklineType, OutfitDesign, OutfitType};

    fn initialized() -> ChangeIsolationManager {
        let mut manager = ChangeIsolationManager::new();
        let outfit = OutfitDesign::new(OutfitType::SareeBlouse);
        manager.initialize_state(DesignState::from_outfit(&outfit, BodyProportions::default()));
        manager
    }

    #[test]
    fn test_update_before_init_fails() {
        let mut manager = ChangeIsolationManager::new();
        let result = manager.update_parameter(ParameterUpdate::Neckline(NecklineType::Boat));
        assert!(!result.is_success());
        assert!(result.state.is_none());
        assert!(matches!(result.error, Some(TwinError::NotInitialized { .. })));
    }

    #[test]
    fn test_locks_released_after_update() {
        let mut manager = initialized();
        manager.update_parameter(ParameterUpdate::Neckline(NecklineType::Boat));
        assert_eq!(manager.phase(), IsolationPhase::Idle);
        assert!(manager.locked_parameters().is_empty());
    }

    #[test]
    fn test_locks_released_after_rejection() {
        let mut manager = initialized();
        let color = manager.get_current_state().unwrap().color;
        let result = manager.update_parameter(ParameterUpdate::Color(color));
        assert!(!result.is_success());
        assert_eq!(manager.phase(), IsolationPhase::Idle);
    }

    #[test]
    fn test_verify_rejects_extra_changes() {
        let manager = initialized();
        let before = manager.get_current_state().unwrap();
        let mut after = before.clone();
        after.neckline = NecklineType::Halter;
        after.body_proportions.waist = 0.9;

        let err = verify_isolation(ParameterName::Neckline, &before, &after).unwrap_err();
        assert_eq!(
            err,
            TwinError::IsolationViolation {
                parameter: ParameterName::Neckline,
                changed: vec![ParameterName::Neckline, ParameterName::BodyWaist],
            }
        );
    }

    #[test]
    fn test_verify_rejects_wrong_single_change() {
        let manager = initialized();
        let before = manager.get_current_state().unwrap();
        let mut after = before.clone();
        after.body_proportions.hip = 1.1;
        assert!(verify_isolation(ParameterName::BodyBust, &before, &after).is_err());
        assert!(verify_isolation(ParameterName::BodyHip, &before, &after).is_ok());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut manager = initialized();
        let mut snapshot = manager.get_current_state().unwrap();
        snapshot.color = "#000000".to_string();
        assert_ne!(manager.get_current_state().unwrap().color, "#000000");

        manager.update_parameter(ParameterUpdate::BodyBust(1.1));
        let mut history = manager.get_change_history();
        history.clear();
        assert_eq!(manager.get_change_history().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut manager = initialized();
        manager.update_parameter(ParameterUpdate::BodyBust(1.1));
        manager.reset();
        assert!(!manager.is_initialized());
        assert!(manager.get_change_history().is_empty());
        assert_eq!(manager.phase(), IsolationPhase::Idle);
    }
}
