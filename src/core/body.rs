//! Persistent body: write-once identity, bounded proportions
//!
//! State transitions:
//! - UNINITIALIZED → INITIALIZED: `initialize_body` (exactly once)
//! - INITIALIZED → UNINITIALIZED: `reset`
//!
//! Image, pose and lighting are fixed at initialization. `update_proportions`
//! can only reach the proportion factors, each clamped to [0.8, 1.2].

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::error::TwinError;
use crate::types::{BodyPose, BodyProportions, LightingState, PersistentBodyState, ProportionUpdate};

/// Hex chars of the image digest kept in a body id
const BODY_ID_DIGEST_LEN: usize = 8;

/// Holder of the session's body record
#[derive(Debug, Default)]
pub struct PersistentBodyManager {
    state: Option<PersistentBodyState>,
}

impl PersistentBodyManager {
    /// Create new, uninitialized manager
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Establish the body. Fails if a body already exists; the existing
    /// record is left untouched.
    pub fn initialize_body(
        &mut self,
        base_image: impl Into<String>,
        pose: BodyPose,
        lighting: LightingState,
        proportions: BodyProportions,
    ) -> Result<PersistentBodyState, TwinError> {
        if let Some(existing) = &self.state {
            let err = TwinError::AlreadyInitialized;
            tracing::warn!(code = err.code(), body_id = %existing.id, "body already initialized, call rejected");
            return Err(err);
        }

        let base_image = base_image.into();
        let now = Utc::now();
        let state = PersistentBodyState {
            id: body_id(&base_image, now.timestamp_millis()),
            base_image,
            pose,
            lighting,
            proportions: proportions.clamped(),
            locked: true,
            created_at: now,
            last_modified: now,
        };

        tracing::info!(body_id = %state.id, "body initialized and locked");
        self.state = Some(state.clone());
        Ok(state)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Copy of the body record
    pub fn get_body_state(&self) -> Option<PersistentBodyState> {
        self.state.clone()
    }

    /// Merge a partial proportion update, clamp, and stamp `last_modified`
    pub fn update_proportions(&mut self, update: ProportionUpdate) -> Result<PersistentBodyState, TwinError> {
        let Some(state) = self.state.as_mut() else {
            return Err(TwinError::NotInitialized { component: "persistent body" });
        };

        state.proportions = update.merge_into(state.proportions).clamped();
        state.last_modified = Utc::now();

        tracing::debug!(
            bust = state.proportions.bust,
            waist = state.proportions.waist,
            hip = state.proportions.hip,
            shoulder = state.proportions.shoulder,
            "proportions updated"
        );
        Ok(state.clone())
    }

    /// True iff `candidate` shows the same photographed body as the stored one
    ///
    /// Compares image, pose angle and stance, light direction and the lock
    /// flag. Proportions are free to differ. False when uninitialized.
    pub fn verify_body_continuity(&self, candidate: &PersistentBodyState) -> bool {
        let Some(current) = &self.state else {
            return false;
        };

        let continuous = candidate.base_image == current.base_image
            && candidate.pose.angle.to_bits() == current.pose.angle.to_bits()
            && candidate.pose.stance == current.pose.stance
            && candidate.lighting.direction == current.lighting.direction
            && candidate.locked == current.locked;

        if !continuous {
            tracing::warn!(body_id = %current.id, candidate_id = %candidate.id, "body continuity mismatch");
        }
        continuous
    }

    /// Never permitted
    pub fn regenerate_body(&self) -> Result<(), TwinError> {
        let err = TwinError::ForbiddenOperation { operation: "regenerate_body" };
        tracing::warn!(code = err.code(), "{}", err);
        Err(err)
    }

    /// Drop the body so the next `initialize_body` succeeds
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!("persistent body reset");
    }
}

/// `body_<unix-millis>_<first 8 hex of SHA-256(base_image)>`
fn body_id(base_image: &str, millis: i64) -> String {
    let digest = Sha256::digest(base_image.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("body_{}_{}", millis, &hex[..BODY_ID_DIGEST_LEN])
}

// =============================================================================
// TESTS
// =============================================================================
