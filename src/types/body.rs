//! Persistent body record: photographed identity plus adjustable proportions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::BodyProportions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Front,
    Side,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmPosition {
    Down,
    Neutral,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPose {
    pub angle: f64,
    pub stance: Stance,
    pub arm_position: ArmPosition,
}

impl Default for BodyPose {
    fn default() -> Self {
        Self {
            angle: 0.0,
            stance: Stance::Front,
            arm_position: ArmPosition::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightDirection {
    Front,
    Top,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTemperature {
    Warm,
    Neutral,
    Cool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingState {
    pub direction: LightDirection,
    pub intensity: f64,
    pub temperature: ColorTemperature,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            direction: LightDirection::Front,
            intensity: 1.0,
            temperature: ColorTemperature::Neutral,
        }
    }
}

/// Body as established at session start. Only `proportions` and
/// `last_modified` ever change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentBodyState {
    pub id: String,
    pub base_image: String,
    pub pose: BodyPose,
    pub lighting: LightingState,
    pub proportions: BodyProportions,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Partial proportion update; absent fields keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProportionUpdate {
    pub bust: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub shoulder: Option<f64>,
}

impl ProportionUpdate {
    /// Merge over `current` without clamping
    pub fn merge_into(&self, current: BodyProportions) -> BodyProportions {
        BodyProportions {
            bust: self.bust.unwrap_or(current.bust),
            waist: self.waist.unwrap_or(current.waist),
            hip: self.hip.unwrap_or(current.hip),
            shoulder: self.shoulder.unwrap_or(current.shoulder),
        }
    }
}
