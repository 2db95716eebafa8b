//! Digital twin coordinates in unit space (0..1)

use serde::{Deserialize, Serialize};

/// One horizontal body measurement: centre, fixed anchor height, width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl AnchorBox {
    pub fn new(x: f64, y: f64, width: f64) -> Self {
        Self { x, y, width }
    }

    /// Left edge in unit space
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Right edge in unit space
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Derived twin geometry. Always produced fresh, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitalTwinCoords {
    pub height: f64,
    pub shoulders: AnchorBox,
    pub bust: AnchorBox,
    pub waist: AnchorBox,
    pub hips: AnchorBox,
}

/// Slider deltas in percent (`10.0` means ×1.10). Absent means untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub shoulder: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub height: Option<f64>,
}

impl Adjustments {
    /// All four sliders at zero
    pub fn zero() -> Self {
        Self {
            shoulder: Some(0.0),
            waist: Some(0.0),
            hip: Some(0.0),
            height: Some(0.0),
        }
    }
}
