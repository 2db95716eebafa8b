//! Twinfit: parametric digital twin for body-driven outfit previews
//!
//! Body ratios → unit-space anchors → canvas paths for silhouette, garment
//! overlays and construction layers. Design edits go through a
//! change-isolation manager; the photographed body is locked once set.

pub mod core;
pub mod error;
pub mod types;

pub use error::TwinError;

// =============================================================================
// CANVAS
// =============================================================================

/// Default render surface width (pixels)
pub const CANVAS_WIDTH: f64 = 400.0;

/// Default render surface height (pixels)
pub const CANVAS_HEIGHT: f64 = 600.0;

// =============================================================================
// ANCHORS - unit space, fixed so widths move but vertical positions never do
// =============================================================================

pub const TWIN_HEIGHT: f64 = 1.0;
pub const CENTER_X: f64 = 0.5;
pub const ANCHOR_SHOULDERS_Y: f64 = 0.15;
pub const ANCHOR_BUST_Y: f64 = 0.35;
pub const ANCHOR_WAIST_Y: f64 = 0.50;
pub const ANCHOR_HIPS_Y: f64 = 0.65;

/// Bust width as a fraction of shoulder width
pub const BUST_TO_SHOULDER: f64 = 0.95;

/// Share of a shoulder adjustment that also moves the bust
pub const BUST_FOLLOWS_SHOULDER: f64 = 0.8;

// =============================================================================
// RATIO BOUNDS
// =============================================================================

pub const SHOULDER_RATIO_RANGE: (f64, f64) = (0.25, 0.55);
pub const WAIST_RATIO_RANGE: (f64, f64) = (0.20, 0.45);
pub const HIP_RATIO_RANGE: (f64, f64) = (0.25, 0.55);
pub const VERTICAL_BALANCE_RANGE: (f64, f64) = (0.40, 0.60);

// =============================================================================
// PERSISTENT BODY
// =============================================================================

/// Lower bound for every body proportion factor
pub const PROPORTION_MIN: f64 = 0.8;

/// Upper bound for every body proportion factor
pub const PROPORTION_MAX: f64 = 1.2;

// =============================================================================
// CHANGE ISOLATION
// =============================================================================

/// Audit records kept before the oldest is evicted
pub const HISTORY_CAPACITY: usize = 50;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

/// Clamp helper shared by ratio and proportion validation
pub(crate) fn clamp_range(value: f64, (min, max): (f64, f64)) -> f64 {
    value.max(min).min(max)
}
