//! Twin geometry engine: ratios → unit anchors → canvas paths
//!
//! Pure and reentrant. Every function reads its arguments and returns fresh
//! values; nothing here mutates shared state.
//!
//! Anchors are fixed in y. Proportion changes move widths only, so garment
//! lengths keyed off the same anchors stay put across adjustments.

use crate::core::config::Canvas;
use crate::core::construction::build_layers;
use crate::core::overlay::OverlayBuilder;
use crate::types::{
    Adjustments, AnchorBox, BodyProportions, BodyRatios, ConstructionLayers, DigitalTwinCoords,
    OutfitDesign, PathData,
};
use crate::{
    ANCHOR_BUST_Y, ANCHOR_HIPS_Y, ANCHOR_SHOULDERS_Y, ANCHOR_WAIST_Y, BUST_FOLLOWS_SHOULDER,
    BUST_TO_SHOULDER, CENTER_X, TWIN_HEIGHT,
};

/// Drop of the hip-crossing control below the hip line (reference px)
const HIP_CURVE_DROP_PX: f64 = 20.0;

/// Rise of the shoulder-crossing control above the shoulder line (reference px)
const SHOULDER_CURVE_RISE_PX: f64 = 10.0;

/// Geometry engine bound to one render surface
#[derive(Debug, Clone, Copy, Default)]
pub struct TwinGeometry {
    canvas: Canvas,
}

impl TwinGeometry {
    /// Engine for the default 400×600 canvas
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Anchor boxes from body ratios
    ///
    /// Ratios are used as given; callers clamp with `BodyRatios::normalized`.
    pub fn generate_coordinates(&self, ratios: &BodyRatios) -> DigitalTwinCoords {
        DigitalTwinCoords {
            height: TWIN_HEIGHT,
            shoulders: AnchorBox::new(CENTER_X, ANCHOR_SHOULDERS_Y, ratios.shoulder_ratio),
            bust: AnchorBox::new(CENTER_X, ANCHOR_BUST_Y, ratios.shoulder_ratio * BUST_TO_SHOULDER),
            waist: AnchorBox::new(CENTER_X, ANCHOR_WAIST_Y, ratios.waist_ratio),
            hips: AnchorBox::new(CENTER_X, ANCHOR_HIPS_Y, ratios.hip_ratio),
        }
    }

    /// Closed body outline through the 8 left/right anchor points
    pub fn generate_silhouette_path(&self, coords: &DigitalTwinCoords) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, bust, waist, hips, .. } = coords;

        let center = c.x(shoulders.x);
        let (shoulder_y, bust_y, waist_y, hip_y) =
            (c.y(shoulders.y), c.y(bust.y), c.y(waist.y), c.y(hips.y));
        let waist_hip_mid = (waist_y + hip_y) / 2.0;
        let hip_control_y = hip_y + c.px_y(HIP_CURVE_DROP_PX);
        let shoulder_control_y = shoulder_y - c.px_y(SHOULDER_CURVE_RISE_PX);

        let mut path = PathData::new();
        path.move_to(c.x(shoulders.left()), shoulder_y)
            .quad_to(c.x(bust.left()), bust_y, c.x(waist.left()), waist_y)
            .quad_to(c.x(waist.left()), waist_hip_mid, c.x(hips.left()), hip_y)
            .quad_to(center, hip_control_y, c.x(hips.right()), hip_y)
            .quad_to(c.x(waist.right()), waist_hip_mid, c.x(waist.right()), waist_y)
            .quad_to(c.x(bust.right()), bust_y, c.x(shoulders.right()), shoulder_y)
            .quad_to(center, shoulder_control_y, c.x(shoulders.left()), shoulder_y)
            .close();
        path
    }

    /// Garment overlay for the outfit's category
    pub fn generate_outfit_overlay(&self, coords: &DigitalTwinCoords, outfit: &OutfitDesign) -> PathData {
        OverlayBuilder::new(self.canvas, coords).build(outfit)
    }

    /// Seams, panel division, darts, borders, embroidery zones, cut outline
    pub fn construction_layers(&self, coords: &DigitalTwinCoords, outfit: &OutfitDesign) -> ConstructionLayers {
        let overlay = self.generate_outfit_overlay(coords, outfit);
        build_layers(self.canvas, coords, outfit, &overlay)
    }

    /// Apply percentage slider deltas; the bust follows 80% of the shoulder delta
    pub fn apply_user_adjustments(&self, coords: &DigitalTwinCoords, adjustments: &Adjustments) -> DigitalTwinCoords {
        let mut adjusted = *coords;

        if let Some(shoulder) = adjustments.shoulder {
            adjusted.shoulders.width *= 1.0 + shoulder / 100.0;
            adjusted.bust.width *= 1.0 + shoulder / 100.0 * BUST_FOLLOWS_SHOULDER;
        }
        if let Some(waist) = adjustments.waist {
            adjusted.waist.width *= 1.0 + waist / 100.0;
        }
        if let Some(hip) = adjustments.hip {
            adjusted.hips.width *= 1.0 + hip / 100.0;
        }
        if let Some(height) = adjustments.height {
            adjusted.height *= 1.0 + height / 100.0;
        }

        adjusted
    }

    /// Scale each width by its persistent-body proportion factor
    pub fn apply_proportions(&self, coords: &DigitalTwinCoords, proportions: &BodyProportions) -> DigitalTwinCoords {
        let mut scaled = *coords;
        scaled.shoulders.width *= proportions.shoulder;
        scaled.bust.width *= proportions.bust;
        scaled.waist.width *= proportions.waist;
        scaled.hips.width *= proportions.hip;
        scaled
    }
}

// =============================================================================
// TESTS
// =============================================================================
