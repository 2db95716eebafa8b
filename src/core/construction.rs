//! Construction layers for tailoring previews
//!
//! Drawing order: seams, panel division, darts, borders, embroidery zones,
//! cut outline. Seams and cut outline both trace the garment overlay.

use std::collections::BTreeSet;

use crate::core::config::Canvas;
use crate::core::overlay::{garment_top, top_hem_y};
use crate::types::{
    ConstructionLayers, DigitalTwinCoords, LayerKind, OutfitDesign, PathData, Placement,
};

// Sizes below are 400×600 reference pixels, scaled through the canvas.

/// Neckline border ellipse, centred this far below the shoulder line
const NECK_BORDER_RX: f64 = 30.0;
const NECK_BORDER_RY: f64 = 15.0;
const NECK_BORDER_DROP: f64 = 20.0;

/// Default chest embroidery zone
const CHEST_ZONE_W: f64 = 64.0;
const CHEST_ZONE_H: f64 = 40.0;

/// Neckline zone: half width, drop below the shoulder line, height
const NECK_ZONE_HALF_W: f64 = 35.0;
const NECK_ZONE_DROP: f64 = 5.0;
const NECK_ZONE_H: f64 = 30.0;

/// Cuff zones on each sleeve
const CUFF_ZONE_W: f64 = 30.0;
const CUFF_ZONE_H: f64 = 15.0;

/// Bands sitting on the hem
const HEM_ZONE_H: f64 = 15.0;
const BORDER_ZONE_H: f64 = 8.0;

pub fn build_layers(
    canvas: Canvas,
    coords: &DigitalTwinCoords,
    outfit: &OutfitDesign,
    overlay: &PathData,
) -> ConstructionLayers {
    let mut layers = ConstructionLayers::default();
    layers.push(LayerKind::Seams, overlay.clone());
    layers.push(LayerKind::PanelDivision, panel_division(canvas, coords));
    layers.push(LayerKind::Darts, darts(canvas, coords));
    layers.push(LayerKind::Borders, borders(canvas, coords, outfit));
    layers.push(LayerKind::EmbroideryZones, embroidery_zones(canvas, coords, outfit));
    layers.push(LayerKind::CutOutline, overlay.clone());
    layers
}

/// Centre-front line from the shoulders to the waist
fn panel_division(c: Canvas, coords: &DigitalTwinCoords) -> PathData {
    let mut path = PathData::new();
    path.move_to(c.x(coords.shoulders.x), c.y(coords.shoulders.y))
        .line_to(c.x(coords.waist.x), c.y(coords.waist.y));
    path
}

/// Two bust darts below the shoulders, two waist darts either side of centre
fn darts(c: Canvas, coords: &DigitalTwinCoords) -> PathData {
    let sx = coords.shoulders.x;
    let sy = coords.shoulders.y;
    let wx = coords.waist.x;
    let wy = coords.waist.y;

    let mut path = PathData::new();
    for side in [-1.0, 1.0] {
        path.move_to(c.x(sx + side * 0.05), c.y(sy + 0.05))
            .line_to(c.x(sx + side * 0.03), c.y(sy + 0.12))
            .line_to(c.x(sx + side * 0.07), c.y(sy + 0.12))
            .close();
    }
    for side in [-1.0, 1.0] {
        path.move_to(c.x(wx + side * 0.04), c.y(wy - 0.05))
            .line_to(c.x(wx + side * 0.03), c.y(wy + 0.05))
            .line_to(c.x(wx + side * 0.05), c.y(wy + 0.05))
            .close();
    }
    path
}

/// Neckline ellipse and hem line
fn borders(c: Canvas, coords: &DigitalTwinCoords, outfit: &OutfitDesign) -> PathData {
    let mut path = ellipse(
        c.x(coords.shoulders.x),
        c.y(coords.shoulders.y) + c.px_y(NECK_BORDER_DROP),
        c.px_x(NECK_BORDER_RX),
        c.px_y(NECK_BORDER_RY),
    );

    let hem_y = c.y(top_hem_y(outfit.top_design.length, coords));
    path.move_to(c.x(coords.waist.left()), hem_y)
        .line_to(c.x(coords.waist.right()), hem_y);
    path
}

/// One zone per distinct embellishment placement; a chest zone when bare
fn embroidery_zones(c: Canvas, coords: &DigitalTwinCoords, outfit: &OutfitDesign) -> PathData {
    let placements: BTreeSet<Placement> = outfit.embellishments.iter().map(|e| e.placement).collect();
    let shoulders = &coords.shoulders;
    let top_y = garment_top(&c, coords);
    let hem_y = c.y(top_hem_y(outfit.top_design.length, coords));

    let chest = || {
        rect(
            c.x(shoulders.x - 0.08),
            c.y(shoulders.y + 0.08),
            c.px_x(CHEST_ZONE_W),
            c.px_y(CHEST_ZONE_H),
        )
    };

    if placements.is_empty() {
        return chest();
    }

    let mut path = PathData::new();
    for placement in placements {
        match placement {
            Placement::Yoke => {
                path.append(chest());
            }
            Placement::Neckline => {
                path.append(rect(
                    c.x(shoulders.x) - c.px_x(NECK_ZONE_HALF_W),
                    c.y(shoulders.y) + c.px_y(NECK_ZONE_DROP),
                    c.px_x(2.0 * NECK_ZONE_HALF_W),
                    c.px_y(NECK_ZONE_H),
                ));
            }
            Placement::Sleeves => {
                if let Some(len) = outfit.top_design.sleeve_length.length_px() {
                    let (w, h) = (c.px_x(CUFF_ZONE_W), c.px_y(CUFF_ZONE_H));
                    let cuff = top_y + c.px_y(len);
                    path.append(rect(c.x(shoulders.left()) - w, cuff - h, w, h));
                    path.append(rect(c.x(shoulders.right()), cuff - h, w, h));
                }
            }
            Placement::Hem => {
                let waist = &coords.waist;
                let h = c.px_y(HEM_ZONE_H);
                path.append(rect(c.x(waist.left()), hem_y - h, c.x(waist.width), h));
            }
            Placement::Border => {
                let hips = &coords.hips;
                let h = c.px_y(BORDER_ZONE_H);
                path.append(rect(c.x(hips.left()), hem_y - h, c.x(hips.width), h));
            }
            Placement::AllOver => {
                path.append(rect(
                    c.x(shoulders.left()),
                    top_y,
                    c.x(shoulders.width),
                    hem_y - top_y,
                ));
            }
        }
    }
    path
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> PathData {
    let mut path = PathData::new();
    path.move_to(x, y)
        .line_to(x + w, y)
        .line_to(x + w, y + h)
        .line_to(x, y + h)
        .close();
    path
}

/// Ellipse approximated by four quadratic quarter arcs
fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> PathData {
    let mut path = PathData::new();
    path.move_to(cx + rx, cy)
        .quad_to(cx + rx, cy + ry, cx, cy + ry)
        .quad_to(cx - rx, cy + ry, cx - rx, cy)
        .quad_to(cx - rx, cy - ry, cx, cy - ry)
        .quad_to(cx + rx, cy - ry, cx + rx, cy)
        .close();
    path
}
