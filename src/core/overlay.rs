//! Garment overlay builders
//!
//! Each builder emits independent sub-paths in one coordinate space: a
//! garment outline, a neckline stroke, sleeves, drapes. They are layered
//! construction lines, not one continuous outline.

use crate::core::config::Canvas;
use crate::types::{
    DigitalTwinCoords, NecklineType, OutfitDesign, OutfitType, PathData, SleeveLength, TopDesign,
    TopLength,
};

// Offsets suffixed `_PX` are drawn against the 400×600 reference canvas
// and go through `Canvas::px_x`/`px_y` before use.

/// Garment tops start this far below the shoulder line
const GARMENT_TOP_OFFSET_PX: f64 = 10.0;

/// Upward bow of a curved neckline
const NECK_CURVE_RISE_PX: f64 = 15.0;

/// Dip between the two lobes of a sweetheart neckline
const SWEETHEART_DIP_PX: f64 = 8.0;

/// Sleeve flare at the shoulder and at the cuff
const SLEEVE_FLARE_PX: f64 = 30.0;
const SLEEVE_CUFF_PX: f64 = 25.0;

/// Choli hem below the bust line
const CHOLI_DROP_PX: f64 = 40.0;

/// Pleat fold depth below the saree waistline
const PLEAT_DEPTH_PX: f64 = 10.0;

/// Pallu: start below and arc above the shoulder line, tail below the waist
const PALLU_SHOULDER_DROP_PX: f64 = 20.0;
const PALLU_ARC_RISE_PX: f64 = 10.0;
const PALLU_TAIL_DROP_PX: f64 = 50.0;

/// Dupatta drape control and hem below the bust line
const DUPATTA_SAG_PX: f64 = 80.0;
const DUPATTA_DRAPE_PX: f64 = 100.0;

/// Floor-length skirts, salwar cuffs and anarkali hems, as unit y
const FLOOR_HEM_Y: f64 = 580.0 / 600.0;
const SALWAR_HEM_Y: f64 = 520.0 / 600.0;
const ANARKALI_HEM_Y: f64 = 550.0 / 600.0;

const SAREE_PLEATS: usize = 7;

/// Top edge shared by every top garment, in canvas pixels
pub fn garment_top(canvas: &Canvas, coords: &DigitalTwinCoords) -> f64 {
    canvas.y(coords.shoulders.y) + canvas.px_y(GARMENT_TOP_OFFSET_PX)
}

/// Hem height of a top garment in unit space
pub fn top_hem_y(length: TopLength, coords: &DigitalTwinCoords) -> f64 {
    match length {
        TopLength::Crop => coords.bust.y + 0.05,
        TopLength::Waist => coords.waist.y + 0.02,
        TopLength::Hip => coords.hips.y + 0.02,
        TopLength::Knee => coords.hips.y + 0.15,
        TopLength::Midi => coords.hips.y + 0.25,
        TopLength::Maxi => 0.95,
    }
}

/// Builds overlay paths against one set of coordinates
pub struct OverlayBuilder<'a> {
    canvas: Canvas,
    coords: &'a DigitalTwinCoords,
}

impl<'a> OverlayBuilder<'a> {
    pub fn new(canvas: Canvas, coords: &'a DigitalTwinCoords) -> Self {
        Self { canvas, coords }
    }

    /// Dispatch on outfit type; unknown categories fall back to a blouse
    pub fn build(&self, outfit: &OutfitDesign) -> PathData {
        let top = &outfit.top_design;
        let mut path = PathData::new();

        match outfit.outfit_type {
            OutfitType::SareeBlouse => {
                path.append(self.blouse(top));
                if outfit.saree_design.is_some() {
                    path.append(self.saree());
                }
            }
            OutfitType::SalwarKameez => {
                path.append(self.kameez(top));
                if outfit.bottom_design.is_some() {
                    path.append(self.salwar());
                }
            }
            OutfitType::LehengaCholi => {
                path.append(self.choli(top));
                if outfit.bottom_design.is_some() {
                    path.append(self.lehenga());
                }
            }
            OutfitType::AnarkaliSuit => {
                path.append(self.anarkali(top));
            }
            _ => {
                path.append(self.blouse(top));
            }
        }

        if outfit.dupatta_design.is_some() {
            path.append(self.dupatta());
        }

        path
    }

    fn garment_top(&self) -> f64 {
        garment_top(&self.canvas, self.coords)
    }

    pub fn blouse(&self, top: &TopDesign) -> PathData {
        let mut path = self.neckline(top.neckline);
        path.append(self.sleeves(top.sleeve_length));
        path
    }

    pub fn kameez(&self, top: &TopDesign) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, waist, .. } = self.coords;
        let kameez_top = self.garment_top();
        let kameez_bottom = c.y(top_hem_y(top.length, self.coords));

        let mut path = PathData::new();
        path.move_to(c.x(shoulders.left()), kameez_top)
            .line_to(c.x(shoulders.right()), kameez_top)
            .line_to(c.x(waist.right()), kameez_bottom)
            .line_to(c.x(waist.left()), kameez_bottom)
            .close();
        path.append(self.blouse(top));
        path
    }

    pub fn salwar(&self) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { waist, hips, .. } = self.coords;
        let salwar_top = c.y(waist.y);
        let salwar_bottom = c.y(SALWAR_HEM_Y);

        let mut path = PathData::new();
        path.move_to(c.x(waist.left()), salwar_top)
            .line_to(c.x(waist.right()), salwar_top)
            .line_to(c.x(hips.right() + 0.05), c.y(hips.y))
            .line_to(c.x(hips.right()), salwar_bottom)
            .line_to(c.x(hips.left()), salwar_bottom)
            .line_to(c.x(hips.left() - 0.05), c.y(hips.y))
            .close();
        path
    }

    pub fn choli(&self, top: &TopDesign) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, bust, .. } = self.coords;
        let choli_top = self.garment_top();
        let choli_bottom = c.y(bust.y) + c.px_y(CHOLI_DROP_PX);

        let mut path = PathData::new();
        path.move_to(c.x(shoulders.left() + 0.02), choli_top)
            .line_to(c.x(shoulders.right() - 0.02), choli_top)
            .line_to(c.x(bust.right()), choli_bottom)
            .line_to(c.x(bust.left()), choli_bottom)
            .close();
        path.append(self.blouse(top));
        path
    }

    pub fn lehenga(&self) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { waist, hips, .. } = self.coords;
        let lehenga_top = c.y(waist.y);
        let lehenga_bottom = c.y(FLOOR_HEM_Y);
        let flare_y = c.y(hips.y + 0.1);

        let mut path = PathData::new();
        path.move_to(c.x(waist.left()), lehenga_top)
            .line_to(c.x(waist.right()), lehenga_top)
            .quad_to(c.x(hips.right() + 0.1), flare_y, c.x(hips.right() + 0.15), lehenga_bottom)
            .line_to(c.x(hips.left() - 0.15), lehenga_bottom)
            .quad_to(c.x(hips.left() - 0.1), flare_y, c.x(waist.left()), lehenga_top)
            .close();
        path
    }

    pub fn anarkali(&self, top: &TopDesign) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, bust, waist, .. } = self.coords;
        let anarkali_top = self.garment_top();
        let anarkali_bottom = c.y(ANARKALI_HEM_Y);
        let flare_y = c.y(waist.y + 0.05);

        let mut path = PathData::new();
        path.move_to(c.x(shoulders.left()), anarkali_top)
            .line_to(c.x(shoulders.right()), anarkali_top)
            .line_to(c.x(bust.right()), c.y(bust.y))
            .line_to(c.x(waist.right()), c.y(waist.y))
            .quad_to(c.x(waist.right() + 0.1), flare_y, c.x(waist.right() + 0.2), anarkali_bottom)
            .line_to(c.x(waist.left() - 0.2), anarkali_bottom)
            .quad_to(c.x(waist.left() - 0.1), flare_y, c.x(waist.left()), c.y(waist.y))
            .line_to(c.x(bust.left()), c.y(bust.y))
            .line_to(c.x(shoulders.left()), anarkali_top)
            .close();
        path.append(self.blouse(top));
        path
    }

    /// Pleated skirt from the waist to the floor plus the pallu over the shoulder
    pub fn saree(&self) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, waist, hips, .. } = self.coords;
        let saree_top = c.y(waist.y);
        let saree_bottom = c.y(FLOOR_HEM_Y);
        let pleat_width = c.x(waist.width) / SAREE_PLEATS as f64;
        let fold_y = saree_top + c.px_y(PLEAT_DEPTH_PX);

        let mut path = PathData::new();
        path.move_to(c.x(waist.left()), saree_top);
        for i in 0..SAREE_PLEATS {
            let x = c.x(waist.left()) + i as f64 * pleat_width;
            path.line_to(x, fold_y)
                .line_to(x + pleat_width / 2.0, saree_top)
                .line_to(x + pleat_width, fold_y);
        }
        path.line_to(c.x(hips.right()), saree_bottom)
            .line_to(c.x(hips.left()), saree_bottom)
            .close();

        let pallu_y = c.y(shoulders.y) + c.px_y(PALLU_SHOULDER_DROP_PX);
        path.move_to(c.x(shoulders.x - shoulders.width / 3.0), pallu_y)
            .quad_to(
                c.x(shoulders.x),
                c.y(shoulders.y) - c.px_y(PALLU_ARC_RISE_PX),
                c.x(shoulders.x + shoulders.width / 3.0),
                pallu_y,
            )
            .line_to(
                c.x(waist.x + waist.width / 4.0),
                c.y(waist.y) + c.px_y(PALLU_TAIL_DROP_PX),
            );
        path
    }

    pub fn dupatta(&self) -> PathData {
        let c = &self.canvas;
        let DigitalTwinCoords { shoulders, bust, .. } = self.coords;
        let shoulder_y = c.y(shoulders.y);
        let drape_y = c.y(bust.y) + c.px_y(DUPATTA_DRAPE_PX);

        let mut path = PathData::new();
        path.move_to(c.x(shoulders.left() - 0.05), shoulder_y)
            .quad_to(
                c.x(shoulders.x),
                c.y(shoulders.y - 0.02),
                c.x(shoulders.right() + 0.05),
                shoulder_y,
            )
            .line_to(c.x(bust.x + bust.width / 3.0), drape_y)
            .quad_to(
                c.x(bust.x),
                c.y(bust.y) + c.px_y(DUPATTA_SAG_PX),
                c.x(bust.x - bust.width / 3.0),
                drape_y,
            )
            .close();
        path
    }

    /// Neckline stroke, dropped by the neckline's depth below the garment top
    pub fn neckline(&self, neckline: NecklineType) -> PathData {
        let c = &self.canvas;
        let shoulders = &self.coords.shoulders;
        let top = self.garment_top();
        let neck_y = top + c.px_y(neckline.depth_px());
        let cx = c.x(shoulders.x);
        let half = c.x(shoulders.width) * 0.3;

        let mut path = PathData::new();
        match neckline {
            NecklineType::Boat | NecklineType::OffShoulder => {
                path.move_to(c.x(shoulders.x - shoulders.width * 0.4), neck_y)
                    .line_to(c.x(shoulders.x + shoulders.width * 0.4), neck_y);
            }
            NecklineType::VNeck => {
                path.move_to(cx - half, top).line_to(cx, neck_y).line_to(cx + half, top);
            }
            NecklineType::Square => {
                path.move_to(cx - half, top)
                    .line_to(cx - half, neck_y)
                    .line_to(cx + half, neck_y)
                    .line_to(cx + half, top);
            }
            NecklineType::Sweetheart => {
                path.move_to(cx - half, top)
                    .quad_to(cx - half, neck_y, cx, neck_y - c.px_y(SWEETHEART_DIP_PX))
                    .quad_to(cx + half, neck_y, cx + half, top);
            }
            NecklineType::Halter => {
                path.move_to(cx - half, neck_y)
                    .line_to(cx - half / 3.0, top)
                    .move_to(cx + half / 3.0, top)
                    .line_to(cx + half, neck_y);
            }
            NecklineType::HighNeck | NecklineType::ChineseCollar | NecklineType::MandarinCollar => {
                path.move_to(cx - half / 2.0, neck_y).line_to(cx + half / 2.0, neck_y);
            }
            NecklineType::OneShoulder => {
                path.move_to(c.x(shoulders.left()), neck_y).line_to(c.x(shoulders.right()), top);
            }
            _ => {
                path.move_to(cx - half, neck_y)
                    .quad_to(cx, neck_y - c.px_y(NECK_CURVE_RISE_PX), cx + half, neck_y);
            }
        }
        path
    }

    /// Left and right sleeve outlines; empty when sleeveless
    pub fn sleeves(&self, sleeve_length: SleeveLength) -> PathData {
        let mut path = PathData::new();
        let Some(length) = sleeve_length.length_px() else {
            return path;
        };

        let c = &self.canvas;
        let shoulders = &self.coords.shoulders;
        let top = self.garment_top();
        let cuff = top + c.px_y(length);
        let (flare, cuff_flare) = (c.px_x(SLEEVE_FLARE_PX), c.px_x(SLEEVE_CUFF_PX));
        let left = c.x(shoulders.left());
        let right = c.x(shoulders.right());

        path.move_to(left, top)
            .line_to(left - flare, top)
            .line_to(left - cuff_flare, cuff)
            .line_to(left, cuff);
        path.move_to(right, top)
            .line_to(right + flare, top)
            .line_to(right + cuff_flare, cuff)
            .line_to(right, cuff);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TwinGeometry;
    use crate::types::{
        BodyShape, BorderStyle, BottomDesign, BottomLength, BottomStyle, FitStyle, PalluStyle,
        PathSegment, PleatingPattern, Point, SareeDesign, SareeDrapingStyle, WaistStyle,
    };

    fn coords() -> DigitalTwinCoords {
        TwinGeometry::new().generate_coordinates(&BodyShape::Pear.default_ratios())
    }

    fn salwar_bottom() -> BottomDesign {
        BottomDesign {
            style: BottomStyle::Salwar,
            length: BottomLength::Floor,
            fit: FitStyle::Loose,
            waist_style: WaistStyle::Mid,
        }
    }

    #[test]
    fn test_sleeveless_omits_sleeves() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        assert!(builder.sleeves(SleeveLength::Sleeveless).is_empty());
        assert_eq!(builder.sleeves(SleeveLength::Cap).subpath_count(), 2);
    }

    #[test]
    fn test_sleeve_length_sets_cuff_height() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        let sleeves = builder.sleeves(SleeveLength::Elbow);
        let max_y = sleeves.points().iter().map(|p| p.y).fold(f64::MIN, f64::max);
        // shoulder line 90 + garment offset 10 + elbow 120
        assert!((max_y - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_neckline_depth_moves_stroke() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        let boat = builder.neckline(NecklineType::Boat);
        assert!(boat.points().iter().all(|p| (p.y - 115.0).abs() < 1e-9));
        let deep = builder.neckline(NecklineType::DeepRound);
        assert!((deep.points()[0].y - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_kameez_adds_salwar_only_with_bottom() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        let mut outfit = OutfitDesign::new(OutfitType::SalwarKameez);
        let without = builder.build(&outfit);
        outfit.bottom_design = Some(salwar_bottom());
        let with = builder.build(&outfit);
        assert_eq!(with.subpath_count(), without.subpath_count() + 1);
    }

    #[test]
    fn test_saree_pleats_skirt_and_pallu() {
        let coords = coords();
        let canvas = Canvas::default();
        let builder = OverlayBuilder::new(canvas, &coords);
        let mut outfit = OutfitDesign::new(OutfitType::SareeBlouse);
        outfit.saree_design = Some(SareeDesign {
            draping_style: SareeDrapingStyle::Nivi,
            pleating_pattern: PleatingPattern::KnifePleats,
            pallu_style: PalluStyle::HeavyWork,
            border_design: BorderStyle::Embroidered,
        });

        let overlay = builder.build(&outfit);
        let blouse = builder.blouse(&outfit.top_design);
        assert_eq!(&overlay.segments()[..blouse.len()], blouse.segments());
        assert_eq!(overlay.subpath_count(), blouse.subpath_count() + 2);

        let saree = &overlay.segments()[blouse.len()..];
        let left = canvas.x(coords.waist.left());
        let right = canvas.x(coords.waist.right());
        let waist_y = canvas.y(coords.waist.y);
        assert_eq!(saree[0], PathSegment::MoveTo(Point::new(left, waist_y)));

        // three strokes per pleat, all between the waist edges
        let pleats = &saree[1..=3 * SAREE_PLEATS];
        assert_eq!(pleats.len(), 21);
        let mut last_x = left;
        for segment in pleats {
            let PathSegment::LineTo(p) = segment else {
                panic!("pleat stroke is not a line: {:?}", segment);
            };
            assert!(p.x >= left - 1e-9 && p.x <= right + 1e-9);
            assert!(p.y == waist_y || (p.y - (waist_y + 10.0)).abs() < 1e-9);
            last_x = p.x;
        }
        assert!((last_x - right).abs() < 1e-9);

        // skirt runs down to the floor hem and closes
        let close = 3 * SAREE_PLEATS + 3;
        assert_eq!(saree[close], PathSegment::Close);
        for segment in &saree[close - 2..close] {
            let PathSegment::LineTo(p) = segment else {
                panic!("hem stroke is not a line: {:?}", segment);
            };
            assert!((p.y - 580.0).abs() < 1e-9);
        }

        // pallu is one open stroke over the shoulder
        let pallu = &saree[close + 1..];
        assert!(matches!(pallu[0], PathSegment::MoveTo(_)));
        assert_eq!(pallu.iter().filter(|s| matches!(s, PathSegment::MoveTo(_))).count(), 1);
        assert!(!matches!(pallu.last(), Some(PathSegment::Close)));
        let shoulder_y = canvas.y(coords.shoulders.y);
        assert!(matches!(pallu[1], PathSegment::QuadTo { control, .. } if control.y < shoulder_y));
    }

    #[test]
    fn test_lehenga_adds_floor_length_skirt() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        let mut outfit = OutfitDesign::new(OutfitType::LehengaCholi);
        let without = builder.build(&outfit);
        outfit.bottom_design = Some(BottomDesign {
            style: BottomStyle::Flared,
            length: BottomLength::Floor,
            fit: FitStyle::Regular,
            waist_style: WaistStyle::Low,
        });
        let with = builder.build(&outfit);
        assert_eq!(with.subpath_count(), without.subpath_count() + 1);
        assert_eq!(&with.segments()[..without.len()], without.segments());

        let skirt = &with.segments()[without.len()..];
        assert!(matches!(skirt.last(), Some(PathSegment::Close)));
        let lowest = skirt
            .iter()
            .flat_map(|s| s.points())
            .map(|p| p.y)
            .fold(f64::MIN, f64::max);
        assert!((lowest - 580.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_falls_back_to_blouse() {
        let coords = coords();
        let builder = OverlayBuilder::new(Canvas::default(), &coords);
        let outfit = OutfitDesign::new(OutfitType::IndoWestern);
        assert_eq!(builder.build(&outfit), builder.blouse(&outfit.top_design));
    }

    #[test]
    fn test_top_length_table() {
        let coords = coords();
        assert!((top_hem_y(TopLength::Crop, &coords) - 0.40).abs() < 1e-12);
        assert!((top_hem_y(TopLength::Knee, &coords) - 0.80).abs() < 1e-12);
        assert_eq!(top_hem_y(TopLength::Maxi, &coords), 0.95);
    }
}
