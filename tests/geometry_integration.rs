//! Integration tests for the twin geometry engine
//!
//! Coordinates, silhouette, overlays and slider adjustments

use pretty_assertions::assert_eq;
use twinfit::core::{Canvas, OverlayBuilder, TwinGeometry};
use twinfit::types::{
    Adjustments, BodyRatios, BodyShape, DupattaDesign, DupattaLength, DupattaStyle, DrapingStyle,
    BorderStyle, EmbellishmentPattern, EmbellishmentType, Intensity, LayerKind, NecklineType,
    OutfitDesign, OutfitType, PalluStyle, PathData, Placement, PleatingPattern, SareeDesign,
    SareeDrapingStyle, SleeveLength,
};

const EPS: f64 = 1e-9;

#[test]
fn test_end_to_end_hourglass() {
    let geom = TwinGeometry::new();
    let ratios = BodyRatios::new(0.42, 0.28, 0.42, 0.50);
    let coords = geom.generate_coordinates(&ratios);

    assert!((coords.shoulders.width - 0.42).abs() < EPS);
    assert!((coords.waist.width - 0.28).abs() < EPS);
    assert!((coords.hips.width - 0.42).abs() < EPS);
    assert!((coords.bust.width - 0.399).abs() < EPS);

    assert_eq!(coords.shoulders.y, 0.15);
    assert_eq!(coords.bust.y, 0.35);
    assert_eq!(coords.waist.y, 0.50);
    assert_eq!(coords.hips.y, 0.65);

    let path = geom.generate_silhouette_path(&coords).to_string();
    assert!(path.starts_with('M'));
    assert!(path.ends_with('Z'));
}

#[test]
fn test_coordinate_symmetry() {
    let geom = TwinGeometry::new();
    for waist in [0.20, 0.28, 0.36, 0.45] {
        let coords = geom.generate_coordinates(&BodyRatios::new(0.44, waist, 0.44, 0.5));
        for anchor in [coords.shoulders, coords.bust, coords.waist, coords.hips] {
            assert_eq!(anchor.x, 0.5);
            assert!((anchor.left() + anchor.right() - 1.0).abs() < EPS);
        }

        let silhouette = geom.generate_silhouette_path(&coords);
        assert!(
            silhouette.is_mirror_symmetric(200.0, 1e-6),
            "silhouette not symmetric for waist {}",
            waist
        );
    }
}

#[test]
fn test_every_shape_renders_closed() {
    let geom = TwinGeometry::new();
    for shape in BodyShape::ALL {
        let coords = geom.generate_coordinates(&shape.default_ratios());
        let path = geom.generate_silhouette_path(&coords);
        assert!(path.is_closed(), "{} silhouette not closed", shape);
    }
}

#[test]
fn test_zero_adjustment_is_identity() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Pear.default_ratios());
    let adjusted = geom.apply_user_adjustments(&coords, &Adjustments::zero());
    assert_eq!(adjusted, coords);

    let untouched = geom.apply_user_adjustments(&coords, &Adjustments::default());
    assert_eq!(untouched, coords);
}

#[test]
fn test_adjustment_does_not_mutate_input() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Apple.default_ratios());
    let snapshot = coords;

    let adjusted = geom.apply_user_adjustments(
        &coords,
        &Adjustments {
            shoulder: Some(10.0),
            waist: Some(-10.0),
            hip: Some(5.0),
            height: Some(2.0),
        },
    );

    assert_eq!(coords, snapshot);
    assert_ne!(adjusted, coords);
}

#[test]
fn test_shoulder_adjustment_drags_bust() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Rectangle.default_ratios());
    let adjusted = geom.apply_user_adjustments(
        &coords,
        &Adjustments { shoulder: Some(10.0), ..Adjustments::default() },
    );

    assert!((adjusted.shoulders.width - coords.shoulders.width * 1.10).abs() < EPS);
    assert!((adjusted.bust.width - coords.bust.width * 1.08).abs() < EPS);
    assert_eq!(adjusted.waist, coords.waist);
    assert_eq!(adjusted.shoulders.y, coords.shoulders.y);
}

#[test]
fn test_overlay_per_outfit_type() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Hourglass.default_ratios());

    let blouse = geom.generate_outfit_overlay(&coords, &OutfitDesign::new(OutfitType::SareeBlouse));
    let kameez = geom.generate_outfit_overlay(&coords, &OutfitDesign::new(OutfitType::SalwarKameez));
    let anarkali = geom.generate_outfit_overlay(&coords, &OutfitDesign::new(OutfitType::AnarkaliSuit));
    let fallback = geom.generate_outfit_overlay(&coords, &OutfitDesign::new(OutfitType::IndoWestern));

    assert!(!blouse.is_empty());
    assert_ne!(blouse, kameez);
    assert_ne!(kameez, anarkali);
    assert_eq!(fallback, blouse);
}

#[test]
fn test_sleeveless_has_fewer_subpaths() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Hourglass.default_ratios());

    let mut outfit = OutfitDesign::new(OutfitType::SareeBlouse);
    outfit.top_design.sleeve_length = SleeveLength::Elbow;
    let sleeved = geom.generate_outfit_overlay(&coords, &outfit);

    outfit.top_design.sleeve_length = SleeveLength::Sleeveless;
    let bare = geom.generate_outfit_overlay(&coords, &outfit);

    assert_eq!(sleeved.subpath_count(), bare.subpath_count() + 2);
}

#[test]
fn test_dupatta_is_appended() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Hourglass.default_ratios());

    let mut outfit = OutfitDesign::new(OutfitType::SalwarKameez);
    let without = geom.generate_outfit_overlay(&coords, &outfit);

    outfit.dupatta_design = Some(DupattaDesign {
        style: DupattaStyle::Chiffon,
        draping: DrapingStyle::Gujarati,
        border: BorderStyle::Embroidered,
        length: DupattaLength::Medium,
    });
    let with = geom.generate_outfit_overlay(&coords, &outfit);

    assert!(with.subpath_count() > without.subpath_count());
    assert_eq!(&with.segments()[..without.len()], without.segments());
}

#[test]
fn test_overlay_string_round_trips_through_parser() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Pear.default_ratios());
    let overlay = geom.generate_outfit_overlay(&coords, &OutfitDesign::new(OutfitType::LehengaCholi));

    let parsed: PathData = overlay.to_string().parse().unwrap();
    assert_eq!(parsed.len(), overlay.len());
    assert_eq!(parsed.to_string(), overlay.to_string());
}

#[test]
fn test_construction_layers_follow_outfit() {
    let geom = TwinGeometry::new();
    let coords = geom.generate_coordinates(&BodyShape::Hourglass.default_ratios());
    let outfit = OutfitDesign::new(OutfitType::SalwarKameez);
    let layers = geom.construction_layers(&coords, &outfit);

    assert_eq!(layers.kinds(), LayerKind::ORDER.to_vec());
    assert_eq!(
        layers.get(LayerKind::Seams).unwrap().path,
        geom.generate_outfit_overlay(&coords, &outfit)
    );
}

fn assert_scaled(small: &PathData, large: &PathData, factor: f64) {
    assert_eq!(small.len(), large.len());
    let (small, large) = (small.points(), large.points());
    assert_eq!(small.len(), large.len());
    for (a, b) in small.iter().zip(&large) {
        assert!(
            (a.x * factor - b.x).abs() < EPS && (a.y * factor - b.y).abs() < EPS,
            "({}, {}) does not scale to ({}, {})",
            a.x,
            a.y,
            b.x,
            b.y
        );
    }
}

#[test]
fn test_double_canvas_doubles_every_point() {
    let small = TwinGeometry::new();
    let large = TwinGeometry::with_canvas(Canvas::new(800.0, 1200.0));
    let coords = small.generate_coordinates(&BodyShape::Hourglass.default_ratios());

    let mut outfit = OutfitDesign::new(OutfitType::SareeBlouse);
    outfit.top_design.neckline = NecklineType::Sweetheart;
    outfit.top_design.sleeve_length = SleeveLength::Elbow;
    outfit.saree_design = Some(SareeDesign {
        draping_style: SareeDrapingStyle::Bengali,
        pleating_pattern: PleatingPattern::BoxPleats,
        pallu_style: PalluStyle::Contrast,
        border_design: BorderStyle::Lace,
    });
    outfit.dupatta_design = Some(DupattaDesign {
        style: DupattaStyle::Net,
        draping: DrapingStyle::Bengali,
        border: BorderStyle::Sequined,
        length: DupattaLength::Long,
    });
    let placements = [Placement::Neckline, Placement::Sleeves, Placement::Hem, Placement::Border];
    outfit.embellishments = placements
        .into_iter()
        .map(|placement| EmbellishmentPattern {
            kind: EmbellishmentType::Zardozi,
            placement,
            intensity: Intensity::Heavy,
        })
        .collect();

    assert_scaled(
        &small.generate_silhouette_path(&coords),
        &large.generate_silhouette_path(&coords),
        2.0,
    );

    let small_overlay = small.generate_outfit_overlay(&coords, &outfit);
    let large_overlay = large.generate_outfit_overlay(&coords, &outfit);
    assert_scaled(&small_overlay, &large_overlay, 2.0);

    // elbow cuff: shoulder line 90 + 10 + 120 on the reference canvas
    let cuff = |canvas: Canvas| {
        OverlayBuilder::new(canvas, &coords)
            .sleeves(SleeveLength::Elbow)
            .points()
            .iter()
            .map(|p| p.y)
            .fold(f64::MIN, f64::max)
    };
    assert!((cuff(Canvas::default()) - 220.0).abs() < EPS);
    assert!((cuff(Canvas::new(800.0, 1200.0)) - 440.0).abs() < EPS);

    let small_layers = small.construction_layers(&coords, &outfit);
    let large_layers = large.construction_layers(&coords, &outfit);
    for kind in LayerKind::ORDER {
        assert_scaled(
            &small_layers.get(kind).unwrap().path,
            &large_layers.get(kind).unwrap().path,
            2.0,
        );
    }
}
