//! Styling session: geometry engine wired to both managers
//!
//! Flow per edit:
//! 1. Body parameters are clamped and need an initialized body
//! 2. The update goes through change isolation (rejections stop here)
//! 3. Committed body factors are mirrored into the persistent body,
//!    committed design values into the outfit
//! 4. A fresh render is derived from ratios, proportions and sliders

use serde::Serialize;

use crate::core::{ChangeIsolationManager, PersistentBodyManager, TwinGeometry};
use crate::error::TwinError;
use crate::types::{
    Adjustments, BodyPose, BodyProportions, BodyRatios, BodyShape, ChangeRecord,
    ConstructionLayers, DesignState, DigitalTwinCoords, LightingState, OutfitDesign, PathData,
    ParameterUpdate, PersistentBodyState, ProportionUpdate,
};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwinRender {
    pub coords: DigitalTwinCoords,
    pub silhouette: PathData,
    pub overlay: PathData,
    pub layers: ConstructionLayers,
}

/// One user's editing session
#[derive(Debug)]
pub struct StylingSession {
    geometry: TwinGeometry,
    ratios: BodyRatios,
    outfit: OutfitDesign,
    adjustments: Adjustments,
    isolation: ChangeIsolationManager,
    body: PersistentBodyManager,
}

impl StylingSession {
    /// Start a session; ratios are clamped to their valid ranges
    pub fn new(geometry: TwinGeometry, ratios: BodyRatios, outfit: OutfitDesign) -> Self {
        let mut isolation = ChangeIsolationManager::new();
        isolation.initialize_state(DesignState::from_outfit(&outfit, BodyProportions::default()));

        Self {
            geometry,
            ratios: ratios.normalized(),
            outfit,
            adjustments: Adjustments::default(),
            isolation,
            body: PersistentBodyManager::new(),
        }
    }

    pub fn ratios(&self) -> BodyRatios {
        self.ratios
    }

    /// Archetype the session's ratios fall into
    pub fn shape(&self) -> BodyShape {
        BodyShape::classify(&self.ratios)
    }

    pub fn outfit(&self) -> &OutfitDesign {
        &self.outfit
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn design_state(&self) -> Option<DesignState> {
        self.isolation.get_current_state()
    }

    pub fn body_state(&self) -> Option<PersistentBodyState> {
        self.body.get_body_state()
    }

    pub fn history(&self) -> Vec<ChangeRecord> {
        self.isolation.get_change_history()
    }

    /// Establish the body and seed the tracked proportions from it
    pub fn initialize_body(
        &mut self,
        base_image: impl Into<String>,
        pose: BodyPose,
        lighting: LightingState,
        proportions: BodyProportions,
    ) -> Result<PersistentBodyState, TwinError> {
        let body = self.body.initialize_body(base_image, pose, lighting, proportions)?;

        if let Some(mut state) = self.isolation.get_current_state() {
            state.body_proportions = body.proportions;
            self.isolation.initialize_state(state);
        }
        Ok(body)
    }

    pub fn verify_body_continuity(&self, candidate: &PersistentBodyState) -> bool {
        self.body.verify_body_continuity(candidate)
    }

    pub fn regenerate_body(&self) -> Result<(), TwinError> {
        self.body.regenerate_body()
    }

    /// Apply one isolated edit and re-render
    pub fn apply(&mut self, update: ParameterUpdate) -> Result<TwinRender, TwinError> {
        let update = update.clamped();
        let parameter = update.name();

        if parameter.is_body() && !self.body.is_initialized() {
            return Err(TwinError::NotInitialized { component: "persistent body" });
        }

        self.isolation.update_parameter(update.clone()).into_result()?;

        match update {
            ParameterUpdate::BodyBust(v) => {
                self.body.update_proportions(ProportionUpdate { bust: Some(v), ..Default::default() })?;
            }
            ParameterUpdate::BodyWaist(v) => {
                self.body.update_proportions(ProportionUpdate { waist: Some(v), ..Default::default() })?;
            }
            ParameterUpdate::BodyHip(v) => {
                self.body.update_proportions(ProportionUpdate { hip: Some(v), ..Default::default() })?;
            }
            ParameterUpdate::BodyShoulder(v) => {
                self.body.update_proportions(ProportionUpdate { shoulder: Some(v), ..Default::default() })?;
            }
            ParameterUpdate::Neckline(v) => self.outfit.top_design.neckline = v,
            ParameterUpdate::SleeveLength(v) => self.outfit.top_design.sleeve_length = v,
            ParameterUpdate::SleeveStyle(v) => self.outfit.top_design.sleeve_style = v,
            ParameterUpdate::Color(v) => self.outfit.color_scheme.primary_color = v,
            ParameterUpdate::Embellishment(v) => self.outfit.embellishments = v,
            ParameterUpdate::Fit(v) => self.outfit.top_design.fit = v,
            ParameterUpdate::Length(v) => self.outfit.top_design.length = v,
            ParameterUpdate::Border(v) => {
                // Only drapes carry a border; bare outfits keep it in the state alone
                if let Some(dupatta) = self.outfit.dupatta_design.as_mut() {
                    dupatta.border = v;
                }
                if let Some(saree) = self.outfit.saree_design.as_mut() {
                    saree.border_design = v;
                }
            }
        }

        Ok(self.render())
    }

    /// Replace the slider deltas and re-render
    pub fn set_adjustments(&mut self, adjustments: Adjustments) -> TwinRender {
        self.adjustments = adjustments;
        self.render()
    }

    /// Current proportions: the body's when established, else neutral
    pub fn proportions(&self) -> BodyProportions {
        self.body
            .get_body_state()
            .map(|b| b.proportions)
            .unwrap_or_default()
    }

    /// Derive the frame: ratios → anchors → proportions → sliders → paths
    pub fn render(&self) -> TwinRender {
        let base = self.geometry.generate_coordinates(&self.ratios);
        let proportioned = self.geometry.apply_proportions(&base, &self.proportions());
        let coords = self.geometry.apply_user_adjustments(&proportioned, &self.adjustments);

        TwinRender {
            silhouette: self.geometry.generate_silhouette_path(&coords),
            overlay: self.geometry.generate_outfit_overlay(&coords, &self.outfit),
            layers: self.geometry.construction_layers(&coords, &self.outfit),
            coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorderStyle, NecklineType, OutfitType, ParameterName};
    use pretty_assertions::assert_eq;

    fn session() -> StylingSession {
        StylingSession::new(
            TwinGeometry::new(),
            BodyShape::Hourglass.default_ratios(),
            OutfitDesign::new(OutfitType::SalwarKameez),
        )
    }

    fn with_body() -> StylingSession {
        let mut s = session();
        s.initialize_body("photo.jpg", BodyPose::default(), LightingState::default(), BodyProportions::default())
            .unwrap();
        s
    }

    #[test]
    fn test_design_edit_reaches_outfit() {
        let mut s = session();
        s.apply(ParameterUpdate::Neckline(NecklineType::Boat)).unwrap();
        assert_eq!(s.outfit().top_design.neckline, NecklineType::Boat);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_body_edit_requires_body() {
        let mut s = session();
        let err = s.apply(ParameterUpdate::BodyWaist(0.9)).unwrap_err();
        assert_eq!(err, TwinError::NotInitialized { component: "persistent body" });
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_body_edit_is_clamped_and_mirrored() {
        let mut s = with_body();
        let render = s.apply(ParameterUpdate::BodyWaist(0.5)).unwrap();

        assert_eq!(s.body_state().unwrap().proportions.waist, 0.8);
        assert_eq!(s.design_state().unwrap().body_proportions.waist, 0.8);
        assert!((render.coords.waist.width - 0.28 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_initial_body_proportions_seed_state() {
        let mut s = session();
        s.initialize_body(
            "photo.jpg",
            BodyPose::default(),
            LightingState::default(),
            BodyProportions::new(1.1, 1.0, 1.0, 1.0),
        )
        .unwrap();
        assert_eq!(s.design_state().unwrap().body_proportions.bust, 1.1);
        // re-applying the seeded value changes nothing and is rejected
        let err = s.apply(ParameterUpdate::BodyBust(1.1)).unwrap_err();
        assert!(matches!(err, TwinError::IsolationViolation { parameter: ParameterName::BodyBust, .. }));
    }

    #[test]
    fn test_rejected_edit_leaves_render_unchanged() {
        let mut s = session();
        let before = s.render();
        let color = s.design_state().unwrap().color;
        assert!(s.apply(ParameterUpdate::Color(color)).is_err());
        assert_eq!(s.render(), before);
    }

    #[test]
    fn test_border_without_drape_stays_in_state() {
        let mut s = session();
        s.apply(ParameterUpdate::Border(BorderStyle::Embroidered)).unwrap();
        assert_eq!(s.design_state().unwrap().border, BorderStyle::Embroidered);
        assert!(s.outfit().dupatta_design.is_none());
    }

    #[test]
    fn test_adjustments_feed_render() {
        let mut s = session();
        let render = s.set_adjustments(Adjustments { hip: Some(10.0), ..Default::default() });
        assert!((render.coords.hips.width - 0.42 * 1.1).abs() < 1e-12);
    }
}
