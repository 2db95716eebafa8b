//! The 12 tracked design parameters and their typed updates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    BorderStyle, EmbellishmentPattern, FitStyle, NecklineType, OutfitDesign, SleeveLength,
    SleeveStyle, TopLength,
};
use crate::{clamp_range, PROPORTION_MAX, PROPORTION_MIN};

/// Relative body proportion factors, 1.0 = as photographed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProportions {
    pub bust: f64,
    pub waist: f64,
    pub hip: f64,
    pub shoulder: f64,
}

impl BodyProportions {
    pub fn new(bust: f64, waist: f64, hip: f64, shoulder: f64) -> Self {
        Self { bust, waist, hip, shoulder }
    }

    /// Every factor clamped to [0.8, 1.2]
    pub fn clamped(&self) -> Self {
        let range = (PROPORTION_MIN, PROPORTION_MAX);
        Self {
            bust: clamp_range(self.bust, range),
            waist: clamp_range(self.waist, range),
            hip: clamp_range(self.hip, range),
            shoulder: clamp_range(self.shoulder, range),
        }
    }
}

impl Default for BodyProportions {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

/// Flat record of every parameter the isolation manager tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignState {
    pub neckline: NecklineType,
    pub sleeve_length: SleeveLength,
    pub sleeve_style: SleeveStyle,
    pub color: String,
    pub embellishment: Vec<EmbellishmentPattern>,
    pub border: BorderStyle,
    pub fit: FitStyle,
    pub length: TopLength,
    pub body_proportions: BodyProportions,
}

impl DesignState {
    /// Seed the tracked state from an outfit and the body's proportions
    pub fn from_outfit(outfit: &OutfitDesign, body_proportions: BodyProportions) -> Self {
        let top = &outfit.top_design;
        Self {
            neckline: top.neckline,
            sleeve_length: top.sleeve_length,
            sleeve_style: top.sleeve_style,
            color: outfit.color_scheme.primary_color.clone(),
            embellishment: outfit.embellishments.clone(),
            border: outfit.border(),
            fit: top.fit,
            length: top.length,
            body_proportions,
        }
    }

    /// Current value of one parameter, as an update that would set it
    pub fn value_of(&self, name: ParameterName) -> ParameterUpdate {
        match name {
            ParameterName::Neckline => ParameterUpdate::Neckline(self.neckline),
            ParameterName::SleeveLength => ParameterUpdate::SleeveLength(self.sleeve_length),
            ParameterName::SleeveStyle => ParameterUpdate::SleeveStyle(self.sleeve_style),
            ParameterName::Color => ParameterUpdate::Color(self.color.clone()),
            ParameterName::Embellishment => ParameterUpdate::Embellishment(self.embellishment.clone()),
            ParameterName::Border => ParameterUpdate::Border(self.border),
            ParameterName::Fit => ParameterUpdate::Fit(self.fit),
            ParameterName::Length => ParameterUpdate::Length(self.length),
            ParameterName::BodyBust => ParameterUpdate::BodyBust(self.body_proportions.bust),
            ParameterName::BodyWaist => ParameterUpdate::BodyWaist(self.body_proportions.waist),
            ParameterName::BodyHip => ParameterUpdate::BodyHip(self.body_proportions.hip),
            ParameterName::BodyShoulder => ParameterUpdate::BodyShoulder(self.body_proportions.shoulder),
        }
    }

    /// Copy of this state with one parameter replaced
    pub fn with_update(&self, update: &ParameterUpdate) -> Self {
        let mut next = self.clone();
        match update {
            ParameterUpdate::Neckline(v) => next.neckline = *v,
            ParameterUpdate::SleeveLength(v) => next.sleeve_length = *v,
            ParameterUpdate::SleeveStyle(v) => next.sleeve_style = *v,
            ParameterUpdate::Color(v) => next.color = v.clone(),
            ParameterUpdate::Embellishment(v) => next.embellishment = v.clone(),
            ParameterUpdate::Border(v) => next.border = *v,
            ParameterUpdate::Fit(v) => next.fit = *v,
            ParameterUpdate::Length(v) => next.length = *v,
            ParameterUpdate::BodyBust(v) => next.body_proportions.bust = *v,
            ParameterUpdate::BodyWaist(v) => next.body_proportions.waist = *v,
            ParameterUpdate::BodyHip(v) => next.body_proportions.hip = *v,
            ParameterUpdate::BodyShoulder(v) => next.body_proportions.shoulder = *v,
        }
        next
    }

    /// Names of every tracked parameter whose value differs from `other`
    ///
    /// Both sides are destructured field by field, so adding a field to the
    /// state without tracking it here fails to compile.
    pub fn diff(&self, other: &DesignState) -> Vec<ParameterName> {
        let DesignState {
            neckline,
            sleeve_length,
            sleeve_style,
            color,
            embellishment,
            border,
            fit,
            length,
            body_proportions: BodyProportions { bust, waist, hip, shoulder },
        } = self;
        let DesignState {
            neckline: o_neckline,
            sleeve_length: o_sleeve_length,
            sleeve_style: o_sleeve_style,
            color: o_color,
            embellishment: o_embellishment,
            border: o_border,
            fit: o_fit,
            length: o_length,
            body_proportions:
                BodyProportions {
                    bust: o_bust,
                    waist: o_waist,
                    hip: o_hip,
                    shoulder: o_shoulder,
                },
        } = other;

        let checks = [
            (ParameterName::Neckline, neckline != o_neckline),
            (ParameterName::SleeveLength, sleeve_length != o_sleeve_length),
            (ParameterName::SleeveStyle, sleeve_style != o_sleeve_style),
            (ParameterName::Color, color != o_color),
            (ParameterName::Embellishment, embellishment != o_embellishment),
            (ParameterName::Border, border != o_border),
            (ParameterName::Fit, fit != o_fit),
            (ParameterName::Length, length != o_length),
            (ParameterName::BodyBust, bust.to_bits() != o_bust.to_bits()),
            (ParameterName::BodyWaist, waist.to_bits() != o_waist.to_bits()),
            (ParameterName::BodyHip, hip.to_bits() != o_hip.to_bits()),
            (ParameterName::BodyShoulder, shoulder.to_bits() != o_shoulder.to_bits()),
        ];

        checks
            .into_iter()
            .filter(|(_, changed)| *changed)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Names of the 12 tracked parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    Neckline,
    SleeveLength,
    SleeveStyle,
    Color,
    Embellishment,
    Border,
    Fit,
    Length,
    BodyBust,
    BodyWaist,
    BodyHip,
    BodyShoulder,
}

impl ParameterName {
    pub const ALL: [ParameterName; 12] = [
        ParameterName::Neckline,
        ParameterName::SleeveLength,
        ParameterName::SleeveStyle,
        ParameterName::Color,
        ParameterName::Embellishment,
        ParameterName::Border,
        ParameterName::Fit,
        ParameterName::Length,
        ParameterName::BodyBust,
        ParameterName::BodyWaist,
        ParameterName::BodyHip,
        ParameterName::BodyShoulder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::Neckline => "neckline",
            ParameterName::SleeveLength => "sleeve_length",
            ParameterName::SleeveStyle => "sleeve_style",
            ParameterName::Color => "color",
            ParameterName::Embellishment => "embellishment",
            ParameterName::Border => "border",
            ParameterName::Fit => "fit",
            ParameterName::Length => "length",
            ParameterName::BodyBust => "body_bust",
            ParameterName::BodyWaist => "body_waist",
            ParameterName::BodyHip => "body_hip",
            ParameterName::BodyShoulder => "body_shoulder",
        }
    }

    /// Parameters nested under `body_proportions`
    pub fn is_body(&self) -> bool {
        matches!(
            self,
            ParameterName::BodyBust
                | ParameterName::BodyWaist
                | ParameterName::BodyHip
                | ParameterName::BodyShoulder
        )
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A new value for exactly one tracked parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parameter", content = "value", rename_all = "snake_case")]
pub enum ParameterUpdate {
    Neckline(NecklineType),
    SleeveLength(SleeveLength),
    SleeveStyle(SleeveStyle),
    Color(String),
    Embellishment(Vec<EmbellishmentPattern>),
    Border(BorderStyle),
    Fit(FitStyle),
    Length(TopLength),
    BodyBust(f64),
    BodyWaist(f64),
    BodyHip(f64),
    BodyShoulder(f64),
}

impl ParameterUpdate {
    pub fn name(&self) -> ParameterName {
        match self {
            ParameterUpdate::Neckline(_) => ParameterName::Neckline,
            ParameterUpdate::SleeveLength(_) => ParameterName::SleeveLength,
            ParameterUpdate::SleeveStyle(_) => ParameterName::SleeveStyle,
            ParameterUpdate::Color(_) => ParameterName::Color,
            ParameterUpdate::Embellishment(_) => ParameterName::Embellishment,
            ParameterUpdate::Border(_) => ParameterName::Border,
            ParameterUpdate::Fit(_) => ParameterName::Fit,
            ParameterUpdate::Length(_) => ParameterName::Length,
            ParameterUpdate::BodyBust(_) => ParameterName::BodyBust,
            ParameterUpdate::BodyWaist(_) => ParameterName::BodyWaist,
            ParameterUpdate::BodyHip(_) => ParameterName::BodyHip,
            ParameterUpdate::BodyShoulder(_) => ParameterName::BodyShoulder,
        }
    }

    /// Body factor carried by a body update
    pub fn body_factor(&self) -> Option<f64> {
        match self {
            ParameterUpdate::BodyBust(v)
            | ParameterUpdate::BodyWaist(v)
            | ParameterUpdate::BodyHip(v)
            | ParameterUpdate::BodyShoulder(v) => Some(*v),
            _ => None,
        }
    }

    /// Same update with a body factor clamped to [0.8, 1.2]
    pub fn clamped(self) -> Self {
        let range = (PROPORTION_MIN, PROPORTION_MAX);
        match self {
            ParameterUpdate::BodyBust(v) => ParameterUpdate::BodyBust(clamp_range(v, range)),
            ParameterUpdate::BodyWaist(v) => ParameterUpdate::BodyWaist(clamp_range(v, range)),
            ParameterUpdate::BodyHip(v) => ParameterUpdate::BodyHip(clamp_range(v, range)),
            ParameterUpdate::BodyShoulder(v) => ParameterUpdate::BodyShoulder(clamp_range(v, range)),
            other => other,
        }
    }
}
