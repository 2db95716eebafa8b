//! Outfit design vocabulary
//!
//! Owned by the caller; the geometry engine reads it per render.

use serde::{Deserialize, Serialize};

/// Garment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutfitType {
    SareeBlouse,
    SalwarKameez,
    LehengaCholi,
    ShararaSuit,
    GhararaSuit,
    AnarkaliSuit,
    PalazzoSuit,
    HalfSaree,
    KurtiPalazzo,
    KurtiLeggings,
    IndoWestern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NecklineType {
    Round,
    Boat,
    DeepRound,
    Square,
    Sweetheart,
    Halter,
    VNeck,
    Scoop,
    HighNeck,
    OffShoulder,
    OneShoulder,
    Keyhole,
    ChineseCollar,
    MandarinCollar,
}

impl NecklineType {
    /// Neckline drop below the garment top, in 400×600 reference pixels;
    /// see `Canvas::px_y`
    pub fn depth_px(&self) -> f64 {
        match self {
            NecklineType::Round => 25.0,
            NecklineType::Boat => 15.0,
            NecklineType::DeepRound => 40.0,
            NecklineType::Square => 30.0,
            NecklineType::Sweetheart => 35.0,
            NecklineType::Halter => 20.0,
            NecklineType::VNeck => 30.0,
            NecklineType::HighNeck => 10.0,
            _ => 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SleeveLength {
    Sleeveless,
    Cap,
    Short,
    Elbow,
    ThreeQuarter,
    Full,
}

impl SleeveLength {
    /// Sleeve drop in reference pixels; `None` means no sleeve is drawn
    pub fn length_px(&self) -> Option<f64> {
        match self {
            SleeveLength::Sleeveless => None,
            SleeveLength::Cap => Some(20.0),
            SleeveLength::Short => Some(60.0),
            SleeveLength::Elbow => Some(120.0),
            SleeveLength::ThreeQuarter => Some(180.0),
            SleeveLength::Full => Some(240.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleeveStyle {
    Regular,
    Bell,
    Flared,
    Fitted,
    Bishop,
    Puff,
    ColdShoulder,
    Cape,
    Butterfly,
    Trumpet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackDesign {
    Closed,
    Keyhole,
    DeepBack,
    CrissCross,
    TieUp,
    ButtonClosure,
    ZipClosure,
    Backless,
    CutOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TopLength {
    Crop,
    Waist,
    Hip,
    Knee,
    Midi,
    Maxi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStyle {
    Fitted,
    Regular,
    Loose,
    Oversized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureType {
    Buttons,
    Zip,
    Tie,
    Hook,
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomStyle {
    Straight,
    Palazzo,
    Sharara,
    Gharara,
    Churidar,
    Salwar,
    Dhoti,
    Leggings,
    Cigarette,
    Flared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomLength {
    Mini,
    Knee,
    Midi,
    Maxi,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaistStyle {
    High,
    Mid,
    Low,
    Empire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DupattaStyle {
    Net,
    Chiffon,
    Silk,
    Cotton,
    Georgette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrapingStyle {
    Gujarati,
    Bengali,
    Maharashtrian,
    SouthIndian,
    Butterfly,
    LehengaStyle,
    CapeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DupattaLength {
    Short,
    Medium,
    Long,
    ExtraLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    Plain,
    Embroidered,
    Lace,
    Sequined,
    Printed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SareeDrapingStyle {
    Nivi,
    Gujarati,
    Bengali,
    Maharashtrian,
    Kerala,
    Tamil,
    Butterfly,
    Lehenga,
    PantStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PleatingPattern {
    BoxPleats,
    KnifePleats,
    Accordion,
    FanPleats,
    InvertedPleats,
    SidePleats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalluStyle {
    Plain,
    HeavyWork,
    Printed,
    Contrast,
    Matching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbellishmentType {
    Embroidery,
    Sequins,
    Beads,
    MirrorWork,
    Zardozi,
    ThreadWork,
}

/// Where an embellishment sits on the garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Neckline,
    Sleeves,
    Hem,
    Yoke,
    AllOver,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Minimal,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbellishmentPattern {
    #[serde(rename = "type")]
    pub kind: EmbellishmentType,
    pub placement: Placement,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDesign {
    pub neckline: NecklineType,
    pub sleeve_length: SleeveLength,
    pub sleeve_style: SleeveStyle,
    pub back_design: BackDesign,
    pub length: TopLength,
    pub fit: FitStyle,
    pub closure: ClosureType,
}

impl Default for TopDesign {
    fn default() -> Self {
        Self {
            neckline: NecklineType::Round,
            sleeve_length: SleeveLength::Short,
            sleeve_style: SleeveStyle::Regular,
            back_design: BackDesign::Closed,
            length: TopLength::Hip,
            fit: FitStyle::Regular,
            closure: ClosureType::Buttons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomDesign {
    pub style: BottomStyle,
    pub length: BottomLength,
    pub fit: FitStyle,
    pub waist_style: WaistStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DupattaDesign {
    pub style: DupattaStyle,
    pub draping: DrapingStyle,
    pub border: BorderStyle,
    pub length: DupattaLength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SareeDesign {
    pub draping_style: SareeDrapingStyle,
    pub pleating_pattern: PleatingPattern,
    pub pallu_style: PalluStyle,
    pub border_design: BorderStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub undertone_match: bool,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            secondary_color: None,
            accent_color: None,
            undertone_match: false,
        }
    }
}

/// A complete outfit: category, per-region sub-designs, colours, embellishments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitDesign {
    pub outfit_type: OutfitType,
    pub top_design: TopDesign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_design: Option<BottomDesign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dupatta_design: Option<DupattaDesign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saree_design: Option<SareeDesign>,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub embellishments: Vec<EmbellishmentPattern>,
}

impl OutfitDesign {
    /// Bare outfit of the given category with a default top
    pub fn new(outfit_type: OutfitType) -> Self {
        Self {
            outfit_type,
            top_design: TopDesign::default(),
            bottom_design: None,
            dupatta_design: None,
            saree_design: None,
            color_scheme: ColorScheme::default(),
            embellishments: Vec::new(),
        }
    }

    /// Border style the design state tracks: dupatta border, else saree border
    pub fn border(&self) -> BorderStyle {
        self.dupatta_design
            .as_ref()
            .map(|d| d.border)
            .or_else(|| self.saree_design.as_ref().map(|s| s.border_design))
            .unwrap_or(BorderStyle::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neckline_depth_table() {
        assert_eq!(NecklineType::Round.depth_px(), 25.0);
        assert_eq!(NecklineType::Boat.depth_px(), 15.0);
        assert_eq!(NecklineType::DeepRound.depth_px(), 40.0);
        assert_eq!(NecklineType::HighNeck.depth_px(), 10.0);
        // not in the table, falls back to the default
        assert_eq!(NecklineType::Keyhole.depth_px(), 25.0);
    }

    #[test]
    fn test_sleeveless_has_no_length() {
        assert_eq!(SleeveLength::Sleeveless.length_px(), None);
        assert_eq!(SleeveLength::ThreeQuarter.length_px(), Some(180.0));
    }

    #[test]
    fn test_outfit_json_uses_snake_case() {
        let json = r#"{
            "outfit_type": "lehenga_choli",
            "top_design": {
                "neckline": "v_neck", "sleeve_length": "three_quarter",
                "sleeve_style": "cold_shoulder", "back_design": "tie_up",
                "length": "crop", "fit": "fitted", "closure": "hook"
            },
            "embellishments": [
                {"type": "mirror_work", "placement": "hem", "intensity": "heavy"}
            ]
        }"#;
        let outfit: OutfitDesign = serde_json::from_str(json).unwrap();
        assert_eq!(outfit.outfit_type, OutfitType::LehengaCholi);
        assert_eq!(outfit.top_design.neckline, NecklineType::VNeck);
        assert_eq!(outfit.embellishments[0].kind, EmbellishmentType::MirrorWork);
        assert_eq!(outfit.border(), BorderStyle::Plain);
    }

    #[test]
    fn test_unknown_neckline_is_rejected() {
        let err = serde_json::from_str::<NecklineType>(r#""plunging""#);
        assert!(err.is_err());
    }
}
