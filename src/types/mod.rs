//! Core types for Twinfit

mod ratios;
mod coords;
mod outfit;
mod path;
mod layers;
mod design_state;
mod change;
mod body;

pub use ratios::{BodyRatios, BodyShape};
pub use coords::{AnchorBox, DigitalTwinCoords, Adjustments};
pub use outfit::{
    OutfitType, OutfitDesign, TopDesign, BottomDesign, DupattaDesign, SareeDesign, ColorScheme,
    NecklineType, SleeveLength, SleeveStyle, BackDesign, TopLength, FitStyle, ClosureType,
    BottomStyle, BottomLength, WaistStyle, DupattaStyle, DrapingStyle, DupattaLength, BorderStyle,
    SareeDrapingStyle, PleatingPattern, PalluStyle, EmbellishmentPattern, EmbellishmentType,
    Placement, Intensity,
};
pub use path::{Point, PathSegment, PathData, PathParseError};
pub use layers::{LayerKind, LineStyle, ConstructionLayer, ConstructionLayers};
pub use design_state::{DesignState, BodyProportions, ParameterName, ParameterUpdate};
pub use change::{ChangeRecord, UpdateResult};
pub use body::{
    PersistentBodyState, BodyPose, Stance, ArmPosition, LightingState, LightDirection,
    ColorTemperature, ProportionUpdate,
};
