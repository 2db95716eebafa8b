//! Construction layers drawn over the garment overlay

use serde::{Deserialize, Serialize};

use crate::types::PathData;

/// Construction layer kinds, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Seams,
    PanelDivision,
    Darts,
    Borders,
    EmbroideryZones,
    CutOutline,
}

impl LayerKind {
    pub const ORDER: [LayerKind; 6] = [
        LayerKind::Seams,
        LayerKind::PanelDivision,
        LayerKind::Darts,
        LayerKind::Borders,
        LayerKind::EmbroideryZones,
        LayerKind::CutOutline,
    ];

    /// Renderer-agnostic stroke hint
    pub fn line_style(&self) -> LineStyle {
        match self {
            LayerKind::Seams => LineStyle::Dashed,
            LayerKind::PanelDivision => LineStyle::Dotted,
            LayerKind::Darts => LineStyle::Thin,
            LayerKind::Borders => LineStyle::Heavy,
            LayerKind::EmbroideryZones => LineStyle::Dotted,
            LayerKind::CutOutline => LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Thin,
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionLayer {
    pub kind: LayerKind,
    pub style: LineStyle,
    pub path: PathData,
}

/// All construction layers of one render, in drawing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionLayers {
    pub layers: Vec<ConstructionLayer>,
}

impl ConstructionLayers {
    pub fn push(&mut self, kind: LayerKind, path: PathData) {
        self.layers.push(ConstructionLayer {
            kind,
            style: kind.line_style(),
            path,
        });
    }

    pub fn get(&self, kind: LayerKind) -> Option<&ConstructionLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }
}
