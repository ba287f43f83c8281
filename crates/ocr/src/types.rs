use divvi_core::{BoundingBox, Geometry, Point};
use serde::{Deserialize, Serialize};

/// One OCR-detected text line.
///
/// Immutable once extracted; the vector order is exactly the engine's
/// emission order and both parser passes depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    pub geometry: Geometry,
    /// Engine confidence for this line, 0–100.
    pub confidence: f32,
}

// ── Wire types ────────────────────────────────────────────────────────────────
//
// Shape of the engine's text-detection JSON response. Field names follow the
// engine's PascalCase casing; anything we don't consume is ignored.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextDetection {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A detected block. Only `BlockType == "LINE"` entries carry through to the
/// parser; PAGE and WORD blocks are skipped. Text, confidence, and geometry
/// are optional on the wire because non-LINE block types omit them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    #[serde(default)]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawGeometry {
    pub bounding_box: RawBoundingBox,
    #[serde(default)]
    pub polygon: Vec<RawPoint>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBoundingBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPoint {
    pub x: f32,
    pub y: f32,
}

impl From<RawGeometry> for Geometry {
    fn from(raw: RawGeometry) -> Self {
        Geometry {
            bounding_box: BoundingBox {
                width: raw.bounding_box.width,
                height: raw.bounding_box.height,
                left: raw.bounding_box.left,
                top: raw.bounding_box.top,
            },
            polygon: raw.polygon.into_iter().map(|p| Point { x: p.x, y: p.y }).collect(),
        }
    }
}
