use thiserror::Error;

use crate::types::{Line, TextDetection};

/// Raised only when the input violates the line-sequence contract. Ordinary
/// "nothing matched" outcomes during parsing are normal control flow and
/// never surface here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("OCR response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("LINE block at index {index} is missing required attribute `{attribute}`")]
    MissingAttribute { index: usize, attribute: &'static str },
}

/// Deserialize a saved text-detection response.
pub fn parse_response(json: &str) -> Result<TextDetection, ExtractError> {
    Ok(serde_json::from_str(json)?)
}

/// Reshape a text-detection response into the ordered line sequence both
/// parser passes consume.
///
/// Keeps `LINE` blocks only, in the engine's emission order. A LINE block
/// without text, confidence, or geometry is a contract violation, not noise.
pub fn extract_lines(response: &TextDetection) -> Result<Vec<Line>, ExtractError> {
    let mut lines = Vec::new();
    for (index, block) in response.blocks.iter().enumerate() {
        if block.block_type != "LINE" {
            continue;
        }
        let text = block
            .text
            .clone()
            .ok_or(ExtractError::MissingAttribute { index, attribute: "Text" })?;
        let confidence = block
            .confidence
            .ok_or(ExtractError::MissingAttribute { index, attribute: "Confidence" })?;
        let geometry = block
            .geometry
            .clone()
            .ok_or(ExtractError::MissingAttribute { index, attribute: "Geometry" })?
            .into();
        lines.push(Line { text, geometry, confidence });
    }
    Ok(lines)
}
