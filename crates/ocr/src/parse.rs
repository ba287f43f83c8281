use divvi_core::Receipt;

use crate::fields;
use crate::items;
use crate::lines::{self, ExtractError};
use crate::types::{Line, TextDetection};

/// Run both passes over the same line sequence and bundle the outputs.
///
/// Pure and total: O(n) over the input, no validation between the two
/// halves, empty input yields an empty receipt.
pub fn parse_receipt(lines: &[Line]) -> Receipt {
    Receipt {
        items: items::parse_items(lines),
        special_fields: fields::detect_special_fields(lines),
    }
}

/// Convenience for callers holding a raw engine response:
/// extract the line sequence, then parse it.
pub fn interpret_response(response: &TextDetection) -> Result<Receipt, ExtractError> {
    let lines = lines::extract_lines(response)?;
    Ok(parse_receipt(&lines))
}
