pub mod fields;
pub mod items;
pub mod lines;
pub mod parse;
pub mod types;

pub use fields::detect_special_fields;
pub use items::parse_items;
pub use lines::{extract_lines, parse_response, ExtractError};
pub use parse::{interpret_response, parse_receipt};
pub use types::{Block, Line, TextDetection};
