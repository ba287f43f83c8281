use std::collections::BTreeMap;
use std::sync::OnceLock;

use divvi_core::{FieldName, SpecialField};
use regex::Regex;

use crate::types::Line;

// Unsigned amount with exactly two decimals — the only shape a summary value
// line may take.
fn re_field_value() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^\d+\.\d{2}$").expect("invalid regex"))
}

/// Detect the subtotal/tax/total label/value pairs in an ordered line
/// sequence.
///
/// A single forward pass, independent of the item parser — both read the
/// same sequence from the start. A label line commits only when the line
/// directly below it is an unsigned two-decimal amount; there is no retry
/// against later lines. When the same field is committed twice, the later
/// detection wins — a deliberate policy, not an accident of map insertion
/// order.
pub fn detect_special_fields(lines: &[Line]) -> BTreeMap<FieldName, SpecialField> {
    let mut fields = BTreeMap::new();

    for window in lines.windows(2) {
        let (label_line, value_line) = (&window[0], &window[1]);

        let Some(field_name) = classify_label(&label_line.text) else {
            continue;
        };
        if !re_field_value().is_match(value_line.text.trim()) {
            continue;
        }

        fields.insert(
            field_name,
            SpecialField {
                field_name,
                label_text: label_line.text.clone(),
                label_geometry: label_line.geometry.clone(),
                value_text: value_line.text.clone(),
                value_geometry: value_line.geometry.clone(),
                confidence: label_line.confidence.min(value_line.confidence),
            },
        );
    }

    fields
}

/// First match wins, in this fixed order. Rule 2 demands an exact or prefix
/// match so a SUBTOTAL line cannot double as a total, and rule 3 comes after
/// rule 2 so a line carrying both TOTAL and TAX is always a total.
fn classify_label(text: &str) -> Option<FieldName> {
    let normalized = text.trim().to_uppercase();
    if normalized.contains("SUBTOTAL") {
        Some(FieldName::Subtotal)
    } else if normalized == "TOTAL" || normalized.starts_with("TOTAL ") {
        Some(FieldName::Total)
    } else if normalized.contains("TAX") && !normalized.contains("TOTAL") {
        Some(FieldName::Tax)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use divvi_core::{BoundingBox, Geometry};

    fn line_at(text: &str, confidence: f32, top: f32) -> Line {
        Line {
            text: text.to_string(),
            geometry: Geometry {
                bounding_box: BoundingBox { width: 0.3, height: 0.02, left: 0.1, top },
                polygon: vec![],
            },
            confidence,
        }
    }

    fn detect(texts: &[&str]) -> BTreeMap<FieldName, SpecialField> {
        let lines: Vec<Line> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| line_at(t, 99.0, i as f32 * 0.05))
            .collect();
        detect_special_fields(&lines)
    }

    #[test]
    fn subtotal_commits_with_min_confidence_and_both_geometries() {
        let lines = vec![line_at("SUBTOTAL", 90.0, 0.70), line_at("12.50", 95.0, 0.75)];
        let fields = detect_special_fields(&lines);

        let field = &fields[&FieldName::Subtotal];
        assert_eq!(field.label_text, "SUBTOTAL");
        assert_eq!(field.value_text, "12.50");
        assert_eq!(field.confidence, 90.0);
        assert_eq!(field.label_geometry, lines[0].geometry);
        assert_eq!(field.value_geometry, lines[1].geometry);
    }

    #[test]
    fn detects_all_three_fields() {
        let fields = detect(&[
            "SUBTOTAL", "45.00",
            "TAX", "3.60",
            "TOTAL", "48.60",
        ]);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[&FieldName::Subtotal].value_text, "45.00");
        assert_eq!(fields[&FieldName::Tax].value_text, "3.60");
        assert_eq!(fields[&FieldName::Total].value_text, "48.60");
    }

    #[test]
    fn total_tax_line_is_total_never_tax() {
        let fields = detect(&["TOTAL TAX", "5.00"]);
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key(&FieldName::Total));
        assert!(!fields.contains_key(&FieldName::Tax));
    }

    #[test]
    fn subtotal_line_never_matches_as_total() {
        let fields = detect(&["SUBTOTAL", "45.00"]);
        assert!(!fields.contains_key(&FieldName::Total));
    }

    #[test]
    fn total_requires_exact_or_prefix_match() {
        // "GRAND TOTAL" contains but does not begin with TOTAL.
        let fields = detect(&["GRAND TOTAL", "48.60"]);
        assert!(fields.is_empty());
    }

    #[test]
    fn label_without_amount_below_is_not_recorded() {
        let fields = detect(&["SUBTOTAL", "see below", "45.00"]);
        assert!(fields.is_empty(), "no retry against further lines");
    }

    #[test]
    fn signed_or_sloppy_values_do_not_commit() {
        assert!(detect(&["TAX", "-3.60"]).is_empty());
        assert!(detect(&["TAX", "3.6"]).is_empty());
        assert!(detect(&["TAX", "$3.60"]).is_empty());
    }

    #[test]
    fn value_line_whitespace_is_tolerated() {
        let fields = detect(&["TAX", "  3.60  "]);
        assert_eq!(fields[&FieldName::Tax].value_text.trim(), "3.60");
    }

    #[test]
    fn label_is_normalized_before_classification() {
        let fields = detect(&["  subtotal  ", "12.50"]);
        assert!(fields.contains_key(&FieldName::Subtotal));
        // The recorded label keeps the original text.
        assert_eq!(fields[&FieldName::Subtotal].label_text, "  subtotal  ");
    }

    #[test]
    fn later_detection_overwrites_earlier() {
        let fields = detect(&["TOTAL", "10.00", "TOTAL", "48.60"]);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[&FieldName::Total].value_text, "48.60");
    }

    #[test]
    fn trailing_label_line_cannot_commit() {
        let fields = detect(&["45.00", "SUBTOTAL"]);
        assert!(fields.is_empty());
    }

    #[test]
    fn empty_input_yields_no_fields() {
        assert!(detect(&[]).is_empty());
    }
}
