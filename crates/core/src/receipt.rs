use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::item::Item;

/// The summary fields a receipt footer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Subtotal,
    Tax,
    Total,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Subtotal => write!(f, "subtotal"),
            FieldName::Tax => write!(f, "tax"),
            FieldName::Total => write!(f, "total"),
        }
    }
}

impl FromStr for FieldName {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subtotal" => Ok(FieldName::Subtotal),
            "tax" => Ok(FieldName::Tax),
            "total" => Ok(FieldName::Total),
            other => Err(format!("Unknown special field: '{other}'")),
        }
    }
}

/// A detected label/value pair for one summary field, with the geometry of
/// both lines so the UI can highlight them on the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialField {
    pub field_name: FieldName,
    pub label_text: String,
    pub label_geometry: Geometry,
    pub value_text: String,
    pub value_geometry: Geometry,
    /// min of the label line's and value line's OCR confidence (0–100).
    pub confidence: f32,
}

/// The assembled output of one parse: items in emission order plus at most
/// one special field per name. No invariant ties the two halves together —
/// assembly deliberately performs no cross-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub items: Vec<Item>,
    /// Keyed by field name; a `BTreeMap` so repeated parses of the same
    /// input serialize byte-identically.
    pub special_fields: BTreeMap<FieldName, SpecialField>,
}

impl Receipt {
    /// Sum of `price - discount` over all items.
    pub fn net_total(&self) -> Decimal {
        self.items
            .iter()
            .map(Item::net_price)
            .fold(Decimal::ZERO, |a, b| a + b)
    }

    /// Compare the computed item total against the printed subtotal.
    ///
    /// Opt-in only: nothing on the default parse path calls this. Returns
    /// `None` when no subtotal field was detected or its value text does not
    /// parse as an amount.
    pub fn reconcile(&self) -> Option<ReconcileReport> {
        let field = self.special_fields.get(&FieldName::Subtotal)?;
        let printed = Decimal::from_str(field.value_text.trim()).ok()?;
        Some(ReconcileReport {
            printed_subtotal: printed,
            computed_total: self.net_total(),
        })
    }
}

/// Result of the opt-in subtotal check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub printed_subtotal: Decimal,
    pub computed_total: Decimal,
}

impl ReconcileReport {
    /// Printed subtotal minus computed item total.
    pub fn discrepancy(&self) -> Decimal {
        self.printed_subtotal - self.computed_total
    }

    pub fn matches(&self) -> bool {
        self.discrepancy().is_zero()
    }
}
