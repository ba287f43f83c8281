use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchased line item parsed from a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The store's item number as printed. Not unique — the same article can
    /// ring up more than once on a single receipt.
    pub item_number: String,
    /// Zero-padded sequential index assigned after the parse completes.
    /// Purely a function of emission order, never of `item_number`.
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
    /// Sum of all discount lines associated with this item. Starts at zero
    /// and only ever grows.
    pub discount: Decimal,
    /// Trailing tax-code token from the price line (e.g. `A`), if any.
    pub tax_code: Option<String>,
}

impl Item {
    /// What the item actually cost after discounts.
    pub fn net_price(&self) -> Decimal {
        self.price - self.discount
    }
}
