use std::str::FromStr;
use std::sync::OnceLock;

use divvi_core::Item;
use regex::Regex;
use rust_decimal::Decimal;

use crate::types::Line;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Item line: optional leading marker token, item number, name remainder.
re!(re_item_line, r"^(?:E\s+)?(\d+)\s+(.+)$");
// Item price line: signed two-decimal amount, optional trailing tax code.
re!(re_item_price, r"^(-?\d+\.\d{2})(?:\s+(\w+))?$");
// Discount marker line: optional marker token, integer, slash, referenced
// item number.
re!(re_discount_marker, r"^(?:E\s+)?\d+\s+/\s*(\d+)$");
// Discount amount line: signed two-decimal amount, optional trailing
// dash/alnum suffix.
re!(re_discount_amount, r"^(-?\d+\.\d{2})-?\w*$");

// ── Forward pass ─────────────────────────────────────────────────────────────

/// Parse purchased items out of an ordered line sequence.
///
/// Slides a two-line window over the input. A window is either an item (name
/// line followed by a price line), a discount (marker line followed by an
/// amount line, applied retroactively to the most recent item with the
/// referenced number), or noise — in which case the cursor moves on by one
/// line. A final unpaired line never starts a window.
pub fn parse_items(lines: &[Line]) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        let first = lines[i].text.trim();
        let second = lines[i + 1].text.trim();

        // A "N / M" marker line also fits the item shape, so the discount
        // rule owns it outright — the two rules stay mutually exclusive.
        if let Some(referenced) = match_discount_marker(first) {
            if let Some(amount) = match_discount_amount(second) {
                apply_discount(&mut items, referenced, amount);
                i += 2;
                continue;
            }
        } else if let Some((item_number, name)) = match_item_line(first) {
            if let Some((price, tax_code)) = match_item_price(second) {
                items.push(Item {
                    item_number: item_number.to_string(),
                    item_id: String::new(),
                    name: name.to_string(),
                    price,
                    discount: Decimal::ZERO,
                    tax_code,
                });
                i += 2;
                continue;
            }
        }

        i += 1;
    }

    // item_id reflects emission order alone, assigned once the pass is done.
    for (index, item) in items.iter_mut().enumerate() {
        item.item_id = format!("{index:03}");
    }

    items
}

fn match_item_line(line: &str) -> Option<(&str, &str)> {
    let caps = re_item_line().captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

fn match_item_price(line: &str) -> Option<(Decimal, Option<String>)> {
    let caps = re_item_price().captures(line)?;
    let price = Decimal::from_str(caps.get(1)?.as_str()).ok()?;
    let tax_code = caps.get(2).map(|m| m.as_str().to_string());
    Some((price, tax_code))
}

fn match_discount_marker(line: &str) -> Option<&str> {
    let caps = re_discount_marker().captures(line)?;
    Some(caps.get(1)?.as_str())
}

fn match_discount_amount(line: &str) -> Option<Decimal> {
    let caps = re_discount_amount().captures(line)?;
    Decimal::from_str(caps.get(1)?.as_str()).ok()
}

/// Add the discount to the most recently emitted item with the referenced
/// number. Discounts accumulate; the stored value only grows, whichever way
/// the amount was printed. An orphan reference is dropped without a trace —
/// receipts regularly carry coupon lines for items the window never matched.
fn apply_discount(items: &mut [Item], item_number: &str, amount: Decimal) {
    match items.iter_mut().rev().find(|item| item.item_number == item_number) {
        Some(item) => item.discount += amount.abs(),
        None => {
            tracing::debug!(item_number, "discount references no prior item; dropped");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
