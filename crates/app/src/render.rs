use rust_decimal::Decimal;

use divvi_core::Receipt;
use divvi_ocr::Line;

/// Render the detected lines and the parsed receipt: the raw line dump,
/// then an aligned item table with discount rows and the computed net
/// subtotal.
pub fn receipt_table(lines: &[Line], receipt: &Receipt) -> String {
    let mut out = String::new();

    out.push_str("Detected Text Lines:\n");
    for line in lines {
        out.push_str(&line.text);
        out.push('\n');
    }

    out.push_str("\nParsed Items and Prices:\n");
    for item in &receipt.items {
        out.push_str(&row(&item.name, &money(item.price)));
        if item.discount > Decimal::ZERO {
            out.push_str(&row("    Discount", &format!("-{}", money(item.discount))));
        }
    }
    out.push_str(&row("SubTotal", &money(receipt.net_total())));

    out
}

/// Render the opt-in subtotal check.
pub fn check_report(receipt: &Receipt) -> String {
    match receipt.reconcile() {
        None => "Subtotal check: no subtotal field detected\n".to_string(),
        Some(report) if report.matches() => {
            format!("Subtotal check: OK ({})\n", money(report.printed_subtotal))
        }
        Some(report) => format!(
            "Subtotal check: printed {} but items sum to {} (difference {})\n",
            money(report.printed_subtotal),
            money(report.computed_total),
            money(report.discrepancy()),
        ),
    }
}

fn row(label: &str, amount: &str) -> String {
    format!("{label:<30} {amount:>8}\n")
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use divvi_core::{BoundingBox, Geometry};
    use divvi_ocr::parse_receipt;

    fn line(text: &str) -> Line {
        Line {
            text: text.to_string(),
            geometry: Geometry {
                bounding_box: BoundingBox { width: 0.5, height: 0.02, left: 0.1, top: 0.3 },
                polygon: vec![],
            },
            confidence: 98.0,
        }
    }

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts.iter().map(|t| line(t)).collect()
    }

    #[test]
    fn table_lists_items_discounts_and_subtotal() {
        let lines = lines(&["100 MILK", "3.99", "123 / 100", "-1.00"]);
        let receipt = parse_receipt(&lines);
        let table = receipt_table(&lines, &receipt);

        assert!(table.contains("Detected Text Lines:\n100 MILK\n3.99\n"));
        assert!(table.contains(&format!("{:<30} {:>8}\n", "MILK", "3.99")));
        assert!(table.contains(&format!("{:<30} {:>8}\n", "    Discount", "-1.00")));
        assert!(table.contains(&format!("{:<30} {:>8}\n", "SubTotal", "2.99")));
    }

    #[test]
    fn table_omits_discount_row_for_undiscounted_items() {
        let lines = lines(&["100 MILK", "3.99"]);
        let receipt = parse_receipt(&lines);
        assert!(!receipt_table(&lines, &receipt).contains("Discount"));
    }

    #[test]
    fn empty_receipt_renders_zero_subtotal() {
        let receipt = parse_receipt(&[]);
        let table = receipt_table(&[], &receipt);
        assert!(table.contains(&format!("{:<30} {:>8}\n", "SubTotal", "0.00")));
    }

    #[test]
    fn check_report_flags_discrepancy() {
        let lines = lines(&["100 MILK", "3.99", "SUBTOTAL", "5.00"]);
        let receipt = parse_receipt(&lines);
        let report = check_report(&receipt);
        assert!(report.contains("printed 5.00"));
        assert!(report.contains("items sum to 3.99"));
        assert!(report.contains("difference 1.01"));
    }

    #[test]
    fn check_report_passes_when_totals_agree() {
        let lines = lines(&["100 MILK", "3.99", "SUBTOTAL", "3.99"]);
        let receipt = parse_receipt(&lines);
        assert_eq!(check_report(&receipt), "Subtotal check: OK (3.99)\n");
    }

    #[test]
    fn check_report_without_subtotal_field() {
        let receipt = parse_receipt(&[]);
        assert_eq!(check_report(&receipt), "Subtotal check: no subtotal field detected\n");
    }
}
