use std::fmt::Write;

use rust_decimal::Decimal;

use crate::commands::Calculation;

const HEADERS: [&str; 6] = [
    "ID",
    "Name",
    "Conditions",
    "Adjustment type",
    "Adjustment value",
    "New price",
];

fn amount(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Plain-text report of a calculation, as printed by `tariff calculate`
pub fn render(calc: &Calculation) -> String {
    let mut out = String::new();
    let (product, venue, member) = (&calc.product, &calc.venue, &calc.member);

    // Writing to a String cannot fail
    let _ = writeln!(out, "Product {}: {}", product.id, product.name);
    let _ = writeln!(out, "Venue {}: {} ({})", venue.id, venue.name, venue.location);
    let _ = writeln!(
        out,
        "Member {}: {} ({} member, {} years old)",
        member.id,
        member.name,
        member.membership_type,
        member.age_at(calc.evaluated_at)
    );
    let _ = writeln!(out, "Original product price: {}", amount(calc.quote.base_price));

    let eligible = calc.quote.valid_modifiers();
    if eligible.is_empty() {
        let _ = writeln!(out, "No valid pricing modifiers for this product/venue/member combination.");
    } else {
        let _ = writeln!(out, "The conditions were met for the following pricing modifiers:");
        let rows: Vec<[String; 6]> = eligible
            .iter()
            .map(|e| {
                [
                    e.modifier.id.to_string(),
                    e.modifier.name.clone(),
                    e.modifier.conditions_json().to_string(),
                    e.modifier.adjustment.kind().to_string(),
                    e.modifier.adjustment.value().to_string(),
                    amount(e.price),
                ]
            })
            .collect();
        out.push_str(&table(&rows));
    }

    let _ = writeln!(out, "Best price: {}", amount(calc.quote.best_price));
    out
}

fn table(rows: &[[String; 6]]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    let _ = writeln!(out, "+{}+", separator);
    let _ = writeln!(out, "|{}|", line(&HEADERS, &widths));
    let _ = writeln!(out, "+{}+", separator);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(out, "|{}|", line(&cells, &widths));
    }
    let _ = writeln!(out, "+{}+", separator);
    out
}

fn line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_columns_to_widest_cell() {
        let rows = vec![[
            "1".to_string(),
            "Glasgow offer".to_string(),
            "{}".to_string(),
            "override".to_string(),
            "3".to_string(),
            "3.00".to_string(),
        ]];

        let rendered = table(&rows);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("| ID | Name          | Conditions |"));
        assert!(lines[3].starts_with("| 1  | Glasgow offer | {}         |"));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_amounts_have_two_decimals() {
        assert_eq!(amount(Decimal::new(8, 0)), "8.00");
        assert_eq!(amount(Decimal::new(6599, 2)), "65.99");
    }
}
