//! Shopping-list aggregation over the recipes in a user's cart.

use std::collections::BTreeMap;

use crate::domain::types::CartLine;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Sum amounts per (name, unit), sorted by name then unit.
///
/// Totals are widened to `i64` so many large per-recipe amounts cannot overflow.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.name, line.measurement_unit))
            .or_default() += i64::from(line.amount);
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
            name,
            measurement_unit,
            total_amount,
        })
        .collect()
}

/// Plain-text download body: a header followed by `name (unit) - amount` lines.
pub fn render_text(items: &[ShoppingListItem]) -> String {
    let mut out = String::from("Shopping list:\n\n");
    for item in items {
        out.push_str(&format!(
            "{} ({}) - {}\n",
            item.name, item.measurement_unit, item.total_amount
        ));
    }
    out
}
