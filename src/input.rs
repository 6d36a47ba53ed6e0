// Parsers for the values typed at the console. Each returns None for input
// that should trigger a re-prompt.

use crate::types::Drink;

/// Oldest age accepted at the age prompt.
pub const MAX_AGE: u32 = 122;

/// A finite number, surrounding whitespace ignored.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// An index into a menu of `len` entries.
pub fn parse_menu_index(raw: &str, len: usize) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|i| *i < len)
}

pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age <= MAX_AGE)
}

/// A non-negative amount of money.
pub fn parse_balance(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|b| *b >= 0.0)
}

/// Render the drinks menu as a fixed-width table.
pub fn render_drink_table(drinks: &[Drink]) -> String {
    let name_width = drinks
        .iter()
        .map(|d| d.name.chars().count())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(4);

    let mut table = format!(
        "{:>5} │ {:<name_width$} │ {:>8} │ {}\n",
        "index", "name", "cost", "alcoholic"
    );
    table.push_str(&format!(
        "{}┼{}┼{}┼{}\n",
        "─".repeat(6),
        "─".repeat(name_width + 2),
        "─".repeat(10),
        "─".repeat(11)
    ));
    for (index, drink) in drinks.iter().enumerate() {
        table.push_str(&format!(
            "{:>5} │ {:<name_width$} │ {:>8} │ {}\n",
            index,
            drink.name,
            format!("£{:.2}", drink.cost),
            if drink.alcoholic { "yes" } else { "no" }
        ));
    }
    table
}
