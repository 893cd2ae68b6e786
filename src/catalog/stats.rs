use super::model::Record;
use super::numeric::parse_float_prefix;

/// Aggregate figures shown in the summary area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub count: usize,
    /// Sum of all parseable prices; anything else counts as zero.
    pub total_spent: f64,
}

impl Stats {
    pub fn compute(records: &[Record]) -> Self {
        let total_spent = records
            .iter()
            .map(|r| parse_float_prefix(&r.price).unwrap_or(0.0))
            .fold(0.0, |acc, price| acc + price);
        Self {
            count: records.len(),
            total_spent,
        }
    }

    pub fn total_spent_text(&self, currency_symbol: &str) -> String {
        format_currency(self.total_spent, currency_symbol)
    }
}

/// Format an amount with two decimals, e.g. `$24.99`.
pub fn format_currency(amount: f64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{amount:.2}")
}
