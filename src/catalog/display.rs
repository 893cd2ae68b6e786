//! Card view-models built from records for the list renderer.

use std::fmt::Write;

use chrono::{DateTime, Local};

use super::model::Record;
use super::numeric::parse_float_prefix;
use super::stats::format_currency;

/// Everything the renderer needs to draw one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCard {
    pub id: String,
    pub title: String,
    pub byline: String,
    /// `(label, value)` pairs for the fields that are present.
    pub details: Vec<(&'static str, String)>,
    pub notes: Option<String>,
}

impl RecordCard {
    pub fn from_record(record: &Record, currency_symbol: &str, date_format: &str) -> Self {
        let mut details: Vec<(&'static str, String)> = Vec::new();

        let optional = [
            ("Year", &record.year),
            ("Genre", &record.genre),
            ("Condition", &record.condition),
        ];
        for (label, value) in optional {
            if !value.is_empty() {
                details.push((label, value.clone()));
            }
        }
        if let Some(price) = format_price(&record.price, currency_symbol) {
            details.push(("Price", price));
        }
        details.push(("Added", format_added(&record.date_added, date_format)));

        Self {
            id: record.id.clone(),
            title: record.album.clone(),
            byline: format!("by {}", record.artist),
            details,
            notes: (!record.notes.is_empty()).then(|| format!("\"{}\"", record.notes)),
        }
    }
}

/// Format a price for display. Empty prices are omitted; text that doesn't
/// start with a number is shown as entered.
pub fn format_price(price: &str, currency_symbol: &str) -> Option<String> {
    if price.is_empty() {
        return None;
    }
    match parse_float_prefix(price) {
        Some(v) => Some(format_currency(v, currency_symbol)),
        None => Some(price.to_string()),
    }
}

/// Format an RFC 3339 timestamp as a local date using a strftime-style pattern.
///
/// Falls back to the raw text when it doesn't parse or the pattern is invalid.
pub fn format_added(date_added: &str, date_format: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(date_added) else {
        return date_added.to_string();
    };
    let local = parsed.with_timezone(&Local);

    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_err() {
        return date_added.to_string();
    }
    out
}
