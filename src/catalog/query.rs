//! Search filtering and sorting of records.

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;

use super::model::Record;
use super::numeric::{parse_float_prefix, parse_int_prefix};

/// Fields the list can be sorted by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortField {
    Artist,
    Album,
    Year,
    Price,
    Genre,
    DateAdded,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::Year => "year",
            SortField::Price => "price",
            SortField::Genre => "genre",
            SortField::DateAdded => "dateAdded",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(SortField::Artist),
            "album" => Some(SortField::Album),
            "year" => Some(SortField::Year),
            "price" => Some(SortField::Price),
            "genre" => Some(SortField::Genre),
            "dateAdded" => Some(SortField::DateAdded),
            _ => None,
        }
    }

    /// Natural ascending order of two records on this field.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortField::Artist => compare_text(&a.artist, &b.artist),
            SortField::Album => compare_text(&a.album, &b.album),
            SortField::Genre => compare_text(&a.genre, &b.genre),
            SortField::Year => year_value(a).cmp(&year_value(b)),
            SortField::Price => price_value(a)
                .partial_cmp(&price_value(b))
                .unwrap_or(Ordering::Equal),
            SortField::DateAdded => added_millis(a).cmp(&added_millis(b)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A sort choice: field plus direction.
///
/// `field` is `None` when the key named a field we don't know; such a key
/// leaves the order untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

const fn key(field: SortField, direction: SortDirection) -> SortKey {
    SortKey {
        field: Some(field),
        direction,
    }
}

impl SortKey {
    /// Every choice offered by the sort selector, in selector order.
    pub const OPTIONS: [SortKey; 12] = [
        key(SortField::DateAdded, SortDirection::Desc),
        key(SortField::DateAdded, SortDirection::Asc),
        key(SortField::Artist, SortDirection::Asc),
        key(SortField::Artist, SortDirection::Desc),
        key(SortField::Album, SortDirection::Asc),
        key(SortField::Album, SortDirection::Desc),
        key(SortField::Year, SortDirection::Desc),
        key(SortField::Year, SortDirection::Asc),
        key(SortField::Price, SortDirection::Desc),
        key(SortField::Price, SortDirection::Asc),
        key(SortField::Genre, SortDirection::Asc),
        key(SortField::Genre, SortDirection::Desc),
    ];

    /// Parse the `"<field>-<direction>"` form, e.g. `year-asc`.
    ///
    /// Anything other than `desc` as direction sorts ascending; an unknown
    /// field yields a key with `field == None`. Segments after the direction
    /// are ignored.
    pub fn parse(s: &str) -> Self {
        let mut parts = s.trim().split('-');
        let field = parts.next().and_then(SortField::parse);
        let direction = match parts.next() {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { field, direction }
    }

    pub fn is_known(&self) -> bool {
        self.field.is_some()
    }

    /// Compare two records under this key.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let Some(field) = self.field else {
            return Ordering::Equal;
        };
        let ord = field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Following selector option, wrapping around.
    pub fn next(self) -> Self {
        match Self::OPTIONS.iter().position(|k| *k == self) {
            Some(p) => Self::OPTIONS[(p + 1) % Self::OPTIONS.len()],
            None => Self::OPTIONS[0],
        }
    }

    /// Preceding selector option, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::OPTIONS.len();
        match Self::OPTIONS.iter().position(|k| *k == self) {
            Some(p) => Self::OPTIONS[(p + len - 1) % len],
            None => Self::OPTIONS[len - 1],
        }
    }

    /// Human-friendly name shown in the status box.
    pub fn label(&self) -> &'static str {
        use SortDirection::*;
        use SortField::*;
        match (self.field, self.direction) {
            (Some(DateAdded), Desc) => "Date added (newest first)",
            (Some(DateAdded), Asc) => "Date added (oldest first)",
            (Some(Artist), Asc) => "Artist (A-Z)",
            (Some(Artist), Desc) => "Artist (Z-A)",
            (Some(Album), Asc) => "Album (A-Z)",
            (Some(Album), Desc) => "Album (Z-A)",
            (Some(Year), Desc) => "Year (newest first)",
            (Some(Year), Asc) => "Year (oldest first)",
            (Some(Price), Desc) => "Price (high to low)",
            (Some(Price), Asc) => "Price (low to high)",
            (Some(Genre), Asc) => "Genre (A-Z)",
            (Some(Genre), Desc) => "Genre (Z-A)",
            (None, _) => "Unsorted",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        key(SortField::DateAdded, SortDirection::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.map(SortField::as_str).unwrap_or("none");
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{field}-{direction}")
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn year_value(r: &Record) -> i64 {
    parse_int_prefix(&r.year).unwrap_or(0)
}

fn price_value(r: &Record) -> f64 {
    parse_float_prefix(&r.price).unwrap_or(0.0)
}

/// Unparsable timestamps sort as the epoch.
fn added_millis(r: &Record) -> i64 {
    DateTime::parse_from_rfc3339(&r.date_added)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

/// Case-insensitive substring match over the searchable fields.
///
/// `query_lower` must already be lowercased.
pub fn matches_query(record: &Record, query_lower: &str) -> bool {
    [
        &record.artist,
        &record.album,
        &record.genre,
        &record.year,
        &record.notes,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query_lower))
}

/// Derive the visible list: filter by `query`, then stable-sort by `sort`.
///
/// A blank (whitespace-only) query disables filtering. A non-blank query is
/// matched as typed, surrounding whitespace included.
pub fn filter_and_sort(records: &[Record], query: &str, sort: SortKey) -> Vec<Record> {
    let mut visible: Vec<Record> = if query.trim().is_empty() {
        records.to_vec()
    } else {
        let query_lower = query.to_lowercase();
        records
            .iter()
            .filter(|r| matches_query(r, &query_lower))
            .cloned()
            .collect()
    };

    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
