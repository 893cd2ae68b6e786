//! Record and form types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog entry.
///
/// Optional fields are stored as empty strings rather than being omitted, which
/// keeps the persisted JSON shape flat: every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub notes: String,
    /// RFC 3339 timestamp of when the record was added.
    #[serde(default)]
    pub date_added: String,
}

impl Record {
    /// Build a fresh record from `form` with a newly generated id.
    pub fn new(form: RecordForm, date_added: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            artist: form.artist,
            album: form.album,
            year: form.year,
            genre: form.genre,
            condition: form.condition,
            price: form.price,
            notes: form.notes,
            date_added,
        }
    }

    /// Overwrite every editable field with the values from `form`.
    pub fn apply(&mut self, form: RecordForm) {
        self.artist = form.artist;
        self.album = form.album;
        self.year = form.year;
        self.genre = form.genre;
        self.condition = form.condition;
        self.price = form.price;
        self.notes = form.notes;
    }
}

/// Current instant formatted the way `date_added` is stored.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The editable fields of a record, in form order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Artist,
    Album,
    Year,
    Genre,
    Condition,
    Price,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Artist,
        FormField::Album,
        FormField::Year,
        FormField::Genre,
        FormField::Condition,
        FormField::Price,
        FormField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Artist => "Artist",
            FormField::Album => "Album",
            FormField::Year => "Year",
            FormField::Genre => "Genre",
            FormField::Condition => "Condition",
            FormField::Price => "Price",
            FormField::Notes => "Notes",
        }
    }

    /// Next field in form order, wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous field in form order, wrapping around.
    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Contents of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub condition: String,
    pub price: String,
    pub notes: String,
}

impl RecordForm {
    pub fn from_record(record: &Record) -> Self {
        Self {
            artist: record.artist.clone(),
            album: record.album.clone(),
            year: record.year.clone(),
            genre: record.genre.clone(),
            condition: record.condition.clone(),
            price: record.price.clone(),
            notes: record.notes.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Artist => &self.artist,
            FormField::Album => &self.album,
            FormField::Year => &self.year,
            FormField::Genre => &self.genre,
            FormField::Condition => &self.condition,
            FormField::Price => &self.price,
            FormField::Notes => &self.notes,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Artist => &mut self.artist,
            FormField::Album => &mut self.album,
            FormField::Year => &mut self.year,
            FormField::Genre => &mut self.genre,
            FormField::Condition => &mut self.condition,
            FormField::Price => &mut self.price,
            FormField::Notes => &mut self.notes,
        }
    }

    /// Return the first required field (artist, album) that is blank.
    pub fn missing_required(&self) -> Option<FormField> {
        [FormField::Artist, FormField::Album]
            .into_iter()
            .find(|f| self.get(*f).trim().is_empty())
    }
}
