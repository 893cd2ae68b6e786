//! Application model: `App`, the catalog manager.
//!
//! `App` owns the collection and its store. Every mutation writes the whole
//! collection back and re-derives the visible list and the stats, so the UI
//! only ever reads from `view()` and `stats()`.

use tracing::{debug, info};

use crate::catalog::{
    FormField, Record, RecordCard, RecordForm, SortKey, Stats, filter_and_sort, now_timestamp,
};
use crate::config::CatalogSettings;
use crate::error::CatalogError;
use crate::store::{KeyValueStore, load_collection, save_collection};

/// The main application model.
pub struct App<S: KeyValueStore> {
    store: S,
    storage_key: String,
    settings: CatalogSettings,

    records: Vec<Record>,
    view: Vec<Record>,
    stats: Stats,

    search_query: String,
    sort: SortKey,
    editing_id: Option<String>,
    form: Option<RecordForm>,

    /// Position of the cursor in `view`.
    pub selected: usize,
    pub search_mode: bool,
    pub form_focus: FormField,
    /// Id awaiting a yes/no delete confirmation.
    pub pending_delete: Option<String>,
    /// One-line message for the status box, cleared on the next key press.
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    /// Create an empty `App` over `store`. Call `initialize` to load records.
    pub fn new(store: S, storage_key: impl Into<String>, settings: CatalogSettings) -> Self {
        let sort = SortKey::parse(&settings.default_sort);
        Self {
            store,
            storage_key: storage_key.into(),
            settings,

            records: Vec::new(),
            view: Vec::new(),
            stats: Stats::default(),

            search_query: String::new(),
            sort,
            editing_id: None,
            form: None,

            selected: 0,
            search_mode: false,
            form_focus: FormField::Artist,
            pending_delete: None,
            status: None,
        }
    }

    /// Load the collection from the store and reset search and sort.
    pub fn initialize(&mut self) {
        self.records = load_collection(&self.store, &self.storage_key);
        self.sort = SortKey::parse(&self.settings.default_sort);
        self.search_query.clear();
        self.refresh();
        info!(count = self.records.len(), key = %self.storage_key, "catalog loaded");
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
    /// The filtered and sorted records, in display order.
    pub fn view(&self) -> &[Record] {
        &self.view
    }
    pub fn stats(&self) -> Stats {
        self.stats
    }
    pub fn sort(&self) -> SortKey {
        self.sort
    }
    pub fn search_query(&self) -> &str {
        &self.search_query
    }
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }
    pub fn form(&self) -> Option<&RecordForm> {
        self.form.as_ref()
    }
    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Total spent, formatted with the configured currency symbol.
    pub fn total_spent_text(&self) -> String {
        self.stats.total_spent_text(&self.settings.currency_symbol)
    }

    /// Card view-models for the visible records.
    pub fn cards(&self, date_format: &str) -> Vec<RecordCard> {
        self.view
            .iter()
            .map(|r| RecordCard::from_record(r, &self.settings.currency_symbol, date_format))
            .collect()
    }

    /// Open an empty form in add mode.
    pub fn start_add(&mut self) {
        self.editing_id = None;
        self.form = Some(RecordForm::default());
        self.form_focus = FormField::Artist;
    }

    /// Open the form pre-filled with the record `id`.
    pub fn start_edit(&mut self, id: &str) -> Result<(), CatalogError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        self.form = Some(RecordForm::from_record(record));
        self.editing_id = Some(record.id.clone());
        self.form_focus = FormField::Artist;
        Ok(())
    }

    /// Close the form without touching any record.
    pub fn cancel_edit(&mut self) {
        self.form = None;
        self.editing_id = None;
        self.form_focus = FormField::Artist;
    }

    /// Mutable access to the focused form field, if the form is open.
    pub fn focused_input_mut(&mut self) -> Option<&mut String> {
        let focus = self.form_focus;
        self.form.as_mut().map(|f| f.get_mut(focus))
    }

    /// Save the open form. Does nothing when no form is open.
    pub fn save_form(&mut self) -> Result<(), CatalogError> {
        match self.form.clone() {
            Some(form) => self.save(form),
            None => Ok(()),
        }
    }

    /// Create a record (add mode) or overwrite the one being edited.
    ///
    /// The form is closed and the view refreshed even when writing to the
    /// store fails; the write error is returned afterwards.
    pub fn save(&mut self, form: RecordForm) -> Result<(), CatalogError> {
        if self.settings.require_artist_album {
            if let Some(field) = form.missing_required() {
                return Err(CatalogError::MissingField(field.label()));
            }
        }

        match self.editing_id.take() {
            None => {
                let record = Record::new(form, now_timestamp());
                info!(id = %record.id, "record added");
                self.records.push(record);
            }
            Some(id) => match self.records.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    record.apply(form);
                    if self.settings.refresh_date_on_edit {
                        record.date_added = now_timestamp();
                    }
                    info!(id = %id, "record updated");
                }
                None => debug!(id = %id, "edit target vanished, nothing updated"),
            },
        }

        self.cancel_edit();
        self.commit()
    }

    /// Remove the record `id` once the user has confirmed.
    ///
    /// Declining, or an id that isn't in the collection, changes nothing.
    pub fn delete(&mut self, id: &str, confirmed: bool) -> Result<(), CatalogError> {
        if !confirmed {
            return Ok(());
        }

        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            info!(id, "record deleted");
        }
        self.commit()
    }

    /// Ask for confirmation before deleting the selected record.
    pub fn request_delete_selected(&mut self) {
        self.pending_delete = self.selected_id().map(str::to_string);
    }

    /// Resolve a pending delete confirmation.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Result<(), CatalogError> {
        match self.pending_delete.take() {
            Some(id) => self.delete(&id, confirmed),
            None => Ok(()),
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh();
    }
    /// Enter search mode; typing then filters the list live.
    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }
    /// Leave search mode, keeping the current query.
    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }
    /// Leave search mode and drop the query.
    pub fn clear_search(&mut self) {
        self.search_mode = false;
        self.set_search(String::new());
    }
    /// Append a character to the search query and refresh the view.
    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.refresh();
    }
    /// Remove the last character from the search query and refresh the view.
    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh();
    }
    pub fn next_sort(&mut self) {
        self.set_sort(self.sort.next());
    }
    pub fn prev_sort(&mut self) {
        self.set_sort(self.sort.prev());
    }

    /// Id of the record under the cursor.
    pub fn selected_id(&self) -> Option<&str> {
        self.view.get(self.selected).map(|r| r.id.as_str())
    }
    /// Move selection to the next visible record, wrapping around.
    pub fn next(&mut self) {
        if !self.view.is_empty() {
            self.selected = (self.selected + 1) % self.view.len();
        }
    }
    /// Move selection to the previous visible record, wrapping around.
    pub fn prev(&mut self) {
        if !self.view.is_empty() {
            self.selected = (self.selected + self.view.len() - 1) % self.view.len();
        }
    }
    pub fn select_first(&mut self) {
        self.selected = 0;
    }
    pub fn select_last(&mut self) {
        self.selected = self.view.len().saturating_sub(1);
    }

    /// Persist the collection, then re-derive view and stats.
    fn commit(&mut self) -> Result<(), CatalogError> {
        let saved = save_collection(&mut self.store, &self.storage_key, &self.records);
        self.refresh();
        saved.map_err(CatalogError::from)
    }

    /// Recompute the visible list and stats, keeping the cursor on the same
    /// record when it is still visible.
    fn refresh(&mut self) {
        let selected_id = self.selected_id().map(str::to_string);

        self.view = filter_and_sort(&self.records, &self.search_query, self.sort);
        self.stats = Stats::compute(&self.records);

        self.selected = selected_id
            .and_then(|id| self.view.iter().position(|r| r.id == id))
            .unwrap_or(0);
    }
}
