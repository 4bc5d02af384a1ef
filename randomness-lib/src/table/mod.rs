//! The activatable record table.
//!
//! An [`ActivityTable`] holds an ordered list of records, each wrapped in an [`Entry`] that says
//! whether the record currently takes part in generation. Symbol sets and dictionaries are both
//! managed through this table. Records are identified by structural equality, so "editing" a
//! record means replacing it with a new value at the same position.

use std::{collections::BTreeSet, fmt::Debug};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod editor;

pub use editor::{Action, Hooks, Message, TableEditor};

/// Whether newly added records are active by default.
pub const DEFAULT_STATE: bool = true;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The referenced record is not in the table. Callers should only reference records they
    /// previously obtained from the table, so this always points at a stale reference.
    #[error("Record '{0}' is not in the table")]
    NotFound(String),
}

/// A named collection of items that can be stored in an [`ActivityTable`].
pub trait Record: Clone + PartialEq + Debug {
    /// The name under which the record is displayed. Must be unique within a valid table.
    fn name(&self) -> &str;

    /// Returns `true` if the record holds no items at all.
    fn is_empty(&self) -> bool;
}

/// A row of an [`ActivityTable`]: a record together with its activation flag.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
pub struct Entry<T> {
    #[getset(get = "pub")]
    #[serde(flatten)]
    record: T,
    #[getset(get_copy = "pub")]
    active: bool,
}

impl<T> Entry<T> {
    pub fn new(record: T, active: bool) -> Self {
        Self { record, active }
    }

    pub fn into_record(self) -> T {
        self.record
    }
}

/// An ordered sequence of [`Entry`]s.
///
/// Uniqueness of names is deliberately not enforced here; duplicates are allowed while the user
/// is editing and are reported by [`crate::validation::validate_table`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTable<T> {
    entries: Vec<Entry<T>>,
}

impl<T: Record> ActivityTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Restore a table from persisted entries, keeping their order and activity as-is.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry<T>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry<T>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_records(&self) -> Vec<&T> {
        self.entries.iter().map(|e| &e.record).collect()
    }

    pub fn active_records(&self) -> Vec<&T> {
        self.entries
            .iter()
            .filter(|e| e.active)
            .map(|e| &e.record)
            .collect()
    }

    /// Append `record` to the end of the table with the default activity.
    pub fn add(&mut self, record: T) {
        debug!("Added record: {}", record.name());
        self.entries.push(Entry::new(record, DEFAULT_STATE));
    }

    /// Remove the first entry holding a record equal to `record` and return it.
    pub fn remove(&mut self, record: &T) -> Result<T> {
        let row = self.row_of(record)?;
        let entry = self.entries.remove(row);

        debug!("Removed record: {}", entry.record.name());

        Ok(entry.record)
    }

    /// Remove the entry at `row` and return its record, or `None` if there is no such row.
    pub fn remove_at(&mut self, row: usize) -> Option<T> {
        if row >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(row);

        debug!("Removed record at row {row}: {}", entry.record.name());

        Some(entry.record)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole content of the table.
    ///
    /// A record that is already present keeps its current activity, every other record starts
    /// with [`DEFAULT_STATE`]. Repeated records are dropped, keeping the first occurrence.
    pub fn set_all(&mut self, records: impl IntoIterator<Item = T>) {
        let mut entries: Vec<Entry<T>> = Vec::new();
        for record in records {
            if entries.iter().any(|e| e.record == record) {
                continue;
            }

            let active = self
                .entry(&record)
                .map_or(DEFAULT_STATE, |existing| existing.active);
            entries.push(Entry::new(record, active));
        }

        self.entries = entries;
    }

    /// Set the activity of every entry whose record is in `records`. Records that are not in the
    /// table are ignored.
    pub fn set_active(&mut self, records: &[T], active: bool) {
        self.entries
            .iter_mut()
            .filter(|e| records.contains(&e.record))
            .for_each(|e| e.active = active);
    }

    /// Make exactly the entries whose record is in `records` active and deactivate the rest.
    pub fn set_active_records(&mut self, records: &[T]) {
        for entry in &mut self.entries {
            entry.active = records.contains(&entry.record);
        }
    }

    pub fn set_entry_activity(&mut self, record: &T, active: bool) -> Result<()> {
        let row = self.row_of(record)?;
        if let Some(entry) = self.entries.get_mut(row) {
            entry.active = active;
        }

        Ok(())
    }

    /// Set the activity of the entry at `row`, for hosts that toggle checkboxes by position.
    /// Returns `false` if there is no such row.
    pub fn set_row_activity(&mut self, row: usize, active: bool) -> bool {
        match self.entries.get_mut(row) {
            Some(entry) => {
                entry.active = active;
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, record: &T) -> Result<bool> {
        self.entry(record)
            .map(|e| e.active)
            .ok_or_else(|| Error::NotFound(record.name().to_string()))
    }

    /// Map the given row indices to their records, in ascending row order. Indices past the end
    /// of the table have no record and are skipped.
    pub fn highlighted_records(&self, selection: &BTreeSet<usize>) -> Vec<&T> {
        selection
            .iter()
            .filter_map(|&row| self.entries.get(row))
            .map(|e| &e.record)
            .collect()
    }

    /// Replace the first record equal to `old` with `new`, keeping its position and activity.
    pub fn replace(&mut self, old: &T, new: T) -> Result<()> {
        let row = self.row_of(old)?;
        if let Some(entry) = self.entries.get_mut(row) {
            debug!("Replaced record: {} -> {}", entry.record.name(), new.name());
            entry.record = new;
        }

        Ok(())
    }

    /// Replace the record at `row`, keeping its activity. Returns `false` if there is no such
    /// row.
    pub fn replace_at(&mut self, row: usize, new: T) -> bool {
        match self.entries.get_mut(row) {
            Some(entry) => {
                debug!("Replaced record: {} -> {}", entry.record.name(), new.name());
                entry.record = new;
                true
            }
            None => false,
        }
    }

    /// Swap `record` with the entry above it. Returns `false` if it was already at the top.
    pub fn move_up(&mut self, record: &T) -> Result<bool> {
        let row = self.row_of(record)?;
        if row == 0 {
            return Ok(false);
        }

        self.entries.swap(row - 1, row);
        Ok(true)
    }

    /// Swap `record` with the entry below it. Returns `false` if it was already at the bottom.
    pub fn move_down(&mut self, record: &T) -> Result<bool> {
        let row = self.row_of(record)?;
        if row + 1 >= self.entries.len() {
            return Ok(false);
        }

        self.entries.swap(row, row + 1);
        Ok(true)
    }

    /// Whether the copy control should be enabled for `selection`: something must be selected
    /// and every selected record must be copyable.
    pub fn can_copy<F>(&self, selection: &BTreeSet<usize>, is_copyable: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let selected = self.highlighted_records(selection);
        !selected.is_empty() && selected.into_iter().all(is_copyable)
    }

    /// Append deep copies of the selected entries, each with the activity of its original.
    /// Nothing is copied unless [`ActivityTable::can_copy`] holds. Returns the number of copies.
    pub fn copy_selected<F>(&mut self, selection: &BTreeSet<usize>, is_copyable: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        if !self.can_copy(selection, is_copyable) {
            return 0;
        }

        let copies: Vec<Entry<T>> = selection
            .iter()
            .filter_map(|&row| self.entries.get(row))
            .cloned()
            .collect();
        let count = copies.len();
        self.entries.extend(copies);

        debug!("Copied {count} record(s)");

        count
    }

    /// Row index of the first entry holding `record`.
    pub fn row_of(&self, record: &T) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| &e.record == record)
            .ok_or_else(|| Error::NotFound(record.name().to_string()))
    }

    fn entry(&self, record: &T) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| &e.record == record)
    }
}

impl<T: Record> Default for ActivityTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
