//! Host-agnostic editing of an [`ActivityTable`].
//!
//! A UI layer renders the table however it likes and forwards user input as [`Message`]s. What
//! happens when the user asks for a new or edited record is decided by the [`Hooks`] the host
//! supplies, so the editor never needs to know about dialogs or widgets.

use std::collections::BTreeSet;

use tracing::debug;

use crate::table::{ActivityTable, Record, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    AddPressed,
    EditPressed,
    RemovePressed,
    CopyPressed,
    MoveUpPressed,
    MoveDownPressed,
    ActivityToggled(usize, bool),
    SelectionChanged(BTreeSet<usize>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// The content of the table changed and should be revalidated.
    Changed,
}

/// Callbacks supplied by the embedding UI.
pub struct Hooks<T> {
    create: Box<dyn FnMut() -> Option<T>>,
    edit: Box<dyn FnMut(&T) -> Option<T>>,
    is_copyable: Box<dyn Fn(&T) -> bool>,
    is_removable: Box<dyn Fn(&T) -> bool>,
}

impl<T: 'static> Hooks<T> {
    /// Hooks that never create or edit anything and allow copying and removing every record.
    pub fn new() -> Self {
        Self {
            create: Box::new(|| None),
            edit: Box::new(|_| None),
            is_copyable: Box::new(|_| true),
            is_removable: Box::new(|_| true),
        }
    }

    /// Called when the add button is pressed. Returning `None` cancels the addition.
    pub fn on_create(mut self, create: impl FnMut() -> Option<T> + 'static) -> Self {
        self.create = Box::new(create);
        self
    }

    /// Called with the highlighted record when the edit button is pressed. Returning `None`
    /// cancels the edit.
    pub fn on_edit(mut self, edit: impl FnMut(&T) -> Option<T> + 'static) -> Self {
        self.edit = Box::new(edit);
        self
    }

    pub fn copyable_when(mut self, is_copyable: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_copyable = Box::new(is_copyable);
        self
    }

    pub fn removable_when(mut self, is_removable: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_removable = Box::new(is_removable);
        self
    }

    pub fn is_copyable(&self, record: &T) -> bool {
        (self.is_copyable)(record)
    }

    pub fn is_removable(&self, record: &T) -> bool {
        (self.is_removable)(record)
    }
}

impl<T: 'static> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`ActivityTable`] together with the selection and hooks of the UI that edits it.
pub struct TableEditor<T> {
    table: ActivityTable<T>,
    selection: BTreeSet<usize>,
    hooks: Hooks<T>,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl<T: Record + 'static> TableEditor<T> {
    pub fn new(hooks: Hooks<T>) -> Self {
        Self {
            table: ActivityTable::new(),
            selection: BTreeSet::new(),
            hooks,
            listeners: Vec::new(),
        }
    }

    pub fn table(&self) -> &ActivityTable<T> {
        &self.table
    }

    /// Direct access to the table, e.g. for loading settings. Listeners are not notified of
    /// changes made through this reference.
    pub fn table_mut(&mut self) -> &mut ActivityTable<T> {
        &mut self.table
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn highlighted_records(&self) -> Vec<&T> {
        self.table.highlighted_records(&self.selection)
    }

    /// Register a listener that is invoked whenever a message changes the table.
    pub fn add_change_listener(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Whether the copy control is enabled for the current selection.
    pub fn copy_enabled(&self) -> bool {
        self.table
            .can_copy(&self.selection, |record| self.hooks.is_copyable(record))
    }

    pub fn update(&mut self, message: Message) -> Result<Action> {
        let action = match message {
            Message::AddPressed => self.add(),
            Message::EditPressed => self.edit(),
            Message::RemovePressed => self.remove(),
            Message::CopyPressed => self.copy(),
            Message::MoveUpPressed => self.move_selected(true)?,
            Message::MoveDownPressed => self.move_selected(false)?,
            Message::ActivityToggled(row, active) => {
                let current = self.table.entries().get(row).map(|e| e.active());
                if current.is_some_and(|c| c != active) {
                    self.table.set_row_activity(row, active);
                    Action::Changed
                } else {
                    Action::None
                }
            }
            Message::SelectionChanged(rows) => {
                let len = self.table.len();
                self.selection = rows.into_iter().filter(|&row| row < len).collect();
                Action::None
            }
        };

        if action == Action::Changed {
            for listener in &mut self.listeners {
                listener();
            }
        }

        Ok(action)
    }

    fn add(&mut self) -> Action {
        let Some(record) = (self.hooks.create)() else {
            return Action::None;
        };

        self.table.add(record);
        self.selection = BTreeSet::from([self.table.len() - 1]);

        Action::Changed
    }

    fn edit(&mut self) -> Action {
        let Some((row, old)) = self.selection.iter().find_map(|&row| {
            self.table
                .entries()
                .get(row)
                .map(|e| (row, e.record().clone()))
        }) else {
            return Action::None;
        };

        match (self.hooks.edit)(&old) {
            Some(new) if new != old => {
                self.table.replace_at(row, new);
                Action::Changed
            }
            _ => Action::None,
        }
    }

    fn remove(&mut self) -> Action {
        let rows: Vec<usize> = self
            .selection
            .iter()
            .copied()
            .filter(|&row| {
                self.table
                    .entries()
                    .get(row)
                    .is_some_and(|e| self.hooks.is_removable(e.record()))
            })
            .collect();
        if rows.is_empty() {
            return Action::None;
        }

        // Back to front so the remaining rows keep their indices.
        for &row in rows.iter().rev() {
            self.table.remove_at(row);
        }
        self.selection.clear();

        Action::Changed
    }

    fn copy(&mut self) -> Action {
        let first_copy = self.table.len();
        let hooks = &self.hooks;
        let count = self
            .table
            .copy_selected(&self.selection, |record| hooks.is_copyable(record));
        if count == 0 {
            return Action::None;
        }

        self.selection = (first_copy..first_copy + count).collect();

        Action::Changed
    }

    fn move_selected(&mut self, up: bool) -> Result<Action> {
        let (Some(&row), 1) = (self.selection.first(), self.selection.len()) else {
            return Ok(Action::None);
        };
        let Some(record) = self.table.entries().get(row).map(|e| e.record().clone()) else {
            return Ok(Action::None);
        };

        // Equal records may appear more than once, only move when the selected row is the one
        // the table will find.
        if self.table.row_of(&record)? != row {
            return Ok(Action::None);
        }

        let moved = if up {
            self.table.move_up(&record)?
        } else {
            self.table.move_down(&record)?
        };
        if !moved {
            return Ok(Action::None);
        }

        let new_row = if up { row - 1 } else { row + 1 };
        self.selection = BTreeSet::from([new_row]);
        debug!("Moved record {} to row {new_row}", record.name());

        Ok(Action::Changed)
    }
}
