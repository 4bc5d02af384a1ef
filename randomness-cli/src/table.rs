//! Drives a [`TableEditor`] from the command line, addressing rows by record name.

use std::collections::BTreeSet;

use colored::Colorize;
use randomness_lib::{
    Record, Result,
    table::{Action, Error as TableError, Message, TableEditor},
};

pub fn list<T: Record + 'static>(editor: &TableEditor<T>, describe: impl Fn(&T) -> String) {
    for entry in editor.table().entries() {
        let marker = if entry.active() { "[x]".green() } else { "[ ]".dimmed() };
        println!("{marker} {} {}", entry.record().name().bold(), describe(entry.record()));
    }
}

/// Select the rows holding records called `names`.
pub fn select<T: Record + 'static>(editor: &mut TableEditor<T>, names: &[String]) -> Result<()> {
    let rows: BTreeSet<usize> = names
        .iter()
        .map(|name| row(editor, name))
        .collect::<Result<_>>()?;
    editor.update(Message::SelectionChanged(rows))?;

    Ok(())
}

pub fn set_activity<T: Record + 'static>(
    editor: &mut TableEditor<T>,
    names: &[String],
    active: bool,
) -> Result<Action> {
    let mut action = Action::None;
    for name in names {
        let row = row(editor, name)?;
        if editor.update(Message::ActivityToggled(row, active))? == Action::Changed {
            action = Action::Changed;
        }
    }

    Ok(action)
}

/// Send `message` to the editor after selecting `names`, warning when nothing could be `done`.
pub fn on_selection<T: Record + 'static>(
    editor: &mut TableEditor<T>,
    names: &[String],
    message: Message,
    done: &str,
) -> Result<Action> {
    select(editor, names)?;
    let action = editor.update(message)?;
    if action == Action::None {
        eprintln!("{} nothing could be {done}", "warning:".yellow().bold());
    }

    Ok(action)
}

fn row<T: Record + 'static>(editor: &TableEditor<T>, name: &str) -> Result<usize> {
    editor
        .table()
        .entries()
        .iter()
        .position(|e| e.record().name() == name)
        .ok_or_else(|| TableError::NotFound(name.to_string()).into())
}
