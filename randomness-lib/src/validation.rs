//! Validation of edited settings.
//!
//! Validation never fails with an error; it returns the first broken rule as a
//! [`ValidationInfo`] so the host can block applying the settings and point the user at the
//! offending control.

use std::{collections::HashSet, fmt::Display};

use getset::{CopyGetters, Getters};

use crate::table::{ActivityTable, Record};

pub const MISSING_NAME: &str = "All entries must have a name.";
pub const DUPLICATE_NAME: &str = "Entries must have unique names.";
pub const EMPTY_RECORD: &str = "Each entry must contain at least one item.";
pub const NO_ACTIVE_RECORD: &str = "Activate at least one entry.";

/// Identifies the control a [`ValidationInfo`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Target {
    SymbolSetTable,
    DictionaryTable,
    MinLength,
    MaxLength,
    LengthRange,
    MinValue,
    MaxValue,
    DecimalCount,
    Separators,
}

/// Describes why the current settings cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, Getters, CopyGetters)]
#[display("{message}")]
pub struct ValidationInfo {
    #[getset(get = "pub")]
    message: String,
    #[getset(get_copy = "pub")]
    target: Target,
}

impl ValidationInfo {
    pub fn new(message: impl Into<String>, target: Target) -> Self {
        Self {
            message: message.into(),
            target,
        }
    }
}

/// Check the table rules in priority order and return the first that fails.
///
/// 1. every record has a name;
/// 2. names are pairwise distinct;
/// 3. every record holds at least one item;
/// 4. at least one entry is active.
pub fn validate_table<T: Record>(table: &ActivityTable<T>, target: Target) -> Option<ValidationInfo> {
    let records = table.all_records();

    if records.iter().any(|r| r.name().is_empty()) {
        return Some(ValidationInfo::new(MISSING_NAME, target));
    }

    let mut names = HashSet::new();
    if !records.iter().all(|r| names.insert(r.name())) {
        return Some(ValidationInfo::new(DUPLICATE_NAME, target));
    }

    if records.iter().any(|r| r.is_empty()) {
        return Some(ValidationInfo::new(EMPTY_RECORD, target));
    }

    if table.active_records().is_empty() {
        return Some(ValidationInfo::new(NO_ACTIVE_RECORD, target));
    }

    None
}

/// Largest length a string or word scheme accepts.
pub const MAX_LENGTH: usize = 2_147_483_647;

/// Check that `value` lies within `[min, max]`.
pub fn validate_bounded<T>(
    value: T,
    min: T,
    max: T,
    description: &str,
    target: Target,
) -> Option<ValidationInfo>
where
    T: PartialOrd + Display,
{
    if value < min {
        Some(ValidationInfo::new(
            format!("The {description} should be greater than or equal to {min}."),
            target,
        ))
    } else if value > max {
        Some(ValidationInfo::new(
            format!("The {description} should be less than or equal to {max}."),
            target,
        ))
    } else {
        None
    }
}

/// Check that a range is not inverted.
pub fn validate_range<T: PartialOrd>(
    min: T,
    max: T,
    name: &str,
    target: Target,
) -> Option<ValidationInfo> {
    (min > max).then(|| {
        ValidationInfo::new(
            format!("The maximum {name} should not be smaller than the minimum {name}."),
            target,
        )
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::test::item;

    const TARGET: Target = Target::SymbolSetTable;

    fn message(table: &ActivityTable<crate::table::test::Item>) -> Option<String> {
        validate_table(table, TARGET).map(|info| info.message().clone())
    }

    #[test]
    fn test_valid_table() {
        let mut table = ActivityTable::new();
        table.add(item("a", &["x"]));

        assert_eq!(validate_table(&table, TARGET), None);
    }

    #[test]
    fn test_missing_name_precedes_duplicate() {
        let mut table = ActivityTable::new();
        table.add(item("", &["x"]));
        table.add(item("dup", &["x"]));
        table.add(item("dup", &["y"]));

        assert_eq!(message(&table).as_deref(), Some(MISSING_NAME));
    }

    #[test]
    fn test_duplicate_then_removed() {
        let mut table = ActivityTable::new();
        table.add(item("A", &["x"]));
        table.add(item("A", &["y"]));

        assert_eq!(message(&table).as_deref(), Some(DUPLICATE_NAME));

        table.remove(&item("A", &["y"])).unwrap();

        assert_eq!(message(&table), None);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut table = ActivityTable::new();
        table.add(item("a", &["x"]));
        table.add(item("A", &["x"]));

        assert_eq!(message(&table), None);
    }

    #[test]
    fn test_empty_record() {
        let mut table = ActivityTable::new();
        table.add(item("a", &["x"]));
        table.add(item("b", &[]));

        assert_eq!(message(&table).as_deref(), Some(EMPTY_RECORD));
    }

    #[test]
    fn test_no_active_record() {
        let mut table = ActivityTable::new();
        table.add(item("a", &["x"]));
        table.set_active(&[item("a", &["x"])], false);

        assert_eq!(message(&table).as_deref(), Some(NO_ACTIVE_RECORD));
    }

    #[test]
    fn test_empty_table_has_no_active_record() {
        let table: ActivityTable<crate::table::test::Item> = ActivityTable::new();

        assert_eq!(message(&table).as_deref(), Some(NO_ACTIVE_RECORD));
    }

    #[test]
    fn test_target_is_passed_through() {
        let table: ActivityTable<crate::table::test::Item> = ActivityTable::new();

        let info = validate_table(&table, Target::DictionaryTable).unwrap();

        assert_eq!(info.target(), Target::DictionaryTable);
        assert_eq!(info.to_string(), NO_ACTIVE_RECORD);
    }

    #[test]
    fn test_bounded() {
        assert_eq!(validate_bounded(5, 1, 10, "length", Target::MinLength), None);
        assert_eq!(
            validate_bounded(0, 1, 10, "minimum length", Target::MinLength)
                .unwrap()
                .message(),
            "The minimum length should be greater than or equal to 1."
        );
        assert_eq!(
            validate_bounded(11, 1, 10, "length", Target::MaxLength)
                .unwrap()
                .target(),
            Target::MaxLength
        );
    }

    #[test]
    fn test_range() {
        assert_eq!(validate_range(2, 2, "length", Target::LengthRange), None);
        assert_eq!(
            validate_range(3, 2, "length", Target::LengthRange)
                .unwrap()
                .message(),
            "The maximum length should not be smaller than the minimum length."
        );
    }
}
