use crate::{
    settings::{Scheme, Settings, SettingsComponent},
    string::{StringScheme, SymbolSet},
    table::{ActivityTable, Hooks, TableEditor},
    validation::ValidationInfo,
};

/// Unsaved state of the string settings page.
///
/// The scalar fields of the current scheme are edited in place, the symbol sets through a
/// [`TableEditor`].
pub struct StringSettingsComponent {
    unsaved: StringScheme,
    symbol_sets: TableEditor<SymbolSet>,
}

impl StringSettingsComponent {
    pub fn new(hooks: Hooks<SymbolSet>) -> Self {
        Self {
            unsaved: StringScheme::default(),
            symbol_sets: TableEditor::new(hooks),
        }
    }

    /// Hooks that add a blank symbol set for the user to fill in.
    pub fn default_hooks() -> Hooks<SymbolSet> {
        Hooks::new().on_create(|| Some(SymbolSet::new("", "")))
    }

    /// The scheme as it would be saved right now.
    pub fn scheme(&self) -> StringScheme {
        StringScheme {
            symbol_sets: self.symbol_sets.table().entries().to_vec(),
            ..self.unsaved.clone()
        }
    }

    /// The scalar fields of the unsaved scheme. Its symbol sets are ignored; edit them through
    /// [`StringSettingsComponent::symbol_sets_mut`].
    pub fn scheme_mut(&mut self) -> &mut StringScheme {
        &mut self.unsaved
    }

    pub fn symbol_sets(&self) -> &TableEditor<SymbolSet> {
        &self.symbol_sets
    }

    pub fn symbol_sets_mut(&mut self) -> &mut TableEditor<SymbolSet> {
        &mut self.symbol_sets
    }
}

impl Default for StringSettingsComponent {
    fn default() -> Self {
        Self::new(Self::default_hooks())
    }
}

impl SettingsComponent for StringSettingsComponent {
    fn load_settings(&mut self, settings: &Settings) {
        let scheme = StringScheme::of(settings).current_scheme();

        *self.symbol_sets.table_mut() = ActivityTable::from_entries(scheme.symbol_sets.clone());

        self.unsaved = StringScheme {
            symbol_sets: Vec::new(),
            ..scheme.clone()
        };

        tracing::debug!(
            "Loaded string scheme {} with {} symbol set(s)",
            scheme.name(),
            self.symbol_sets.table().len()
        );
    }

    fn save_settings(&self, settings: &mut Settings) {
        *StringScheme::of_mut(settings).current_scheme_mut() = self.scheme();
    }

    fn is_modified(&self, settings: &Settings) -> bool {
        &self.scheme() != StringScheme::of(settings).current_scheme()
    }

    fn validate(&self) -> Option<ValidationInfo> {
        self.scheme().validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        table::{Action, Message, Record},
        validation::{DUPLICATE_NAME, MISSING_NAME, Target},
    };

    fn table_names(editor: &TableEditor<SymbolSet>) -> Vec<&str> {
        editor.table().all_records().into_iter().map(Record::name).collect()
    }

    fn loaded() -> (StringSettingsComponent, Settings) {
        let settings = Settings::default();
        let mut component = StringSettingsComponent::default();
        component.load_settings(&settings);
        (component, settings)
    }

    #[test]
    fn test_load_is_not_modified() {
        let (component, settings) = loaded();

        assert!(!component.is_modified(&settings));
        assert_eq!(component.validate(), None);
        assert_eq!(
            table_names(component.symbol_sets()),
            vec![
                "alphabet",
                "digits",
                "hexadecimal",
                "minus",
                "underscore",
                "special",
                "brackets"
            ]
        );
    }

    #[test]
    fn test_load_restores_activity() {
        let (component, _) = loaded();

        let active: Vec<&str> = component
            .symbol_sets()
            .table()
            .active_records()
            .into_iter()
            .map(Record::name)
            .collect();

        assert_eq!(active, vec!["alphabet", "digits"]);
    }

    #[test]
    fn test_reorder_is_a_modification() {
        let (mut component, settings) = loaded();

        component
            .symbol_sets_mut()
            .update(Message::SelectionChanged([1].into()))
            .unwrap();
        component
            .symbol_sets_mut()
            .update(Message::MoveUpPressed)
            .unwrap();

        assert!(component.is_modified(&settings));
    }

    #[test]
    fn test_scalar_change_is_a_modification() {
        let (mut component, settings) = loaded();

        component.scheme_mut().max_length = 20;

        assert!(component.is_modified(&settings));
    }

    #[test]
    fn test_added_blank_row_is_invalid() {
        let (mut component, _) = loaded();

        let action = component
            .symbol_sets_mut()
            .update(Message::AddPressed)
            .unwrap();

        assert_eq!(action, Action::Changed);
        let info = component.validate().unwrap();
        assert_eq!(info.message(), MISSING_NAME);
        assert_eq!(info.target(), Target::SymbolSetTable);
    }

    #[test]
    fn test_copied_row_has_duplicate_name() {
        let (mut component, _) = loaded();
        let editor = component.symbol_sets_mut();

        editor
            .update(Message::SelectionChanged([0].into()))
            .unwrap();
        editor.update(Message::CopyPressed).unwrap();

        assert_eq!(component.validate().unwrap().message(), DUPLICATE_NAME);
    }

    #[test]
    fn test_save_writes_current_scheme() {
        let (mut component, mut settings) = loaded();
        component
            .symbol_sets_mut()
            .table_mut()
            .add(SymbolSet::new("vowels", "aeiou"));

        component.save_settings(&mut settings);

        assert!(!component.is_modified(&settings));
        assert!(
            settings
                .string
                .current_scheme()
                .symbol_sets
                .iter()
                .any(|e| e.record().name() == "vowels" && e.active())
        );
    }
}
