use crate::{
    settings::{Scheme, Settings, SettingsComponent},
    table::{ActivityTable, Hooks, TableEditor},
    validation::ValidationInfo,
    word::{Dictionary, WordScheme},
};

/// Unsaved state of the word settings page.
pub struct WordSettingsComponent {
    unsaved: WordScheme,
    dictionaries: TableEditor<Dictionary>,
}

impl WordSettingsComponent {
    /// Create the component with `hooks`, which should start from
    /// [`WordSettingsComponent::default_hooks`] so bundled dictionaries stay protected.
    pub fn new(hooks: Hooks<Dictionary>) -> Self {
        Self {
            unsaved: WordScheme::default(),
            dictionaries: TableEditor::new(hooks),
        }
    }

    /// Bundled dictionaries can be neither copied nor removed. Adding a dictionary requires a
    /// file, so the host has to supply its own create hook.
    pub fn default_hooks() -> Hooks<Dictionary> {
        Hooks::new()
            .copyable_when(Dictionary::is_user)
            .removable_when(Dictionary::is_user)
    }

    pub fn scheme(&self) -> WordScheme {
        WordScheme {
            dictionaries: self.dictionaries.table().entries().to_vec(),
            ..self.unsaved.clone()
        }
    }

    /// The scalar fields of the unsaved scheme. Its dictionaries are ignored; edit them through
    /// [`WordSettingsComponent::dictionaries_mut`].
    pub fn scheme_mut(&mut self) -> &mut WordScheme {
        &mut self.unsaved
    }

    pub fn dictionaries(&self) -> &TableEditor<Dictionary> {
        &self.dictionaries
    }

    pub fn dictionaries_mut(&mut self) -> &mut TableEditor<Dictionary> {
        &mut self.dictionaries
    }
}

impl Default for WordSettingsComponent {
    fn default() -> Self {
        Self::new(Self::default_hooks())
    }
}

impl SettingsComponent for WordSettingsComponent {
    fn load_settings(&mut self, settings: &Settings) {
        let scheme = WordScheme::of(settings).current_scheme();

        *self.dictionaries.table_mut() = ActivityTable::from_entries(scheme.dictionaries.clone());
        self.unsaved = WordScheme {
            dictionaries: Vec::new(),
            ..scheme.clone()
        };
    }

    fn save_settings(&self, settings: &mut Settings) {
        *WordScheme::of_mut(settings).current_scheme_mut() = self.scheme();
    }

    fn is_modified(&self, settings: &Settings) -> bool {
        &self.scheme() != WordScheme::of(settings).current_scheme()
    }

    fn validate(&self) -> Option<ValidationInfo> {
        self.scheme().validate()
    }
}
