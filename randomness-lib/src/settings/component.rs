//! The edit lifecycle of a settings page.
//!
//! A [`SettingsComponent`] holds unsaved edits for one part of the [`Settings`]. A
//! [`Configurable`] connects such a component to the [`Repository`] and decides when the edits
//! are written back.

use tracing::info;

use crate::{
    Error, Repository, Result,
    settings::{Scheme, Settings},
    validation::ValidationInfo,
};

pub trait SettingsComponent {
    /// Replace all unsaved state with the values in `settings`.
    fn load_settings(&mut self, settings: &Settings);

    fn save_settings(&self, settings: &mut Settings);

    /// Whether saving would change `settings`.
    fn is_modified(&self, settings: &Settings) -> bool;

    fn validate(&self) -> Option<ValidationInfo>;
}

/// Edits the current scheme of a generator without any tables.
#[derive(Debug, Clone, Default)]
pub struct SchemeComponent<S> {
    unsaved: S,
}

impl<S: Scheme> SchemeComponent<S> {
    pub fn new() -> Self {
        Self {
            unsaved: S::default(),
        }
    }

    pub fn scheme(&self) -> &S {
        &self.unsaved
    }

    pub fn scheme_mut(&mut self) -> &mut S {
        &mut self.unsaved
    }
}

impl<S: Scheme> SettingsComponent for SchemeComponent<S> {
    fn load_settings(&mut self, settings: &Settings) {
        self.unsaved = S::of(settings).current_scheme().clone();
    }

    fn save_settings(&self, settings: &mut Settings) {
        *S::of_mut(settings).current_scheme_mut() = self.unsaved.clone();
    }

    fn is_modified(&self, settings: &Settings) -> bool {
        &self.unsaved != S::of(settings).current_scheme()
    }

    fn validate(&self) -> Option<ValidationInfo> {
        self.unsaved.validate()
    }
}

/// A settings page: a component bound to the shared settings it edits.
pub struct Configurable<C> {
    repo: Repository,
    component: C,
}

impl<C: SettingsComponent> Configurable<C> {
    /// Bind `component` to the settings of `repo` and load their current values into it.
    pub fn new(repo: Repository, mut component: C) -> Self {
        component.load_settings(&repo.settings().read());

        Self { repo, component }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn is_modified(&self) -> bool {
        self.component.is_modified(&self.repo.settings().read())
    }

    pub fn validate(&self) -> Option<ValidationInfo> {
        self.component.validate()
    }

    /// Write the unsaved state into the shared settings and persist them. Nothing is written
    /// if the component does not validate.
    pub fn apply(&mut self) -> Result<()> {
        if let Some(info) = self.component.validate() {
            return Err(Error::Invalid(info));
        }

        self.component.save_settings(&mut self.repo.settings().write());
        self.repo.save()?;

        info!("Applied settings");

        Ok(())
    }

    /// Discard the unsaved state.
    pub fn reset(&mut self) {
        self.component.load_settings(&self.repo.settings().read());
    }
}
