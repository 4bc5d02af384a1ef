//! Random version 4 UUIDs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    capitalization::CapitalizationMode,
    settings::{DEFAULT_SCHEME_NAME, Scheme, SchemeSettings, Settings},
    validation::ValidationInfo,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UuidScheme {
    pub name: String,
    pub enclosure: String,
    pub capitalization: CapitalizationMode,
    pub add_dashes: bool,
}

impl Default for UuidScheme {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEME_NAME.into(),
            enclosure: "\"".into(),
            capitalization: CapitalizationMode::Lower,
            add_dashes: true,
        }
    }
}

impl Scheme for UuidScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }

    /// Every combination of options produces a valid UUID.
    fn validate(&self) -> Option<ValidationInfo> {
        None
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        let uuid = ::uuid::Builder::from_random_bytes(rng.random()).into_uuid();
        let raw = if self.add_dashes {
            uuid.hyphenated().to_string()
        } else {
            uuid.simple().to_string()
        };
        let value = self.capitalization.transform(&raw, rng);

        Ok(format!("{}{value}{}", self.enclosure, self.enclosure))
    }

    fn of(settings: &Settings) -> &SchemeSettings<Self> {
        &settings.uuid
    }

    fn of_mut(settings: &mut Settings) -> &mut SchemeSettings<Self> {
        &mut settings.uuid
    }
}
