//! Filter selection and mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::AllergenIndex;

/// How a non-empty selection filters the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep products free of every selected allergen ("Zum Verzehr geeignet")
    #[default]
    Suitable,
    /// Keep products containing at least one selected allergen ("Enthält Allergene")
    Contains,
}

impl FilterMode {
    /// German label shown to users.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Suitable => "Zum Verzehr geeignet",
            Self::Contains => "Enthält Allergene",
        }
    }

    /// Machine name used in config files and JSON output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Suitable => "suitable",
            Self::Contains => "contains",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The set of allergen labels the user has toggled on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    labels: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a label on or off. Returns `true` if it is now selected.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.labels.remove(label) {
            false
        } else {
            self.labels.insert(label.to_string());
            true
        }
    }

    pub fn insert(&mut self, label: impl Into<String>) {
        self.labels.insert(label.into());
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Drop labels that no longer exist in the index.
    pub fn retain_indexed(&mut self, index: &AllergenIndex) {
        self.labels.retain(|label| index.contains(label));
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}
