use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::entity::{Entity, EntityError};
use crate::model::round::CHOICES_PER_ROUND;

/// Label reported for names the catalog does not know.
pub const UNKNOWN_LABEL: &str = "Unknown flag";

const FLAGS: [(&str, &str); 11] = [
    (
        "Estonia",
        "Flag with three horizontal stripes of equal size. Top stripe blue, middle stripe black, bottom stripe white",
    ),
    (
        "France",
        "Flag with three vertical stripes of equal size. Left stripe blue, middle stripe white, right stripe red",
    ),
    (
        "Germany",
        "Flag with three horizontal stripes of equal size. Top stripe black, middle stripe red, bottom stripe gold",
    ),
    (
        "Ireland",
        "Flag with three vertical stripes of equal size. Left stripe green, middle stripe white, right stripe orange",
    ),
    (
        "Italy",
        "Flag with three vertical stripes of equal size. Left stripe green, middle stripe white, right stripe red",
    ),
    (
        "Nigeria",
        "Flag with three vertical stripes of equal size. Left stripe green, middle stripe white, right stripe green",
    ),
    (
        "Poland",
        "Flag with two horizontal stripes of equal size. Top stripe white, bottom stripe red",
    ),
    (
        "Russia",
        "Flag with three horizontal stripes of equal size. Top stripe white, middle stripe blue, bottom stripe red",
    ),
    (
        "Spain",
        "Flag with three horizontal stripes. Top thin stripe red, middle thick stripe gold with a crest on the left, bottom thin stripe red",
    ),
    (
        "UK",
        "Flag with overlapping red and white crosses, both straight and diagonally, on a blue background",
    ),
    (
        "US",
        "Flag with red and white stripes of equal size, with white stars on a blue background in the top-left corner",
    ),
];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog needs at least {min} entities, got {len}")]
    TooFewEntities { len: usize, min: usize },

    #[error("duplicate entity name: {0}")]
    DuplicateName(String),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable reference data: every entity a round may draw from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    /// Creates a catalog from a list of entities.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TooFewEntities` when a round could not be filled,
    /// or `CatalogError::DuplicateName` when two entities share a name.
    pub fn new(entities: Vec<Entity>) -> Result<Self, CatalogError> {
        if entities.len() < CHOICES_PER_ROUND {
            return Err(CatalogError::TooFewEntities {
                len: entities.len(),
                min: CHOICES_PER_ROUND,
            });
        }

        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if !seen.insert(entity.name()) {
                return Err(CatalogError::DuplicateName(entity.name().to_string()));
            }
        }

        Ok(Self { entities })
    }

    /// The built-in catalog of eleven country flags.
    #[must_use]
    pub fn flags() -> Self {
        Self {
            entities: FLAGS
                .iter()
                .map(|(name, label)| Entity::from_static(name, label))
                .collect(),
        }
    }

    /// Parses a JSON array of `{ "name", "label" }` objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input or invalid entities, and the
    /// `Catalog::new` errors for an unusable list.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Self::new(entities)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Accessibility label for `name`, or [`UNKNOWN_LABEL`].
    #[must_use]
    pub fn label_for(&self, name: &str) -> &str {
        self.find(name).map_or(UNKNOWN_LABEL, Entity::label)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::flags()
    }
}
