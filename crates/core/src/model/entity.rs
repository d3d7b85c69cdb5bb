use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntityError {
    #[error("entity name cannot be empty")]
    EmptyName,

    #[error("label for {name} cannot be empty")]
    EmptyLabel { name: String },
}

/// Validated entity identifier (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityName(String);

impl EntityName {
    /// Create a validated entity name.
    ///
    /// # Errors
    ///
    /// Returns `EntityError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EntityError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EntityError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for EntityName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A guessable catalog item: a country and the description of its flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntityRecord", into = "EntityRecord")]
pub struct Entity {
    name: EntityName,
    label: String,
}

impl Entity {
    /// Creates a validated entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityError::EmptyName` or `EntityError::EmptyLabel` when either
    /// field is blank.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Result<Self, EntityError> {
        let name = EntityName::new(name)?;
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(EntityError::EmptyLabel {
                name: name.to_string(),
            });
        }
        Ok(Self { name, label })
    }

    /// Builds an entity from compile-time data that is already trimmed and non-empty.
    pub(crate) fn from_static(name: &'static str, label: &'static str) -> Self {
        Self {
            name: EntityName(name.to_string()),
            label: label.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Accessibility description shown in place of the image.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Serialize, Deserialize)]
struct EntityRecord {
    name: String,
    label: String,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = EntityError;

    fn try_from(record: EntityRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.label)
    }
}

impl From<Entity> for EntityRecord {
    fn from(entity: Entity) -> Self {
        Self {
            name: entity.name.0,
            label: entity.label,
        }
    }
}
