mod catalog;
mod entity;
mod outcome;
mod round;
mod summary;

pub use catalog::{Catalog, CatalogError, UNKNOWN_LABEL};
pub use entity::{Entity, EntityError, EntityName};
pub use outcome::{Outcome, RoundRecord};
pub use round::{CHOICES_PER_ROUND, Round, RoundError};
pub use summary::{GameSummary, GameSummaryError};
