use flag_core::model::{CHOICES_PER_ROUND, Catalog, Round, RoundError};

use crate::random::RandomSource;

/// Draws rounds from a catalog.
///
/// - Picks `CHOICES_PER_ROUND` distinct entities by shuffling the catalog positions
///   and keeping the first few (sampling without replacement).
/// - Shuffles the display order of the picked entities.
/// - Picks the correct position uniformly.
pub(crate) struct RoundDrawer<'a> {
    catalog: &'a Catalog,
}

impl<'a> RoundDrawer<'a> {
    #[must_use]
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// # Errors
    ///
    /// Returns `RoundError` if the random source produced a duplicate or an
    /// out-of-range correct index.
    pub(crate) fn draw(self, random: &mut dyn RandomSource) -> Result<Round, RoundError> {
        let mut pool: Vec<usize> = (0..self.catalog.len()).collect();
        random.shuffle(&mut pool);
        pool.truncate(CHOICES_PER_ROUND);

        let mut order: [usize; CHOICES_PER_ROUND] = std::array::from_fn(|i| i);
        random.shuffle(&mut order);

        let entities = self.catalog.entities();
        let choices = order.map(|slot| entities[pool[slot]].clone());
        let correct_index = random.pick_index(CHOICES_PER_ROUND);

        Round::new(choices, correct_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;
    use flag_core::model::Entity;
    use std::collections::HashSet;

    /// Leaves every order untouched and always picks the same position.
    struct Identity(usize);

    impl RandomSource for Identity {
        fn shuffle(&mut self, _indices: &mut [usize]) {}

        fn pick_index(&mut self, _upper: usize) -> usize {
            self.0
        }
    }

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .map(|n| Entity::new(*n, format!("{n} flag")).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn draws_from_shuffled_prefix() {
        let catalog = catalog(&["A", "B", "C", "D"]);
        let round = RoundDrawer::new(&catalog).draw(&mut Identity(1)).unwrap();

        let names: Vec<&str> = round.choices().iter().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(round.correct_index(), 1);
        assert_eq!(round.target().name(), "B");
    }

    #[test]
    fn random_rounds_hold_distinct_catalog_entities() {
        let catalog = Catalog::flags();
        let mut random = RngSource::seeded(3);
        for _ in 0..100 {
            let round = RoundDrawer::new(&catalog).draw(&mut random).unwrap();
            let names: HashSet<_> = round.choices().iter().map(Entity::name).collect();
            assert_eq!(names.len(), CHOICES_PER_ROUND);
            assert!(round.choices().iter().all(|e| catalog.find(e.name().as_str()).is_some()));
            assert!(round.correct_index() < CHOICES_PER_ROUND);
        }
    }

    #[test]
    fn misbehaving_source_is_reported() {
        let catalog = catalog(&["A", "B", "C"]);
        let err = RoundDrawer::new(&catalog).draw(&mut Identity(5)).unwrap_err();
        assert_eq!(err, RoundError::CorrectIndexOutOfRange { index: 5 });
    }
}
