//! Deterministic short-code generation for persisted entities.
//!
//! A code is a pure function of the entity's kind and id, the configured
//! salt, a length and a seed. [`ShortCodeGenerator::generate_unique_code`]
//! and [`ShortCodeGenerator::assign_unique_code`] walk the seeds and lengths
//! until a code nobody of the same kind holds is found.

pub mod digest;
pub mod error;
mod unique;

pub use error::{GeneratorError, Result};
pub use unique::{Assignment, Attempt, Attempts, GeneratedCode};

use foodgram_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use foodgram_core::{Entity, ShortCode};
use typed_builder::TypedBuilder;

pub const DEFAULT_SALT: &str = "foodgram";
/// Seeds `0..=MAX_SEED` are tried at each length before growing it.
pub const MAX_SEED: u64 = 10;

/// Configures a [`ShortCodeGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct GeneratorSettings {
    /// Mixed into every digest so codes do not follow raw ids.
    #[builder(default = DEFAULT_SALT.to_string(), setter(into))]
    pub salt: String,
    /// Length of the first candidate when the caller has no floor of its own.
    #[builder(default = MIN_LENGTH)]
    pub min_length: usize,
    /// Generation fails once this length is used up.
    #[builder(default = MAX_LENGTH)]
    pub max_length: usize,
    #[builder(default = MAX_SEED)]
    pub max_seed: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct ShortCodeGenerator {
    settings: GeneratorSettings,
}

impl ShortCodeGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        if settings.min_length < MIN_LENGTH || settings.max_length > MAX_LENGTH {
            return Err(GeneratorError::InvalidSettings(format!(
                "lengths must stay within {}..={}, got {}..={}",
                MIN_LENGTH, MAX_LENGTH, settings.min_length, settings.max_length
            )));
        }
        if settings.min_length > settings.max_length {
            return Err(GeneratorError::InvalidSettings(format!(
                "min_length {} exceeds max_length {}",
                settings.min_length, settings.max_length
            )));
        }

        Ok(Self { settings })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn min_length(&self) -> usize {
        self.settings.min_length
    }

    pub fn max_length(&self) -> usize {
        self.settings.max_length
    }

    /// Generates the code for `entity` at `length` and `seed`.
    ///
    /// Pure: identical inputs always give the identical code, and the code
    /// has exactly `length` characters from the 62-symbol alphabet. `length`
    /// must lie within `MIN_LENGTH..=MAX_LENGTH`; the unique-code walks reject
    /// anything else before generating.
    pub fn generate_code<E: Entity + ?Sized>(
        &self,
        entity: &E,
        length: usize,
        seed: u64,
    ) -> ShortCode {
        debug_assert!((MIN_LENGTH..=MAX_LENGTH).contains(&length));
        let salt = &self.settings.salt;
        let mut digest = digest::deterministic_digest(entity.kind().name(), entity.id(), salt);
        digest::scramble(&mut digest, self.effective_seed(entity.id(), seed));

        let digits = digest::digit_string(&digest, length);
        ShortCode::new_unchecked(digest::encode(&digits, length))
    }

    /// Seed of the permutation: salt length in characters, plus id, plus seed.
    pub(crate) fn effective_seed(&self, id: u64, seed: u64) -> u64 {
        (self.settings.salt.chars().count() as u64)
            .wrapping_add(id)
            .wrapping_add(seed)
    }

    /// Rejects a starting length no code may have, or one past the cap.
    pub(crate) fn check_length(&self, length: usize) -> Result<()> {
        if length < MIN_LENGTH || length > self.settings.max_length {
            return Err(GeneratorError::InvalidSettings(format!(
                "code length must stay within {}..={}, got {}",
                MIN_LENGTH, self.settings.max_length, length
            )));
        }
        Ok(())
    }

    /// Every `(length, seed)` pair tried for a unique code, in order.
    pub fn attempts(&self, length: usize, seed: u64) -> Attempts {
        Attempts::new(
            Attempt { length, seed },
            self.settings.max_length,
            self.settings.max_seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodgram_core::shortcode::ALPHABET;
    use foodgram_core::{EntityKind, EntityRef, Recipe};
    use std::collections::HashSet;

    fn generator() -> ShortCodeGenerator {
        ShortCodeGenerator::new(GeneratorSettings::default()).unwrap()
    }

    #[test]
    fn pinned_regression_vector() {
        let code = generator().generate_code(&EntityRef::recipe(42), 3, 0);
        assert_eq!(code.as_str(), "qsR");
    }

    #[test]
    fn more_pinned_vectors() {
        let generator = generator();
        assert_eq!(generator.generate_code(&EntityRef::recipe(42), 3, 1).as_str(), "2FP");
        assert_eq!(generator.generate_code(&EntityRef::recipe(42), 4, 0).as_str(), "ibcq");
        assert_eq!(generator.generate_code(&EntityRef::recipe(1), 3, 0).as_str(), "rT9");
        assert_eq!(generator.generate_code(&EntityRef::recipe(7), 6, 2).as_str(), "umr4bJ");
        assert_eq!(
            generator.generate_code(&EntityRef::recipe(42), 10, 0).as_str(),
            "MN8Od5er7M"
        );
    }

    #[test]
    fn deterministic() {
        let generator = generator();
        let entity = EntityRef::recipe(1234);
        for length in MIN_LENGTH..=MAX_LENGTH {
            for seed in 0..=MAX_SEED {
                assert_eq!(
                    generator.generate_code(&entity, length, seed),
                    generator.generate_code(&entity, length, seed)
                );
            }
        }
    }

    #[test]
    fn full_recipe_and_bare_reference_agree() {
        let recipe = Recipe {
            id: 42,
            name: "Borscht".to_string(),
            author: "chef".to_string(),
            cooking_time: 90,
            components: vec![],
        };
        let generator = generator();
        assert_eq!(
            generator.generate_code(&recipe, 3, 0),
            generator.generate_code(&EntityRef::recipe(42), 3, 0)
        );
    }

    #[test]
    fn length_contract_and_alphabet_closure() {
        let generator = generator();
        for id in [0_u64, 1, 9, 42, 1_000, u64::MAX] {
            let entity = EntityRef::recipe(id);
            for length in MIN_LENGTH..=MAX_LENGTH {
                let code = generator.generate_code(&entity, length, 3);
                assert_eq!(code.len(), length, "id {id} length {length}");
                assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
            }
        }
    }

    #[test]
    fn first_seeds_give_distinct_codes() {
        let generator = generator();
        for id in [1_u64, 7, 42, 1_000, 123_456] {
            let entity = EntityRef::recipe(id);
            for length in MIN_LENGTH..=MAX_LENGTH {
                let codes: HashSet<_> = (0..=MAX_SEED)
                    .map(|seed| generator.generate_code(&entity, length, seed))
                    .collect();
                assert_eq!(codes.len(), (MAX_SEED + 1) as usize, "id {id} length {length}");
            }
        }
    }

    #[test]
    fn salt_length_counts_characters() {
        let generator =
            ShortCodeGenerator::new(GeneratorSettings::builder().salt("pâté").build()).unwrap();
        assert_eq!(generator.effective_seed(42, 0), 46);
        assert_eq!(generator.effective_seed(42, 3), 49);
    }

    #[test]
    fn kind_changes_the_code() {
        const USER: EntityKind = EntityKind::new("User");
        let generator = generator();
        assert_ne!(
            generator.generate_code(&EntityRef::new(USER, 42), 6, 0),
            generator.generate_code(&EntityRef::recipe(42), 6, 0)
        );
    }

    #[test]
    fn salt_changes_the_code() {
        let salted = ShortCodeGenerator::new(GeneratorSettings::builder().salt("pepper").build())
            .unwrap();
        assert_ne!(
            salted.generate_code(&EntityRef::recipe(42), 6, 0),
            generator().generate_code(&EntityRef::recipe(42), 6, 0)
        );
    }

    #[test]
    fn rejects_lengths_outside_code_bounds() {
        let too_short = GeneratorSettings::builder().min_length(2).build();
        assert!(matches!(
            ShortCodeGenerator::new(too_short),
            Err(GeneratorError::InvalidSettings(_))
        ));

        let too_long = GeneratorSettings::builder().max_length(11).build();
        assert!(ShortCodeGenerator::new(too_long).is_err());

        let inverted = GeneratorSettings::builder().min_length(6).max_length(5).build();
        assert!(ShortCodeGenerator::new(inverted).is_err());
    }
}
