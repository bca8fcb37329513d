use crate::error::{GeneratorError, Result};
use crate::ShortCodeGenerator;
use foodgram_core::{CodeRegistry, Entity, EntityRef, ReadRegistry, ShortCode, StorageError};
use tracing::{debug, trace, warn};

/// One `(length, seed)` pair of the candidate walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub length: usize,
    pub seed: u64,
}

/// The bounded candidate walk: seeds up to the threshold at each length,
/// then one character more with the seed reset to zero.
#[derive(Debug, Clone)]
pub struct Attempts {
    next: Option<Attempt>,
    max_length: usize,
    max_seed: u64,
}

impl Attempts {
    pub(crate) fn new(start: Attempt, max_length: usize, max_seed: u64) -> Self {
        Self {
            next: (start.length <= max_length).then_some(start),
            max_length,
            max_seed,
        }
    }
}

impl Iterator for Attempts {
    type Item = Attempt;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current.seed < self.max_seed {
            Some(Attempt {
                length: current.length,
                seed: current.seed + 1,
            })
        } else if current.length < self.max_length {
            Some(Attempt {
                length: current.length + 1,
                seed: 0,
            })
        } else {
            None
        };
        Some(current)
    }
}

/// A code that no other entity of the same kind held when it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub code: ShortCode,
    /// Length the walk settled on. Callers use it to raise their floor.
    pub length: usize,
    pub seed: u64,
}

/// Outcome of [`ShortCodeGenerator::assign_unique_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// A fresh code was generated and persisted.
    Assigned(GeneratedCode),
    /// The entity already held a code; nothing was written.
    Existing(ShortCode),
}

impl Assignment {
    pub fn code(&self) -> &ShortCode {
        match self {
            Assignment::Assigned(generated) => &generated.code,
            Assignment::Existing(code) => code,
        }
    }

    pub fn into_code(self) -> ShortCode {
        match self {
            Assignment::Assigned(generated) => generated.code,
            Assignment::Existing(code) => code,
        }
    }
}

impl ShortCodeGenerator {
    /// Finds a code no entity of the same kind holds, checking each
    /// candidate with [`ReadRegistry::exists`].
    ///
    /// Starts at `length`/`seed`; fails with `InvalidSettings` if `length` is
    /// outside `MIN_LENGTH..=max_length` and with `GenerationExhausted` once
    /// the length cap is used up. The caller still has to persist the result and
    /// may lose a race doing so; [`Self::assign_unique_code`] does not.
    pub async fn generate_unique_code<E, R>(
        &self,
        entity: &E,
        registry: &R,
        length: usize,
        seed: u64,
    ) -> Result<GeneratedCode>
    where
        E: Entity + ?Sized + Sync,
        R: ReadRegistry + ?Sized,
    {
        self.check_length(length)?;
        let kind = entity.kind();
        for attempt in self.attempts(length, seed) {
            let code = self.generate_code(entity, attempt.length, attempt.seed);
            trace!(%code, length = attempt.length, seed = attempt.seed, "checking candidate");

            if !registry.exists(kind, &code).await? {
                return Ok(self.settled(entity, code, attempt, length));
            }
            debug!(%code, entity_id = entity.id(), "short code collision");
        }

        Err(self.exhausted(entity))
    }

    /// Generates and persists a unique code in one walk.
    ///
    /// Each candidate goes straight to [`CodeRegistry::persist`]; a `Conflict`
    /// from the registry is the collision signal and moves on to the next
    /// candidate. If the entity already holds a code, that code is returned.
    /// The starting `length` is checked like in [`Self::generate_unique_code`].
    pub async fn assign_unique_code<E, R>(
        &self,
        entity: &E,
        registry: &R,
        length: usize,
        seed: u64,
    ) -> Result<Assignment>
    where
        E: Entity + ?Sized + Sync,
        R: CodeRegistry + ?Sized,
    {
        self.check_length(length)?;
        let kind = entity.kind();
        let id = entity.id();
        for attempt in self.attempts(length, seed) {
            let code = self.generate_code(entity, attempt.length, attempt.seed);
            trace!(%code, length = attempt.length, seed = attempt.seed, "persisting candidate");

            match registry.persist(kind, id, &code).await {
                Ok(()) => {
                    return Ok(Assignment::Assigned(
                        self.settled(entity, code, attempt, length),
                    ))
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(%code, entity_id = id, "short code collision");
                }
                Err(StorageError::AlreadyAssigned { .. }) => {
                    let existing = registry.code_of(kind, id).await?.ok_or_else(|| {
                        StorageError::InvalidData(format!(
                            "{} reported as assigned but holds no code",
                            EntityRef::new(kind, id)
                        ))
                    })?;
                    debug!(code = %existing, entity_id = id, "entity already holds a code");
                    return Ok(Assignment::Existing(existing));
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(self.exhausted(entity))
    }

    fn settled<E: Entity + ?Sized>(
        &self,
        entity: &E,
        code: ShortCode,
        attempt: Attempt,
        requested_length: usize,
    ) -> GeneratedCode {
        if attempt.length > requested_length {
            warn!(
                entity_id = entity.id(),
                from = requested_length,
                to = attempt.length,
                "short code length grew after repeated collisions"
            );
        }
        GeneratedCode {
            code,
            length: attempt.length,
            seed: attempt.seed,
        }
    }

    fn exhausted<E: Entity + ?Sized>(&self, entity: &E) -> GeneratorError {
        let entity = EntityRef::new(entity.kind(), entity.id());
        warn!(%entity, max_length = self.max_length(), "short code generation exhausted");
        GeneratorError::GenerationExhausted {
            entity: entity.to_string(),
            max_length: self.max_length(),
        }
    }
}
