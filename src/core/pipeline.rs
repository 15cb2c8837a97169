/// The main generation pipeline: collaborator sampling, race filtering,
/// augmentation, and history bookkeeping.
///
/// Wires together the external generator seam, the rejection loop over
/// the race allow-list, the augmentation overlay, and the session
/// history.
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::core::augment::augment;
use crate::core::catalog::{CatalogError, Catalogs};
use crate::core::history::SessionHistory;
use crate::core::share;
use crate::schema::character::Character;
use crate::schema::options::GenerateOptions;
use crate::schema::record::{GeneratedRecord, IdSource, UuidIds};
use chrono::Utc;

/// Errors surfaced by the generator collaborator itself. The foundry
/// does not interpret these; they propagate to the caller unchanged.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Output of one collaborator invocation. `debug_info` is a diagnostic
/// rendering of the collaborator's decision tree, logged when present.
pub struct GeneratorOutput {
    pub character: Character,
    pub debug_info: Option<String>,
}

/// The external character generator seam. Invoked synchronously on
/// every sampling attempt; implementations are expected to be cheap
/// enough that the rejection loop cannot visibly stall the caller.
pub trait CharacterSource {
    fn generate(&mut self, options: &GenerateOptions) -> Result<GeneratorOutput, GeneratorError>;
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("generator error: {0}")]
    Generator(GeneratorError),
    #[error("no character with an allowed race after {0} attempts")]
    NoAllowedRace(u32),
}

const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// The top-level generation pipeline. Built via [`Foundry::builder`].
pub struct Foundry<G> {
    generator: G,
    catalogs: Catalogs,
    allowed_races: FxHashSet<String>,
    ids: Box<dyn IdSource>,
    rng: StdRng,
    max_attempts: u32,
    history: SessionHistory,
}

/// Builder for constructing a [`Foundry`].
pub struct FoundryBuilder<G> {
    generator: G,
    catalogs: Option<Catalogs>,
    catalogs_path: Option<PathBuf>,
    seed: Option<u64>,
    max_attempts: u32,
    ids: Option<Box<dyn IdSource>>,
}

impl<G: CharacterSource> Foundry<G> {
    pub fn builder(generator: G) -> FoundryBuilder<G> {
        FoundryBuilder {
            generator,
            catalogs: None,
            catalogs_path: None,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            ids: None,
        }
    }

    /// Generate a fresh record.
    ///
    /// Samples the collaborator until it produces a character whose race
    /// (lowercased) is in the allow-list, merges augmentation fields
    /// into the accepted character (last writer wins), stamps a fresh id
    /// and `created_at`, and appends the record to the session history.
    ///
    /// Collaborator failures propagate immediately; they are fatal to
    /// this generation attempt, not to the foundry.
    pub fn generate(
        &mut self,
        options: &GenerateOptions,
    ) -> Result<GeneratedRecord, PipelineError> {
        let output = self.sample_allowed(options)?;
        if let Some(debug_info) = &output.debug_info {
            debug!("generator debug info: {debug_info}");
        }

        let mut character = output.character;
        let augmentation = augment(&mut self.rng, &self.catalogs, options.blood_roll);
        character.overlay(augmentation.to_fields());

        let record = GeneratedRecord {
            id: self.ids.next_id(),
            character,
            created_at: Some(Utc::now()),
        };
        self.history.push(record.clone());
        Ok(record)
    }

    /// Page-load flow: restore the record carried by `query` if its
    /// share payload decodes, otherwise generate fresh. Restored records
    /// are not appended to the history.
    pub fn load_or_generate(
        &mut self,
        query: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedRecord, PipelineError> {
        if let Some(restored) = share::from_query(query) {
            return Ok(restored);
        }
        self.generate(options)
    }

    /// Records generated this session, oldest first.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    fn sample_allowed(
        &mut self,
        options: &GenerateOptions,
    ) -> Result<GeneratorOutput, PipelineError> {
        for attempt in 1..=self.max_attempts {
            let output = self
                .generator
                .generate(options)
                .map_err(PipelineError::Generator)?;

            match output.character.race() {
                Some(race) if self.allowed_races.contains(&race.to_lowercase()) => {
                    debug!(attempt, race, "accepted generated character");
                }
                Some(race) => {
                    debug!(attempt, race, "rejected character: race outside the allow-list");
                    continue;
                }
                None => {
                    debug!(attempt, "rejected character: no race field");
                    continue;
                }
            }
            return Ok(output);
        }
        Err(PipelineError::NoAllowedRace(self.max_attempts))
    }
}

impl<G: CharacterSource> FoundryBuilder<G> {
    /// Seed the pipeline's RNG for deterministic augmentation draws.
    /// Without a seed the RNG is initialized from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound on collaborator invocations per `generate` call.
    ///
    /// The rejection loop terminates only probabilistically; if the
    /// allow-list ever becomes disjoint from the collaborator's output
    /// space, this bound is what turns an infinite loop into
    /// [`PipelineError::NoAllowedRace`].
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Provide catalogs directly (for testing without files).
    pub fn with_catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    /// Load catalog overrides from a RON file at build time. Takes
    /// precedence over `with_catalogs`.
    pub fn catalogs_from_ron(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalogs_path = Some(path.into());
        self
    }

    /// Provide an id source (for deterministic tests).
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    pub fn build(self) -> Result<Foundry<G>, PipelineError> {
        let catalogs = match self.catalogs_path {
            Some(path) => Catalogs::load_from_ron(&path)?,
            None => self.catalogs.unwrap_or_default(),
        };
        catalogs.validate()?;
        let allowed_races = catalogs.allowed_races();

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Foundry {
            generator: self.generator,
            catalogs,
            allowed_races,
            ids: self.ids.unwrap_or_else(|| Box::new(UuidIds)),
            rng,
            max_attempts: self.max_attempts,
            history: SessionHistory::new(),
        })
    }
}
