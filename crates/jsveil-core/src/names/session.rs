//! Per-run state shared by every request a generator answers.

use super::random::{RandomSource, SeededRandom};
use super::registry::NameRegistry;
use super::validator::{is_well_formed, NameValidator};
use crate::config::{NameOptions, DEFAULT_MAX_ATTEMPTS};
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// Everything one obfuscation session needs to hand out unique names.
///
/// A session is moved into exactly one generator by the selector and dies
/// with it. Sessions never share state, so running one per worker thread
/// needs no locking.
pub struct NameSession {
    registry: NameRegistry,
    validator: NameValidator,
    random: Box<dyn RandomSource>,
    prefix: String,
    max_attempts: u32,
}

impl std::fmt::Debug for NameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameSession")
            .field("issued", &self.registry.len())
            .field("prefix", &self.prefix)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl NameSession {
    /// Empty session over the given random source, no prefix.
    #[must_use]
    pub fn new(random: impl RandomSource + 'static) -> Self {
        Self {
            registry: NameRegistry::new(),
            validator: NameValidator::new(),
            random: Box::new(random),
            prefix: String::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Deterministic session, mostly useful in tests and benchmarks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRandom::from_seed(seed))
    }

    /// Build a session from validated options.
    pub fn from_options(options: &NameOptions) -> Result<Self> {
        options.validate()?;

        let random = SeededRandom::new(options.resolved_seed());
        debug!(
            seed = ?random.seed(),
            prefix = %options.identifiers_prefix,
            max_attempts = options.max_attempts,
            reserved = options.reserved_names.len(),
            "creating name session"
        );

        Ok(Self::new(random)
            .with_prefix(options.identifiers_prefix.clone())
            .with_reserved_names(options.reserved_names.iter().cloned())
            .with_max_attempts(options.max_attempts))
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validator = NameValidator::with_reserved_names(names);
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    #[must_use]
    pub fn validator(&self) -> &NameValidator {
        &self.validator
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn random(&mut self) -> &mut dyn RandomSource {
        self.random.as_mut()
    }

    #[must_use]
    pub fn is_valid(&self, candidate: &str) -> bool {
        self.validator.is_valid(candidate, &self.registry)
    }

    /// Record a name as taken. Returns `true` if it was not taken before.
    pub fn reserve(&mut self, name: impl Into<String>) -> bool {
        self.registry.reserve(name)
    }

    /// Whether `candidate` was issued, preserved or reserved by configuration.
    #[must_use]
    pub fn is_taken(&self, candidate: &str) -> bool {
        self.validator.is_taken(candidate, &self.registry)
    }

    /// How many taken candidates one request may step past.
    ///
    /// Every taken name is in the registry or the configured reserved set, so
    /// a generator that never repeats a candidate meets at most that many.
    /// Random generators may redraw a taken name, which `max_attempts` more
    /// skips allow for.
    #[must_use]
    pub fn skip_budget(&self) -> usize {
        self.registry.len() + self.validator.reserved_count() + self.max_attempts as usize
    }

    /// Draw candidates until one is valid, reserve it and return it.
    ///
    /// Malformed candidates (bad grammar, reserved words) count toward
    /// `max_attempts`. Taken candidates are skipped against
    /// [`Self::skip_budget`] instead, so enumerating generators reach the
    /// next free name however many names before it are taken. Exceeding
    /// either bound is [`Error::GenerationExhausted`].
    pub fn generate_with<F>(&mut self, generator: &'static str, mut draw: F) -> Result<String>
    where
        F: FnMut(&mut Self) -> String,
    {
        let skip_budget = self.skip_budget();
        let mut tally = CandidateTally::default();

        loop {
            let candidate = draw(self);
            if !is_well_formed(&candidate) {
                trace!(generator, candidate = %candidate, "rejected malformed candidate");
                tally.rejected += 1;
            } else if self.is_taken(&candidate) {
                trace!(generator, candidate = %candidate, "skipped taken candidate");
                tally.skipped += 1;
            } else {
                trace!(generator, name = %candidate, drawn = tally.drawn(), "generated name");
                self.registry.reserve(candidate.clone());
                return Ok(candidate);
            }

            if tally.rejected >= self.max_attempts || tally.skipped > skip_budget {
                return Err(tally.exhausted(generator));
            }
        }
    }

    /// Join the configured prefix onto `name`.
    #[must_use]
    pub fn prefixed(&self, name: &str) -> String {
        join_prefix(&self.prefix, name)
    }
}

/// Counts of rejected and skipped candidates within one request.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CandidateTally {
    pub(crate) rejected: u32,
    pub(crate) skipped: usize,
}

impl CandidateTally {
    pub(crate) fn drawn(self) -> usize {
        self.rejected as usize + self.skipped
    }

    pub(crate) fn exhausted(self, generator: &'static str) -> Error {
        Error::GenerationExhausted {
            generator,
            attempts: u32::try_from(self.drawn()).unwrap_or(u32::MAX),
        }
    }
}

/// Concatenate `prefix` and `name`, collapsing a separator (`_` or `$`) that
/// both sides contribute at the junction.
#[must_use]
pub fn join_prefix(prefix: &str, name: &str) -> String {
    match (prefix.chars().last(), name.chars().next()) {
        (Some(last), Some(first)) if last == first && matches!(last, '_' | '$') => {
            format!("{prefix}{}", &name[first.len_utf8()..])
        }
        _ => format!("{prefix}{name}"),
    }
}
