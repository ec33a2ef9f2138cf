//! Names drawn from a word list.

use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::session::NameSession;
use super::validator::{is_identifier_part, is_identifier_start};
use crate::config::DictionaryOrder;
use crate::error::{Error, Result};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// Words used when no identifiers dictionary is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "alpha", "amber", "anchor", "apex", "arrow", "aspen", "atlas", "aurora", "badge", "basil",
    "beacon", "birch", "bison", "blaze", "bloom", "breeze", "brook", "cable", "cactus", "canyon",
    "cedar", "cinder", "citrus", "cobalt", "comet", "coral", "crest", "crystal", "dawn", "delta",
    "drift", "dune", "ember", "falcon", "fern", "fjord", "flint", "forest", "frost", "galaxy",
    "garnet", "glacier", "granite", "harbor", "hazel", "heron", "horizon", "indigo", "iris",
    "ivory", "jade", "jasper", "juniper", "kestrel", "lagoon", "lantern", "larch", "lotus",
    "lunar", "magnet", "maple", "marble", "meadow", "meteor", "mist", "nebula", "nectar", "nova",
    "oasis", "onyx", "orbit", "otter", "pebble", "pepper", "pixel", "plume", "prism", "quartz",
    "quill", "raven", "reef", "ridge", "river", "saffron", "sage", "sierra", "solar", "spruce",
    "summit", "tango", "thistle", "tundra", "umber", "valley", "velvet", "willow", "zenith",
    "zephyr",
];

/// Turn a dictionary entry into an identifier, or `None` if nothing usable
/// remains.
///
/// Runs of non-identifier characters split the entry into words that are
/// joined in camelCase; a leading digit is guarded with `_`.
#[must_use]
pub fn normalize_word(entry: &str) -> Option<String> {
    let mut name = String::with_capacity(entry.len() + 1);
    let mut capitalize_next = false;

    for ch in entry.trim().chars() {
        if !is_identifier_part(ch) {
            capitalize_next = !name.is_empty();
            continue;
        }
        if name.is_empty() && !is_identifier_start(ch) {
            name.push('_');
        }
        if capitalize_next {
            name.push(ch.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            name.push(ch);
        }
    }

    (!name.is_empty()).then_some(name)
}

/// Draws words from a fixed list, sequentially or at random.
///
/// Each word is issued bare once; after the list runs out it is recycled with
/// a numeric suffix that grows every round (`word1`, then `word2`, ...).
#[derive(Debug)]
pub struct DictionaryGenerator {
    session: NameSession,
    words: Vec<String>,
    order: DictionaryOrder,
    /// Indices of words not yet drawn this round, in reverse order.
    remaining: Vec<usize>,
    round: u32,
}

impl DictionaryGenerator {
    /// Build from raw entries; an empty list selects [`DEFAULT_WORDS`].
    pub fn new(session: NameSession, entries: &[String], order: DictionaryOrder) -> Result<Self> {
        let words = if entries.is_empty() {
            normalize_entries(DEFAULT_WORDS.iter().copied())
        } else {
            normalize_entries(entries.iter().map(String::as_str))
        };

        if words.is_empty() {
            return Err(Error::InvalidOption {
                name: "identifiersDictionary",
                reason: "contains no word usable as an identifier".to_string(),
            });
        }

        debug!(words = words.len(), order = order.as_str(), "loaded identifiers dictionary");

        let remaining = (0..words.len()).rev().collect();
        Ok(Self {
            session,
            words,
            order,
            remaining,
            round: 0,
        })
    }

    /// The normalised word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// How many times the list has been recycled.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }
}

fn normalize_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    entries
        .filter_map(normalize_word)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

impl IdentifierNamesGenerator for DictionaryGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dictionary
    }

    fn session(&self) -> &NameSession {
        &self.session
    }

    fn session_mut(&mut self) -> &mut NameSession {
        &mut self.session
    }

    fn generate_next(&mut self, _length: Option<usize>) -> Result<String> {
        let Self {
            session,
            words,
            order,
            remaining,
            round,
        } = self;

        session.generate_with(GeneratorKind::Dictionary.as_str(), |session| {
            if remaining.is_empty() {
                *round += 1;
                remaining.extend((0..words.len()).rev());
                warn!(
                    words = words.len(),
                    suffix = *round,
                    "identifiers dictionary exhausted, recycling words with a numeric suffix"
                );
            }

            let index = match order {
                DictionaryOrder::Sequential => remaining.pop(),
                DictionaryOrder::Random => {
                    let pick = session.random().random_integer(0, remaining.len() as u64 - 1);
                    Some(remaining.swap_remove(pick as usize))
                }
            };
            // `remaining` was refilled above, so there is always an index
            let word = index.map_or("", |i| words[i].as_str());

            if *round == 0 {
                word.to_string()
            } else {
                format!("{word}{round}")
            }
        })
    }
}
