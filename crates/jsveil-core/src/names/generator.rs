//! The contract every identifier names generator implements.

use super::session::{CandidateTally, NameSession};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five generator strategies, named by their configuration tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    Dictionary,
    Hexadecimal,
    KeepOriginal,
    Mangled,
    MangledShuffled,
}

impl GeneratorKind {
    /// Every generator, in token order.
    pub const ALL: [Self; 5] = [
        Self::Dictionary,
        Self::Hexadecimal,
        Self::KeepOriginal,
        Self::Mangled,
        Self::MangledShuffled,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Hexadecimal => "hexadecimal",
            Self::KeepOriginal => "keep-original",
            Self::Mangled => "mangled",
            Self::MangledShuffled => "mangled-shuffled",
        }
    }

    /// One-line description for `jsveil generators`.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Dictionary => "words from the identifiers dictionary, suffixed once exhausted",
            Self::Hexadecimal => "random `_0x`-prefixed hexadecimal names",
            Self::KeepOriginal => "keep source names; hexadecimal names for internal helpers",
            Self::Mangled => "shortest unused names: a, b, ..., Z, aa, ba, ...",
            Self::MangledShuffled => "mangled names over a per-session shuffled alphabet",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == token)
            .ok_or_else(|| Error::UnknownGenerator {
                token: token.to_string(),
            })
    }
}

/// Opaque reference to a lexical scope owned by the caller.
///
/// Generators may key per-scope state on it; they never dereference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub usize);

/// Produces fresh, valid, session-unique identifier names.
///
/// Implementors provide [`generate_next`](Self::generate_next) and access to
/// their [`NameSession`]; the remaining operations have shared behaviour
/// that a strategy overrides only when it has to.
pub trait IdentifierNamesGenerator: Send {
    fn kind(&self) -> GeneratorKind;

    fn session(&self) -> &NameSession;

    fn session_mut(&mut self) -> &mut NameSession;

    /// A fresh name from the strategy's own algorithm, already reserved.
    ///
    /// `length` is a hint; strategies that don't produce fixed-width names
    /// ignore it.
    fn generate_next(&mut self, length: Option<usize>) -> Result<String>;

    /// A fresh name carrying the configured prefix.
    ///
    /// The prefixed form is checked and reserved as well, so it can't collide
    /// with a name generated later.
    fn generate_for_global_scope(&mut self, length: Option<usize>) -> Result<String> {
        let max_attempts = self.session().max_attempts();
        let skip_budget = self.session().skip_budget();
        let mut tally = CandidateTally::default();

        loop {
            let base = self.generate_next(length)?;
            let session = self.session_mut();
            let name = session.prefixed(&base);

            if name == base {
                return Ok(name);
            }
            if session.is_valid(&name) {
                session.reserve(name.clone());
                return Ok(name);
            }

            // A prefix can still spell a keyword (`i` + `f`)
            if session.is_taken(&name) {
                tally.skipped += 1;
            } else {
                tally.rejected += 1;
            }
            if tally.rejected >= max_attempts || tally.skipped > skip_budget {
                return Err(tally.exhausted(self.kind().as_str()));
            }
        }
    }

    /// A fresh name for a binding declared in `scope`.
    fn generate_for_lexical_scope(
        &mut self,
        _scope: ScopeId,
        length: Option<usize>,
    ) -> Result<String> {
        self.generate_next(length)
    }

    /// A fresh name for the statement label `label`.
    fn generate_for_label(&mut self, _label: &str, length: Option<usize>) -> Result<String> {
        self.generate_next(length)
    }

    /// Mark a name the caller keeps verbatim so nothing generated shadows it.
    fn preserve_name(&mut self, name: &str) {
        self.session_mut().reserve(name);
    }

    /// Whether `name` could be handed out right now.
    fn is_valid_identifier_name(&self, name: &str) -> bool {
        self.session().is_valid(name)
    }
}
