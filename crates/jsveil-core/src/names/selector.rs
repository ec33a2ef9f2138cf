//! Resolves the configured generator token into a ready generator.

use super::dictionary::DictionaryGenerator;
use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::hexadecimal::HexadecimalGenerator;
use super::keep_original::KeepOriginalGenerator;
use super::mangled::MangledGenerator;
use super::mangled_shuffled::MangledShuffledGenerator;
use super::session::NameSession;
use crate::config::NameOptions;
use crate::error::Result;
use tracing::debug;

/// Holds the one generator a session uses, built eagerly.
///
/// Construction fails on an unknown token or invalid options, so a bad
/// configuration is reported before a single name is requested.
pub struct GeneratorSelector {
    kind: GeneratorKind,
    generator: Box<dyn IdentifierNamesGenerator>,
}

impl std::fmt::Debug for GeneratorSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSelector")
            .field("kind", &self.kind)
            .field("session", self.generator.session())
            .finish()
    }
}

impl GeneratorSelector {
    /// Resolve `options.identifier_names_generator` and build its session.
    pub fn from_options(options: &NameOptions) -> Result<Self> {
        let kind: GeneratorKind = options.identifier_names_generator.parse()?;
        let session = NameSession::from_options(options)?;
        Self::with_session(kind, session, options)
    }

    /// Resolve a bare token with default options.
    pub fn resolve(token: &str) -> Result<Self> {
        Self::from_options(&NameOptions::default().with_generator(token))
    }

    /// Build the generator for `kind` over an existing session.
    ///
    /// Only the dictionary settings are read from `options`.
    pub fn with_session(
        kind: GeneratorKind,
        session: NameSession,
        options: &NameOptions,
    ) -> Result<Self> {
        let generator: Box<dyn IdentifierNamesGenerator> = match kind {
            GeneratorKind::Dictionary => Box::new(DictionaryGenerator::new(
                session,
                &options.identifiers_dictionary,
                options.dictionary_order,
            )?),
            GeneratorKind::Hexadecimal => Box::new(HexadecimalGenerator::new(session)),
            GeneratorKind::KeepOriginal => Box::new(KeepOriginalGenerator::new(session)),
            GeneratorKind::Mangled => Box::new(MangledGenerator::new(session)),
            GeneratorKind::MangledShuffled => Box::new(MangledShuffledGenerator::new(session)),
        };

        debug!(generator = kind.as_str(), "resolved identifier names generator");
        Ok(Self { kind, generator })
    }

    #[must_use]
    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    #[must_use]
    pub fn generator(&self) -> &dyn IdentifierNamesGenerator {
        self.generator.as_ref()
    }

    pub fn generator_mut(&mut self) -> &mut dyn IdentifierNamesGenerator {
        self.generator.as_mut()
    }

    #[must_use]
    pub fn into_generator(self) -> Box<dyn IdentifierNamesGenerator> {
        self.generator
    }
}
