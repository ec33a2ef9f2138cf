//! Mangled names over alphabets shuffled once per session.

use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::mangled::{encode_name, FIRST_CHARS, REST_CHARS};
use super::session::NameSession;
use crate::error::Result;
use tracing::debug;

/// Same enumeration as the mangled generator, but each position draws from a
/// session-shuffled alphabet.
///
/// Names keep their shortest-first lengths while the order in which they are
/// assigned differs between runs, so two obfuscated builds don't diff cleanly.
#[derive(Debug)]
pub struct MangledShuffledGenerator {
    session: NameSession,
    first_chars: [u8; 52],
    rest_chars: [u8; 62],
    counter: usize,
}

impl MangledShuffledGenerator {
    #[must_use]
    pub fn new(mut session: NameSession) -> Self {
        let mut first_chars = *FIRST_CHARS;
        let mut rest_chars = *REST_CHARS;
        session.random().shuffle(&mut first_chars);
        session.random().shuffle(&mut rest_chars);

        debug!(
            first = %String::from_utf8_lossy(&first_chars),
            "shuffled mangled alphabet"
        );

        Self {
            session,
            first_chars,
            rest_chars,
            counter: 0,
        }
    }

    /// The shuffled first-position alphabet.
    #[must_use]
    pub fn first_chars(&self) -> &[u8] {
        &self.first_chars
    }

    /// The shuffled alphabet for subsequent positions.
    #[must_use]
    pub fn rest_chars(&self) -> &[u8] {
        &self.rest_chars
    }
}

impl IdentifierNamesGenerator for MangledShuffledGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::MangledShuffled
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
            first_chars,
            rest_chars,
            counter,
        } = self;

        session.generate_with(GeneratorKind::MangledShuffled.as_str(), |_| {
            let name = encode_name(*counter, &first_chars[..], &rest_chars[..]);
            *counter += 1;
            name
        })
    }
}
