//! Random hexadecimal names: `_0x3fa91c`.

use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::random::RandomSource;
use super::session::NameSession;
use crate::config::MAX_NAME_LENGTH;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use std::fmt::Write;
use tracing::debug;

/// Digits emitted when the caller gives no length hint.
pub const DEFAULT_NAME_LENGTH: usize = 6;

const RANGE_MIN_INTEGER: u64 = 10_000;
const RANGE_MAX_INTEGER: u64 = 99_999_999;

/// Exactly `length` lowercase hex digits built from random integers.
pub(crate) fn random_hex_digits(random: &mut dyn RandomSource, length: usize) -> String {
    let mut digits = String::with_capacity(length + 8);
    while digits.len() < length {
        let value = random.random_integer(RANGE_MIN_INTEGER, RANGE_MAX_INTEGER);
        let _ = write!(digits, "{value:x}");
    }
    digits.truncate(length);
    digits
}

/// Widths in use for hex-style names, keyed by the requested width.
///
/// The requested length is a hint: once the retry budget can no longer find a
/// free name of that width, the width grows by one digit and stays grown for
/// later requests of the same length.
#[derive(Debug, Default)]
pub(crate) struct HexWidths {
    widened: FxHashMap<usize, usize>,
}

impl HexWidths {
    /// `lead` followed by hex digits, reserved in `session`.
    pub(crate) fn generate(
        &mut self,
        session: &mut NameSession,
        generator: &'static str,
        lead: &str,
        length: Option<usize>,
    ) -> Result<String> {
        let requested = length
            .unwrap_or(DEFAULT_NAME_LENGTH)
            .clamp(1, MAX_NAME_LENGTH);
        let mut width = self.widened.get(&requested).copied().unwrap_or(requested);

        loop {
            let result = session.generate_with(generator, |session| {
                format!("{lead}{}", random_hex_digits(session.random(), width))
            });
            match result {
                Err(Error::GenerationExhausted { .. }) if width < MAX_NAME_LENGTH => {
                    width += 1;
                    debug!(generator, requested, width, "hex names exhausted at this width, widening");
                    self.widened.insert(requested, width);
                }
                result => return result,
            }
        }
    }
}

/// Names of the form `_0x` followed by random hex digits.
///
/// The `_0x` lead keeps the name grammatical whatever digits follow.
/// Collisions are rare and simply redrawn.
#[derive(Debug)]
pub struct HexadecimalGenerator {
    session: NameSession,
    widths: HexWidths,
}

impl HexadecimalGenerator {
    #[must_use]
    pub fn new(session: NameSession) -> Self {
        Self {
            session,
            widths: HexWidths::default(),
        }
    }
}

impl IdentifierNamesGenerator for HexadecimalGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Hexadecimal
    }

    fn session(&self) -> &NameSession {
        &self.session
    }

    fn session_mut(&mut self) -> &mut NameSession {
        &mut self.session
    }

    /// `_0x` plus `length` hex digits (6 by default), wider once that width
    /// runs out.
    fn generate_next(&mut self, length: Option<usize>) -> Result<String> {
        let Self { session, widths } = self;
        widths.generate(session, GeneratorKind::Hexadecimal.as_str(), "_0x", length)
    }
}
