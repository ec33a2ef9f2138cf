//! The generator behind `keep-original`.
//!
//! With this strategy selected, source identifiers keep their names: the
//! rename planner preserves them instead of asking for replacements. The
//! generator still has to mint names for helpers the obfuscator introduces
//! itself (a string-array accessor has no original name to keep), and those
//! come out as `_` followed by random hex digits.

use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::hexadecimal::HexWidths;
use super::session::NameSession;
use crate::error::Result;

#[derive(Debug)]
pub struct KeepOriginalGenerator {
    session: NameSession,
    widths: HexWidths,
}

impl KeepOriginalGenerator {
    #[must_use]
    pub fn new(session: NameSession) -> Self {
        Self {
            session,
            widths: HexWidths::default(),
        }
    }
}

impl IdentifierNamesGenerator for KeepOriginalGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::KeepOriginal
    }

    fn session(&self) -> &NameSession {
        &self.session
    }

    fn session_mut(&mut self) -> &mut NameSession {
        &mut self.session
    }

    /// `_` plus exactly `length` hex digits (6 by default).
    fn generate_next(&mut self, length: Option<usize>) -> Result<String> {
        let Self { session, widths } = self;
        widths.generate(session, GeneratorKind::KeepOriginal.as_str(), "_", length)
    }

    /// Labels are never renamed under this strategy.
    fn generate_for_label(&mut self, label: &str, _length: Option<usize>) -> Result<String> {
        self.session.reserve(label);
        Ok(label.to_string())
    }
}
