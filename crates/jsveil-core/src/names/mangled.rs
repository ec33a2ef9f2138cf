//! Shortest-first names: `a`, `b`, ..., `Z`, `aa`, `ba`, ...

use super::generator::{GeneratorKind, IdentifierNamesGenerator};
use super::session::NameSession;
use crate::error::Result;

/// Characters used for the first position of generated names.
pub const FIRST_CHARS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Characters used for subsequent positions (includes digits).
pub const REST_CHARS: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Map a counter onto the enumeration over the given alphabets.
///
/// Every `n` maps to a distinct name and shorter names come first; the first
/// character varies fastest.
#[must_use]
pub fn encode_name(mut n: usize, first_chars: &[u8], rest_chars: &[u8]) -> String {
    let first_len = first_chars.len();
    let rest_len = rest_chars.len();

    let first_idx = n % first_len;
    n /= first_len;

    let mut name = String::with_capacity(4);
    name.push(first_chars[first_idx] as char);

    while n > 0 {
        n -= 1; // Make it 0-based for this digit
        name.push(rest_chars[n % rest_len] as char);
        n /= rest_len;
    }

    name
}

/// Emits the shortest unused identifier, in a fixed order.
///
/// The counter is per session and only moves forward, so the output is
/// deterministic for a given sequence of requests. Reserved words and names
/// already taken are skipped. Length hints are ignored.
#[derive(Debug)]
pub struct MangledGenerator {
    session: NameSession,
    counter: usize,
}

impl MangledGenerator {
    #[must_use]
    pub fn new(session: NameSession) -> Self {
        Self {
            session,
            counter: 0,
        }
    }
}

impl IdentifierNamesGenerator for MangledGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Mangled
    }

    fn session(&self) -> &NameSession {
        &self.session
    }

    fn session_mut(&mut self) -> &mut NameSession {
        &mut self.session
    }

    fn generate_next(&mut self, _length: Option<usize>) -> Result<String> {
        let Self { session, counter } = self;
        session.generate_with(GeneratorKind::Mangled.as_str(), |_| {
            let name = encode_name(*counter, FIRST_CHARS, REST_CHARS);
            *counter += 1;
            name
        })
    }
}
