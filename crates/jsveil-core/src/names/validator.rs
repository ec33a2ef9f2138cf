//! Identifier grammar and reserved-word checks for generated names.
//!
//! Generated names are restricted to the ASCII subset of the JavaScript
//! identifier grammar: `[A-Za-z_$][A-Za-z0-9_$]*`.

use super::registry::NameRegistry;
use rustc_hash::FxHashSet;

/// Characters allowed in the first position of an identifier.
#[must_use]
pub fn is_identifier_start(ch: char) -> bool {
    matches!(ch, 'a'..='z' | 'A'..='Z' | '_' | '$')
}

/// Characters allowed after the first position of an identifier.
#[must_use]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// Whether `name` matches the identifier grammar. Reserved words pass this
/// check; use [`is_reserved_word`] for those.
#[must_use]
pub fn is_valid_identifier_grammar(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Keywords, future reserved words, literals and the globals that can't be
/// rebound in strict code.
#[must_use]
pub fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "do" | "if" | "in" | "for" | "let" | "new" | "try" | "var" | "case" | "else" | "enum"
            | "eval" | "null" | "this" | "true" | "void" | "with" | "await" | "break"
            | "catch" | "class" | "const" | "false" | "super" | "throw" | "while" | "yield"
            | "delete" | "export" | "import" | "public" | "return" | "static" | "switch"
            | "typeof" | "default" | "extends" | "finally" | "package" | "private"
            | "continue" | "debugger" | "function" | "arguments" | "interface"
            | "protected" | "implements" | "instanceof" | "undefined" | "NaN" | "Infinity"
    )
}

/// Decides whether a candidate may be handed out in the current session.
///
/// A candidate is valid when it matches the identifier grammar, is not a
/// reserved word, is not a user-reserved name, and has not been issued or
/// preserved in the session's [`NameRegistry`].
#[derive(Debug, Clone, Default)]
pub struct NameValidator {
    reserved_names: FxHashSet<String>,
}

impl NameValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that additionally rejects the given user-reserved names.
    #[must_use]
    pub fn with_reserved_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` was reserved by configuration.
    #[must_use]
    pub fn is_reserved_name(&self, name: &str) -> bool {
        self.reserved_names.contains(name)
    }

    #[must_use]
    pub fn reserved_count(&self) -> usize {
        self.reserved_names.len()
    }

    /// User-reserved names, in no particular order.
    pub fn reserved_names(&self) -> impl Iterator<Item = &str> {
        self.reserved_names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_valid(&self, candidate: &str, registry: &NameRegistry) -> bool {
        is_well_formed(candidate) && !self.is_taken(candidate, registry)
    }

    /// Whether `candidate` is already spoken for, either by configuration or
    /// by the registry. The set of such names is finite, so
    /// an enumerating generator can always step past them.
    #[must_use]
    pub fn is_taken(&self, candidate: &str, registry: &NameRegistry) -> bool {
        self.is_reserved_name(candidate) || registry.contains(candidate)
    }
}

/// Grammatical and not a reserved word.
#[must_use]
pub fn is_well_formed(candidate: &str) -> bool {
    is_valid_identifier_grammar(candidate) && !is_reserved_word(candidate)
}
