//! Identifier name generation.
//!
//! A [`GeneratorSelector`] turns the configured token into one of five
//! [`IdentifierNamesGenerator`] implementations. Each generator owns the
//! [`NameSession`] for the run, which holds the [`NameRegistry`] of issued
//! names, the [`NameValidator`] and the [`RandomSource`].
//!
//! | token              | example names              |
//! |--------------------|----------------------------|
//! | `hexadecimal`      | `_0x3fa91c`, `_0x1b07e2`   |
//! | `dictionary`       | `amber`, `beacon`, `amber1`|
//! | `mangled`          | `a`, `b`, ..., `aa`, `ba`  |
//! | `mangled-shuffled` | `q`, `T`, ..., `qX`        |
//! | `keep-original`    | source names; `_3fa91c`    |

pub mod dictionary;
pub mod generator;
pub mod hexadecimal;
pub mod keep_original;
pub mod mangled;
pub mod mangled_shuffled;
pub mod random;
pub mod registry;
pub mod selector;
pub mod session;
pub mod validator;

pub use dictionary::DictionaryGenerator;
pub use generator::{GeneratorKind, IdentifierNamesGenerator, ScopeId};
pub use hexadecimal::HexadecimalGenerator;
pub use keep_original::KeepOriginalGenerator;
pub use mangled::MangledGenerator;
pub use mangled_shuffled::MangledShuffledGenerator;
pub use random::{RandomSource, SeededRandom};
pub use registry::NameRegistry;
pub use selector::GeneratorSelector;
pub use session::{join_prefix, NameSession};
pub use validator::{is_reserved_word, is_valid_identifier_grammar, NameValidator};
