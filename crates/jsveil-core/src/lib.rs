#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod names;
pub mod plan;
pub mod version;

pub use config::{Config, DictionaryOrder, NameOptions, SeedValue};
pub use error::{Error, Result};
pub use names::{
    GeneratorKind, GeneratorSelector, IdentifierNamesGenerator, NameSession, ScopeId,
};
pub use plan::{plan, PlanOptions, ProgramInput, RenamePlan, ScopeKind, ScopeTree};
pub use version::VERSION;
