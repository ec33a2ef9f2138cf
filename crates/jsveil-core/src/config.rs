use crate::error::{Error, Result};
use crate::names::validator::is_valid_identifier_grammar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default ceiling on invalid candidates before a generator gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;

/// Longest name length hint accepted by `nameLength`.
pub const MAX_NAME_LENGTH: usize = 64;

/// Runtime configuration for the jsveil CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = WARN, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Resolve a possibly relative path against the working directory.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Order in which the dictionary generator consumes its words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryOrder {
    #[default]
    Sequential,
    Random,
}

impl DictionaryOrder {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Random => "random",
        }
    }
}

/// Seed as written in a config file: either a number or free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    Number(u64),
    Text(String),
}

impl SeedValue {
    /// Collapse the seed into the `u64` fed to the random source.
    ///
    /// Numeric text is taken literally so `"42"` and `42` seed identically.
    #[must_use]
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(text) => text
                .trim()
                .parse::<u64>()
                .unwrap_or_else(|_| jsveil_util::hash::seed_from_text(text)),
        }
    }
}

/// Options that drive identifier name generation for one session.
///
/// Keys are camelCase in JSON to match the obfuscator's option names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameOptions {
    /// Generator token: `dictionary`, `hexadecimal`, `keep-original`,
    /// `mangled` or `mangled-shuffled`. Validated when the selector is built.
    pub identifier_names_generator: String,

    /// Prefix applied to every global-scope name.
    pub identifiers_prefix: String,

    /// Words for the dictionary generator. Empty means the bundled list.
    pub identifiers_dictionary: Vec<String>,

    pub dictionary_order: DictionaryOrder,

    /// Seed for reproducible output. `None` seeds from entropy.
    pub seed: Option<SeedValue>,

    /// Names that must never be generated and are never renamed.
    pub reserved_names: Vec<String>,

    /// Whether global-scope bindings are renamed by the planner.
    pub rename_globals: bool,

    pub max_attempts: u32,

    /// Preferred length for generators that honour one.
    pub name_length: Option<usize>,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            identifier_names_generator: "hexadecimal".to_string(),
            identifiers_prefix: String::new(),
            identifiers_dictionary: Vec::new(),
            dictionary_order: DictionaryOrder::default(),
            seed: None,
            reserved_names: Vec::new(),
            rename_globals: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            name_length: None,
        }
    }
}

impl NameOptions {
    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the generator token.
    #[must_use]
    pub fn with_generator(mut self, token: impl Into<String>) -> Self {
        self.identifier_names_generator = token.into();
        self
    }

    /// Set the global-scope prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifiers_prefix = prefix.into();
        self
    }

    /// Set a numeric seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(SeedValue::Number(seed));
        self
    }

    /// Set the dictionary word list.
    #[must_use]
    pub fn with_dictionary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers_dictionary = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dictionary consumption order.
    #[must_use]
    pub fn with_dictionary_order(mut self, order: DictionaryOrder) -> Self {
        self.dictionary_order = order;
        self
    }

    /// Set names that are never generated.
    #[must_use]
    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether global bindings are renamed.
    #[must_use]
    pub fn with_rename_globals(mut self, rename: bool) -> Self {
        self.rename_globals = rename;
        self
    }

    /// Set the invalid-candidate ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the preferred name length.
    #[must_use]
    pub fn with_name_length(mut self, length: usize) -> Self {
        self.name_length = Some(length);
        self
    }

    /// Check the options that can be rejected without building a generator.
    pub fn validate(&self) -> Result<()> {
        if !self.identifiers_prefix.is_empty()
            && !is_valid_identifier_grammar(&self.identifiers_prefix)
        {
            return Err(Error::InvalidPrefix {
                prefix: self.identifiers_prefix.clone(),
            });
        }

        if self.max_attempts == 0 {
            return Err(Error::InvalidOption {
                name: "maxAttempts",
                reason: "must be at least 1".to_string(),
            });
        }

        if let Some(length) = self.name_length {
            if !(1..=MAX_NAME_LENGTH).contains(&length) {
                return Err(Error::InvalidOption {
                    name: "nameLength",
                    reason: format!("must be between 1 and {MAX_NAME_LENGTH}"),
                });
            }
        }

        Ok(())
    }

    /// The seed as a `u64`, if one was configured.
    #[must_use]
    pub fn resolved_seed(&self) -> Option<u64> {
        self.seed.as_ref().map(SeedValue::to_u64)
    }
}
