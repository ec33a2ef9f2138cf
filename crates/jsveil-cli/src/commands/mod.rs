pub mod generators;
pub mod names;
pub mod plan;
pub mod version;

use jsveil_core::{Config, NameOptions, SeedValue};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// Generator flags shared by `names` and `plan`. Flags override the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Identifier names generator (see `jsveil generators`)
    #[arg(long, short = 'g', env = "JSVEIL_GENERATOR")]
    pub generator: Option<String>,

    /// JSON file with name options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prefix for global-scope names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Seed for reproducible output (integer or any text)
    #[arg(long)]
    pub seed: Option<String>,

    /// Preferred name length for hexadecimal-style generators
    #[arg(long)]
    pub length: Option<usize>,

    /// Names that must never be generated (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub reserved: Vec<String>,

    /// Words for the dictionary generator (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub dictionary: Vec<String>,
}

impl GeneratorArgs {
    /// Config file (if any) with command-line overrides applied.
    pub fn to_options(&self, config: &Config) -> Result<NameOptions> {
        let mut options = match &self.config {
            Some(path) => NameOptions::load(&config.resolve_path(path)).into_diagnostic()?,
            None => NameOptions::default(),
        };

        if let Some(generator) = &self.generator {
            options.identifier_names_generator.clone_from(generator);
        }
        if let Some(prefix) = &self.prefix {
            options.identifiers_prefix.clone_from(prefix);
        }
        if let Some(seed) = &self.seed {
            options.seed = Some(SeedValue::Text(seed.clone()));
        }
        if self.length.is_some() {
            options.name_length = self.length;
        }
        options
            .reserved_names
            .extend(self.reserved.iter().cloned());
        if !self.dictionary.is_empty() {
            options.identifiers_dictionary.clone_from(&self.dictionary);
        }

        Ok(options)
    }
}
