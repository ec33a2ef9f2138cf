use jsveil_core::version::OUTPUT_SCHEMA_VERSION;
use jsveil_core::{GeneratorSelector, NameOptions, ScopeId};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::debug;

/// Which generator entry point a request goes through.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameKind {
    /// Top-level names, prefixed
    Global,
    /// Names for bindings in a nested scope
    #[default]
    Lexical,
    /// Statement label names
    Label,
}

#[derive(Serialize)]
struct NamesOutput<'a> {
    schema_version: u32,
    generator: &'a str,
    kind: NameKind,
    names: Vec<String>,
}

/// Generate `count` names of one kind and print them.
///
/// Labels default to `label0`, `label1`, ... unless `label` is given; with
/// `keep-original` every label comes back as written.
pub fn run(
    options: &NameOptions,
    kind: NameKind,
    count: usize,
    label: Option<&str>,
    scope: usize,
    json: bool,
) -> Result<()> {
    let mut selector = GeneratorSelector::from_options(options).into_diagnostic()?;
    let length = options.name_length;
    let gen = selector.generator_mut();

    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let name = match kind {
            NameKind::Global => gen.generate_for_global_scope(length),
            NameKind::Lexical => gen.generate_for_lexical_scope(ScopeId(scope), length),
            NameKind::Label => match label {
                Some(label) => gen.generate_for_label(label, length),
                None => gen.generate_for_label(&format!("label{i}"), length),
            },
        }
        .into_diagnostic()?;
        names.push(name);
    }
    debug!(count = names.len(), "generated names");

    if json {
        let output = NamesOutput {
            schema_version: OUTPUT_SCHEMA_VERSION,
            generator: selector.kind().as_str(),
            kind,
            names,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for name in &names {
            println!("{name}");
        }
    }

    Ok(())
}
