use jsveil_core::GeneratorKind;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(Serialize)]
struct GeneratorEntry {
    token: &'static str,
    description: &'static str,
}

/// List the available identifier names generators.
pub fn run(json: bool) -> Result<()> {
    let entries: Vec<GeneratorEntry> = GeneratorKind::ALL
        .iter()
        .map(|kind| GeneratorEntry {
            token: kind.as_str(),
            description: kind.description(),
        })
        .collect();

    if json {
        let out = serde_json::json!({ "generators": entries });
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else {
        for entry in &entries {
            println!("  {:<18} {}", entry.token, entry.description);
        }
    }

    Ok(())
}
