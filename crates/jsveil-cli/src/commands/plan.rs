use jsveil_core::plan::{plan, PlanOptions, ProgramInput, RenamePlan};
use jsveil_core::version::OUTPUT_SCHEMA_VERSION;
use jsveil_core::{GeneratorSelector, NameOptions};
use jsveil_util::hash::blake3_file;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Serialize)]
struct PlanOutput<'a> {
    schema_version: u32,
    /// BLAKE3 of the scope description the plan was computed from.
    input_hash: String,
    seed: Option<u64>,
    renamed: usize,
    #[serde(flatten)]
    plan: &'a RenamePlan,
}

/// Compute and print the rename plan for the scopes described in `input`.
pub fn run(input: &Path, options: &NameOptions, json: bool) -> Result<()> {
    let program = ProgramInput::load(input).into_diagnostic()?;
    let input_hash = blake3_file(input).into_diagnostic()?;

    let mut selector = GeneratorSelector::from_options(options).into_diagnostic()?;
    let plan_options = PlanOptions::from_name_options(options)
        .with_internal_names(program.internal_names.iter().cloned());
    let plan = plan(&program.to_tree(), selector.generator_mut(), &plan_options)
        .into_diagnostic()?;

    if json {
        let output = PlanOutput {
            schema_version: OUTPUT_SCHEMA_VERSION,
            input_hash,
            seed: options.resolved_seed(),
            renamed: plan.renamed_count(),
            plan: &plan,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_human(&plan, &input_hash)?;
    }

    Ok(())
}

fn print_human(plan: &RenamePlan, input_hash: &str) -> Result<()> {
    let mut out = io::stdout().lock();

    w(&mut out, &format!("generator: {}\n", plan.generator))?;
    w(&mut out, &format!("input:     {input_hash}\n"))?;
    w(&mut out, &format!("renamed:   {}\n", plan.renamed_count()))?;

    for scope in &plan.scopes {
        if scope.bindings.is_empty() && scope.labels.is_empty() {
            continue;
        }
        w(&mut out, &format!("\nscope {} ({:?})\n", scope.scope.0, scope.kind))?;
        for (from, to) in &scope.bindings {
            let note = if from == to { "  (kept)" } else { "" };
            w(&mut out, &format!("  {from} -> {to}{note}\n"))?;
        }
        for (from, to) in &scope.labels {
            w(&mut out, &format!("  {from}: -> {to}:\n"))?;
        }
    }

    if !plan.internal.is_empty() {
        w(&mut out, "\ninternal\n")?;
        for (helper, name) in &plan.internal {
            w(&mut out, &format!("  {helper} -> {name}\n"))?;
        }
    }

    Ok(())
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
