use crate::cli::{Cli, Commands};
use benefit_inputs::domain::config::PipelineConfig;
use benefit_inputs::domain::models::{
    CanonicalSchema, DeriveSummary, SyncMode, WorkflowReport, WrittenArtifact,
};
use benefit_inputs::services::assembler::derive_inputs;
use benefit_inputs::services::docs::{benefit_slug, generate_documentation};
use benefit_inputs::services::form::FormGenerator;
use benefit_inputs::services::output::{print_one, print_status, warning_lines};
use benefit_inputs::services::storage::{read_json, write_json, write_text};
use benefit_inputs::services::sync::validate_form_sync;
use std::path::{Path, PathBuf};

const DOCS_FILE_NAME: &str = "inputs.md";

/// `None` when the command belongs to another handler, otherwise whether the
/// run passed.
pub fn handle_pipeline_commands(
    cli: &Cli,
    config: &PipelineConfig,
) -> anyhow::Result<Option<bool>> {
    match &cli.command {
        Commands::Derive { benefit, output } => {
            let (schema, diagnostics) = derive_inputs(benefit, config)?;
            write_json(output, &schema)?;
            let summary = DeriveSummary {
                benefit: schema.benefit.clone(),
                output: output.display().to_string(),
                documents: schema.metadata.total_documents,
                person_fields: schema.required_inputs.person.keys().cloned().collect(),
                situation_fields: schema.required_inputs.situation.keys().cloned().collect(),
                warnings: diagnostics.messages(),
            };
            print_one(cli.json, summary, |s| {
                let mut lines = vec![
                    format!("derived inputs for {} ({} documents)", s.benefit, s.documents),
                    format!("person fields: {}", s.person_fields.join(", ")),
                    format!("situation fields: {}", s.situation_fields.join(", ")),
                    format!("wrote {}", s.output),
                ];
                lines.extend(warning_lines(&s.warnings));
                lines.join("\n")
            })?;
        }
        Commands::Form {
            schema,
            output,
            no_descriptions,
        } => {
            let schema: CanonicalSchema = read_json(schema)?;
            let written = write_form(config, &schema, output, !no_descriptions)?;
            print_one(cli.json, written, |w| format!("wrote {}", w.path))?;
        }
        Commands::Docs { schema, output } => {
            let schema: CanonicalSchema = read_json(schema)?;
            let written = write_docs(&schema, output)?;
            print_one(cli.json, written, |w| format!("wrote {}", w.path))?;
        }
        Commands::Workflow {
            benefit,
            out_dir,
            no_form,
            no_docs,
            strict,
        } => {
            let report = run_workflow(config, benefit, out_dir, !no_form, !no_docs, *strict)?;
            let ok = report.sync.as_ref().map_or(true, |s| s.is_valid);
            print_status(cli.json, ok, report, |r| {
                let mut lines: Vec<String> = r
                    .artifacts
                    .iter()
                    .map(|a| format!("{}\t{}", a.kind, a.path))
                    .collect();
                if let Some(sync) = &r.sync {
                    lines.push(format!(
                        "sync: {} (missing {}, extra {})",
                        if sync.is_valid { "pass" } else { "fail" },
                        sync.missing_fields.len(),
                        sync.extra_fields.len()
                    ));
                }
                lines.extend(warning_lines(&r.warnings));
                lines.join("\n")
            })?;
            return Ok(Some(ok));
        }
        _ => return Ok(None),
    }
    Ok(Some(true))
}

fn write_form(
    config: &PipelineConfig,
    schema: &CanonicalSchema,
    output: &Path,
    descriptions: bool,
) -> anyhow::Result<WrittenArtifact> {
    let generator = FormGenerator::with_config(&config.form);
    let mut form = generator.generate(schema);
    if descriptions {
        generator.add_descriptions(&mut form);
    }
    write_json(output, &form)?;
    Ok(artifact("form", output))
}

fn write_docs(schema: &CanonicalSchema, dir: &Path) -> anyhow::Result<WrittenArtifact> {
    let path = docs_path(dir, &schema.benefit);
    write_text(&path, &generate_documentation(schema)?)?;
    Ok(artifact("docs", &path))
}

fn docs_path(dir: &Path, benefit: &str) -> PathBuf {
    dir.join(benefit_slug(benefit)).join(DOCS_FILE_NAME)
}

fn artifact(kind: &str, path: &Path) -> WrittenArtifact {
    WrittenArtifact {
        kind: kind.to_string(),
        path: path.display().to_string(),
    }
}

fn run_workflow(
    config: &PipelineConfig,
    benefit: &Path,
    out_dir: &Path,
    with_form: bool,
    with_docs: bool,
    strict: bool,
) -> anyhow::Result<WorkflowReport> {
    let (schema, diagnostics) = derive_inputs(benefit, config)?;
    let schema_path = out_dir.join("input-schema.json");
    write_json(&schema_path, &schema)?;
    let mut artifacts = vec![artifact("schema", &schema_path)];

    let mut sync = None;
    if with_form {
        let form_path = out_dir.join("generated-form.json");
        artifacts.push(write_form(config, &schema, &form_path, true)?);
        let form = read_json(&form_path)?;
        let mode = if strict { SyncMode::Strict } else { SyncMode::Lenient };
        sync = Some(validate_form_sync(&form, &schema, mode));
    }
    if with_docs {
        artifacts.push(write_docs(&schema, &out_dir.join("docs"))?);
    }

    Ok(WorkflowReport {
        benefit: schema.benefit,
        artifacts,
        sync,
        warnings: diagnostics.messages(),
    })
}
