use crate::cli::{Cli, Commands};
use benefit_inputs::domain::models::{CanonicalSchema, FormSchema, SyncMode};
use benefit_inputs::services::output::print_status;
use benefit_inputs::services::storage::read_json;
use benefit_inputs::services::sync::{render_report, validate_form_sync};
use std::path::Path;

pub fn handle_check_commands(cli: &Cli) -> anyhow::Result<Option<bool>> {
    let Commands::Validate {
        form,
        schema,
        strict,
    } = &cli.command
    else {
        return Ok(None);
    };

    let form_schema: FormSchema = read_json(form)?;
    let input_schema: CanonicalSchema = read_json(schema)?;
    let mode = if *strict {
        SyncMode::Strict
    } else {
        SyncMode::Lenient
    };
    let report = validate_form_sync(&form_schema, &input_schema, mode);
    let ok = report.is_valid;
    print_status(cli.json, ok, report, |r| {
        render_report(r, &file_name(form), &file_name(schema))
    })?;
    Ok(Some(ok))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
