use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_SCHEMA_PATH: &str = "schemas/input-schema.json";
pub const DEFAULT_FORM_PATH: &str = "schemas/generated-form.json";
pub const DEFAULT_DOCS_DIR: &str = "docs/benefits";

#[derive(Parser, Debug)]
#[command(
    name = "benefit-inputs",
    version,
    about = "Derive benefit input schemas, forms and docs from DMN decision models"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Pipeline configuration file (TOML)")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the canonical input schema from a benefit decision model.
    Derive {
        benefit: PathBuf,
        #[arg(short, long, default_value = DEFAULT_SCHEMA_PATH)]
        output: PathBuf,
    },
    /// Generate a form-js form from an input schema.
    Form {
        #[arg(default_value = DEFAULT_SCHEMA_PATH)]
        schema: PathBuf,
        #[arg(short, long, default_value = DEFAULT_FORM_PATH)]
        output: PathBuf,
        #[arg(long, default_value_t = false)]
        no_descriptions: bool,
    },
    /// Write markdown documentation of an input schema.
    Docs {
        #[arg(default_value = DEFAULT_SCHEMA_PATH)]
        schema: PathBuf,
        #[arg(short, long, default_value = DEFAULT_DOCS_DIR)]
        output: PathBuf,
    },
    /// Check that a form collects every input the schema requires.
    Validate {
        form: PathBuf,
        #[arg(default_value = DEFAULT_SCHEMA_PATH)]
        schema: PathBuf,
        #[arg(long, default_value_t = false, help = "Fail on extra form fields too")]
        strict: bool,
    },
    /// Derive, generate form and docs, and validate in one run.
    Workflow {
        benefit: PathBuf,
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = false, help = "Skip form generation and validation")]
        no_form: bool,
        #[arg(long, default_value_t = false)]
        no_docs: bool,
        #[arg(long, default_value_t = false, help = "Fail on extra form fields too")]
        strict: bool,
    },
}
