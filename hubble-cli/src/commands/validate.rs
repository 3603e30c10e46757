//! `hubble-filter validate` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use hubble_filters::{FilterError, FilterSpecLoader, default_filters};

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns `CliError::Filter` after rendering the report if the file cannot
/// be loaded or one of its patterns does not compile.
pub async fn execute(args: ValidateArgs, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %args.path.display(), "validating filter spec");

    let report = validate_file(&args.path).await;
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Filter("filter spec is invalid".to_owned()));
    }
    Ok(())
}

/// Load and compile a spec file, collecting the outcome into a report.
pub async fn validate_file(path: &Path) -> SpecValidationReport {
    let mut report = SpecValidationReport {
        path: path.display().to_string(),
        valid: false,
        allowlist: 0,
        denylist: 0,
        errors: Vec::new(),
    };

    let result: Result<(), FilterError> = async {
        let specs = FilterSpecLoader::load_file(path).await?;
        report.allowlist = specs.allowlist.len();
        report.denylist = specs.denylist.len();
        specs.compile(&default_filters())?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => report.valid = true,
        Err(e) => report.errors.push(e.to_string()),
    }
    report
}

#[derive(Debug, Serialize)]
pub struct SpecValidationReport {
    pub path: String,
    pub valid: bool,
    pub allowlist: usize,
    pub denylist: usize,
    pub errors: Vec<String>,
}

impl Render for SpecValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Filter Spec Validation: {}", self.path.bold())?;
        writeln!(
            w,
            "  Status: {}",
            if self.valid {
                "valid".green()
            } else {
                "invalid".red()
            }
        )?;
        writeln!(
            w,
            "  Specs: {} allowlist, {} denylist",
            self.allowlist, self.denylist
        )?;

        if !self.errors.is_empty() {
            writeln!(w)?;
            writeln!(w, "Errors:")?;
            for e in &self.errors {
                writeln!(w, "  {}", e.red())?;
            }
        }
        Ok(())
    }
}
