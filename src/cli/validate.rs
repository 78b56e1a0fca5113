//! Validate command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use rayon::prelude::*;

use crate::validate::{validate_icon_json, ValidationIssue, ValidationResult};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn issue_json(issue: &ValidationIssue) -> serde_json::Value {
    serde_json::json!({
        "path": issue.path,
        "type": issue.issue_type.to_string(),
        "message": issue.message,
    })
}

/// Execute the validate command
pub fn run_validate(files: &[PathBuf], strict: bool, json: bool) -> ExitCode {
    if files.is_empty() {
        eprintln!("Error: No files to validate");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let results: Vec<(PathBuf, std::io::Result<ValidationResult>)> = files
        .par_iter()
        .map(|path| {
            let result = std::fs::read_to_string(path).map(|text| validate_icon_json(&text));
            (path.clone(), result)
        })
        .collect();

    let mut has_failures = false;
    let mut reports = Vec::with_capacity(results.len());

    for (path, result) in results {
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: Cannot read '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let failed = !result.valid || (strict && !result.warnings.is_empty());
        has_failures |= failed;

        if json {
            reports.push(serde_json::json!({
                "file": path.display().to_string(),
                "valid": !failed,
                "errors": result.errors.iter().map(issue_json).collect::<Vec<_>>(),
                "warnings": result.warnings.iter().map(issue_json).collect::<Vec<_>>(),
            }));
            continue;
        }

        println!("Validating {}...", path.display());
        for issue in result.errors.iter().chain(&result.warnings) {
            println!("  {}", issue);
        }
        if failed {
            println!(
                "  {} error(s), {} warning(s)",
                result.errors.len(),
                result.warnings.len()
            );
        } else {
            println!("  OK");
        }
    }

    if json {
        println!("{}", serde_json::Value::Array(reports));
    }

    if has_failures {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
