use crate::checks::{self, Diagnostic};
use crate::error::{Error, Result};
use crate::manifest::{Manifest, find_manifests};
use clap::{Arg, ArgAction, Command};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments for pinlint
#[derive(Debug)]
pub struct Args {
    /// Path to the project directory or a single requirements file
    pub path: PathBuf,

    /// Whether to emit parsed records as JSON instead of diagnostics
    pub json: bool,

    /// Whether to rewrite manifests in canonical form
    pub write: bool,

    /// Whether to suppress progress logging
    pub quiet: bool,
}

/// Configures and runs the CLI
pub fn run() -> Result<Args> {
    let mut cmd = Command::new("pinlint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A linter and formatter for pinned python requirements manifests")
        .long_about(
            "Pinlint checks the requirements manifests of a Python project for the properties \
            a reproducible environment needs: every dependency pinned to exactly one version \
            with '==', no conflicting duplicate declarations, and a format that parses cleanly. \
            It can also rewrite manifests into a canonical form.",
        );

    cmd = cmd.arg(
        Arg::new("PATH")
            .help("The path to the project directory or requirements file to check")
            .long_help(
                "Specifies the directory containing the requirements manifests to check. \
                All of requirements.txt, requirements-<group>.txt and \
                requirements_<group>.txt are picked up. A path to a single file checks \
                just that file.",
            )
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("."),
    );

    cmd = cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Emit the parsed dependency records as JSON")
            .long_help(
                "Instead of human-readable diagnostics, print every parsed dependency record \
                (file, group, name, version, category) as a JSON array on stdout. Checks still \
                run and still determine the exit status.",
            )
            .action(ArgAction::SetTrue),
    );

    cmd = cmd.arg(
        Arg::new("write")
            .long("write")
            .help("Rewrite manifests in canonical form")
            .long_help(
                "Rewrites each checked manifest in place: package names in PEP 503 canonical \
                form and a single '==' with no interior whitespace. Comments and blank lines \
                are preserved. A manifest with error-level diagnostics is left untouched.",
            )
            .action(ArgAction::SetTrue),
    );

    cmd = cmd.arg(
        Arg::new("quiet")
            .long("quiet")
            .short('q')
            .help("Suppress progress logging")
            .action(ArgAction::SetTrue),
    );

    let after_help = "EXAMPLES:
# Check the manifests of the project in the current directory
pinlint .

# Check a single requirements file
pinlint requirements_dev.txt

# Rewrite manifests into canonical form
pinlint . --write

# Export the parsed records for other tooling
pinlint . --json

For more information and documentation, visit:
https://github.com/pinlint/pinlint";

    cmd = cmd.after_help(after_help);

    let matches = cmd.get_matches();

    let args = Args {
        path: matches
            .get_one::<PathBuf>("PATH")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        json: matches.get_flag("json"),
        write: matches.get_flag("write"),
        quiet: matches.get_flag("quiet"),
    };

    execute(&args)?;
    Ok(args)
}

/// One dependency record in `--json` output
#[derive(Debug, PartialEq, Serialize)]
pub struct JsonRecord {
    pub file: String,
    pub group: String,
    pub name: String,
    pub version: Option<String>,
    pub category: Option<String>,
}

/// Builds the `--json` records for one manifest
pub fn json_records(path: &Path, manifest: &Manifest) -> Vec<JsonRecord> {
    manifest
        .requirements()
        .map(|requirement| JsonRecord {
            file: path.display().to_string(),
            group: manifest.kind.to_string(),
            name: requirement.name.clone(),
            version: requirement.constraint.version().map(str::to_string),
            category: requirement.category.clone(),
        })
        .collect()
}

/// Runs the checks (and optional rewrite) for the provided arguments
pub fn execute(args: &Args) -> Result<()> {
    if args.quiet {
        log::set_max_level(log::LevelFilter::Warn);
    }

    let manifests = find_manifests(&args.path)?;
    info!("Checking {} manifest(s)", manifests.len());

    let mut records = Vec::new();
    let mut total_errors = 0;

    for (path, kind) in manifests {
        let contents = fs::read_to_string(&path).map_err(|e| Error::FileOperation {
            path: path.clone(),
            message: format!("Failed to read manifest: {}", e),
        })?;
        let manifest = Manifest::parse_with_kind(&contents, kind);
        let diagnostics = checks::check_manifest(&manifest);
        let errors = checks::error_count(&diagnostics);
        total_errors += errors;

        if args.json {
            records.extend(json_records(&path, &manifest));
        } else {
            report(&path, &diagnostics);
        }

        if args.write {
            if errors > 0 {
                info!(
                    "Skipping rewrite of {}: manifest has errors",
                    path.display()
                );
                continue;
            }
            let normalized = manifest.normalized();
            if normalized != contents {
                fs::write(&path, &normalized).map_err(|e| Error::FileOperation {
                    path: path.clone(),
                    message: format!("Failed to write manifest: {}", e),
                })?;
                info!("Rewrote {} in canonical form", path.display());
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    if total_errors > 0 {
        return Err(Error::ChecksFailed(total_errors));
    }

    info!("All manifests are cleanly pinned");
    Ok(())
}

fn report(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("{}: {}", path.display(), diagnostic);
    }
}
