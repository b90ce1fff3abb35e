use crate::manifest::{Line, Manifest};
use crate::models::Constraint;
use std::collections::HashMap;
use std::fmt;

/// How serious a diagnostic is. Errors make the run fail; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single finding against one manifest line
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 1-based line number in the manifest
    pub line: usize,

    pub severity: Severity,

    pub message: String,
}

impl Diagnostic {
    fn error(line: usize, message: String) -> Self {
        Diagnostic {
            line,
            severity: Severity::Error,
            message,
        }
    }

    fn warning(line: usize, message: String) -> Self {
        Diagnostic {
            line,
            severity: Severity::Warning,
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.severity, self.message)
    }
}

/// Runs all structural checks against a manifest.
///
/// A reproducible manifest must pin every package exactly once, with an
/// exact `==` constraint. Returned diagnostics are ordered by line number.
pub fn check_manifest(manifest: &Manifest) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // Per-line checks
    for (index, line) in manifest.lines().iter().enumerate() {
        let line_number = index + 1;
        match line {
            Line::Invalid { reason, .. } => {
                diagnostics.push(Diagnostic::error(line_number, reason.clone()));
            }
            Line::Requirement(requirement) => {
                match &requirement.constraint {
                    Constraint::Exact(_) => {}
                    Constraint::Range(spec) => {
                        diagnostics.push(Diagnostic::error(
                            line_number,
                            format!(
                                "'{}' uses version range '{}'; an exact pin (==) is required",
                                requirement.name, spec
                            ),
                        ));
                    }
                    Constraint::Unpinned => {
                        diagnostics.push(Diagnostic::error(
                            line_number,
                            format!("'{}' has no version pin", requirement.name),
                        ));
                    }
                }

                let canonical = requirement.canonical_name();
                if requirement.name != canonical {
                    diagnostics.push(Diagnostic::warning(
                        line_number,
                        format!(
                            "'{}' is not in canonical form (use '{}')",
                            requirement.name, canonical
                        ),
                    ));
                }
            }
            Line::Blank | Line::Comment(_) => {}
        }
    }

    // Duplicate declarations across the whole manifest. Declarations of the
    // same name under different environment markers select per-environment
    // pins and are not duplicates, so each (name, marker) pair is tracked
    // on its own.
    let mut declarations: HashMap<(String, Option<String>), (usize, String)> = HashMap::new();
    for (index, line) in manifest.lines().iter().enumerate() {
        let line_number = index + 1;
        if let Line::Requirement(requirement) = line {
            let key = (requirement.canonical_name(), requirement.marker.clone());
            let spec = requirement.constraint.spec();

            match declarations.get(&key).cloned() {
                Some((first_line, first_spec)) => {
                    if first_spec == spec {
                        diagnostics.push(Diagnostic::warning(
                            line_number,
                            format!(
                                "duplicate pin for '{}' (already declared on line {})",
                                requirement.name, first_line
                            ),
                        ));
                    } else {
                        diagnostics.push(Diagnostic::error(
                            line_number,
                            format!(
                                "conflicting declarations for '{}': line {} has '{}', line {} has '{}'",
                                requirement.name, first_line, first_spec, line_number, spec
                            ),
                        ));
                    }
                    // Last occurrence wins for any further duplicates
                    declarations.insert(key, (line_number, spec));
                }
                None => {
                    declarations.insert(key, (line_number, spec));
                }
            }
        }
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.line);
    diagnostics
}

/// Counts the error-severity diagnostics in a slice
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity == Severity::Error)
        .count()
}
