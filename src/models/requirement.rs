use std::fmt;

/// Represents a single dependency declaration from a requirements manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// The package name as written in the manifest
    pub name: String,

    /// Optional extras (e.g. ["s3", "redis"])
    pub extras: Option<Vec<String>>,

    /// The version constraint attached to the name
    pub constraint: Constraint,

    /// The comment heading the entry sits under (e.g. "Unit tests")
    pub category: Option<String>,

    /// Optional environment marker (e.g. "python_version >= '3.7'")
    pub marker: Option<String>,

    /// Optional trailing same-line comment
    pub comment: Option<String>,
}

/// Represents the version constraint of a requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Exact pin (`==X.Y.Z`), the only form a reproducible manifest should use
    Exact(String),

    /// Any other operator expression (`>=`, `<`, `~=`, ...), kept verbatim
    Range(String),

    /// Bare name with no version at all
    Unpinned,
}

impl Constraint {
    /// The pinned version, if this constraint is an exact pin
    pub fn version(&self) -> Option<&str> {
        match self {
            Constraint::Exact(version) => Some(version),
            _ => None,
        }
    }

    /// The constraint rendered as the text that follows the package name
    pub fn spec(&self) -> String {
        match self {
            Constraint::Exact(version) => format!("=={}", version),
            Constraint::Range(spec) => spec.clone(),
            Constraint::Unpinned => String::new(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Constraint::Exact(_))
    }
}

impl Requirement {
    /// Creates a new unpinned requirement with the given name
    #[allow(dead_code)]
    pub fn new(name: String) -> Self {
        Self {
            name,
            extras: None,
            constraint: Constraint::Unpinned,
            category: None,
            marker: None,
            comment: None,
        }
    }

    /// Creates a new exactly-pinned requirement
    pub fn pinned(name: String, version: String) -> Self {
        Self {
            name,
            extras: None,
            constraint: Constraint::Exact(version),
            category: None,
            marker: None,
            comment: None,
        }
    }

    /// Adds extras to the requirement
    #[allow(dead_code)]
    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = Some(extras);
        self
    }

    /// The PEP 503 canonical form of the package name, used to decide
    /// whether two lines refer to the same package
    pub fn canonical_name(&self) -> String {
        canonicalize_name(&self.name)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(extras) = &self.extras {
            if !extras.is_empty() {
                write!(f, "[{}]", extras.join(","))?;
            }
        }
        write!(f, "{}", self.constraint.spec())?;
        if let Some(marker) = &self.marker {
            write!(f, "; {}", marker)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, "  # {}", comment)?;
        }
        Ok(())
    }
}

/// Canonicalizes a package name per PEP 503: lowercase, with runs of
/// `-`, `_` and `.` collapsed to a single `-`
pub fn canonicalize_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut previous_separator = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !previous_separator {
                canonical.push('-');
                previous_separator = true;
            }
        } else {
            canonical.push(c.to_ascii_lowercase());
            previous_separator = false;
        }
    }

    canonical
}
