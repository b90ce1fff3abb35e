use std::fmt;

/// Represents which requirements file a manifest came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// The main requirements file (requirements.txt)
    Main,

    /// The development requirements file (requirements-dev.txt or
    /// requirements_dev.txt)
    Dev,

    /// Any other named group (e.g. "test" from requirements-test.txt)
    Group(String),
}

impl ManifestKind {
    /// Classifies the suffix of a requirements file name
    /// ("dev" from requirements-dev.txt, "test" from requirements_test.txt)
    pub fn from_group_name(group: &str) -> Self {
        match group {
            "dev" => ManifestKind::Dev,
            group => ManifestKind::Group(group.to_string()),
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestKind::Main => write!(f, "main"),
            ManifestKind::Dev => write!(f, "dev"),
            ManifestKind::Group(group) => write!(f, "{}", group),
        }
    }
}
