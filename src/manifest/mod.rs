use crate::error::{Error, Result};
use crate::models::{ManifestKind, Requirement};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

mod discover;
mod parse;

pub use discover::find_manifests;

use parse::ParsedLine;

/// One line of a requirements manifest, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// An empty line, used to separate logical groups
    Blank,

    /// A `#` comment line, preserved verbatim
    Comment(String),

    /// A parsed requirement declaration
    Requirement(Requirement),

    /// A line that is neither blank, comment, nor a valid requirement.
    /// The raw text is preserved so serialization never loses content.
    Invalid { raw: String, reason: String },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Blank => Ok(()),
            Line::Comment(raw) => write!(f, "{}", raw),
            Line::Requirement(requirement) => write!(f, "{}", requirement),
            Line::Invalid { raw, .. } => write!(f, "{}", raw),
        }
    }
}

/// A parsed requirements manifest: an ordered sequence of lines that can be
/// re-serialized without losing comments, blank separators, or unparseable
/// content
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Which requirements file this manifest represents
    pub kind: ManifestKind,

    lines: Vec<Line>,
    trailing_newline: bool,
}

impl Manifest {
    /// Parses manifest text as the main requirements file
    pub fn parse(contents: &str) -> Self {
        Self::parse_with_kind(contents, ManifestKind::Main)
    }

    /// Parses manifest text, tagging it with the given kind.
    ///
    /// Parsing is total: malformed lines become `Line::Invalid` rather than
    /// aborting, so a manifest with problems can still be inspected and
    /// reported on line by line.
    pub fn parse_with_kind(contents: &str, kind: ManifestKind) -> Self {
        let mut lines = Vec::new();
        let mut category: Option<String> = None;
        let mut in_comment_block = false;

        for raw in contents.lines() {
            match parse::parse_line(raw) {
                ParsedLine::Blank => {
                    // A blank line closes the current category group
                    category = None;
                    in_comment_block = false;
                    lines.push(Line::Blank);
                }
                ParsedLine::Comment(raw) => {
                    // The first comment of a block is the group heading
                    if !in_comment_block {
                        category = Some(comment_text(&raw));
                        in_comment_block = true;
                    }
                    lines.push(Line::Comment(raw));
                }
                ParsedLine::Requirement(mut requirement) => {
                    in_comment_block = false;
                    requirement.category = category.clone();
                    lines.push(Line::Requirement(requirement));
                }
                ParsedLine::Invalid { raw, reason } => {
                    in_comment_block = false;
                    debug!("Unparseable line '{}': {}", raw, reason);
                    lines.push(Line::Invalid { raw, reason });
                }
            }
        }

        Manifest {
            kind,
            lines,
            trailing_newline: contents.ends_with('\n'),
        }
    }

    /// Reads and parses a manifest file
    pub fn load(path: &Path, kind: ManifestKind) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::FileOperation {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;
        Ok(Self::parse_with_kind(&contents, kind))
    }

    /// The manifest's lines, in source order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Iterates over the requirement declarations, in source order
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.lines.iter().filter_map(|line| match line {
            Line::Requirement(requirement) => Some(requirement),
            _ => None,
        })
    }

    /// The effective pin for each package: canonical name to version, with
    /// the last occurrence winning when a name is declared more than once
    pub fn effective_pins(&self) -> HashMap<String, String> {
        let mut pins = HashMap::new();
        for requirement in self.requirements() {
            if let Some(version) = requirement.constraint.version() {
                pins.insert(requirement.canonical_name(), version.to_string());
            }
        }
        pins
    }

    /// Renders the manifest in canonical form: PEP 503 names, a single
    /// `==` with no interior whitespace, comments and blank separators kept.
    /// Always ends with a newline.
    pub fn normalized(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            match line {
                Line::Blank => {}
                Line::Comment(raw) => output.push_str(raw.trim_end()),
                Line::Requirement(requirement) => {
                    let mut canonical = requirement.clone();
                    canonical.name = requirement.canonical_name();
                    output.push_str(&canonical.to_string());
                }
                Line::Invalid { raw, .. } => output.push_str(raw.trim_end()),
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            write!(f, "{}", line)?;
            if index + 1 < self.lines.len() || self.trailing_newline {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Strips the leading `#` markers and whitespace from a comment line
fn comment_text(raw: &str) -> String {
    raw.trim_start()
        .trim_start_matches('#')
        .trim()
        .to_string()
}
