use crate::models::{Constraint, Requirement};

/// Outcome of classifying a single manifest line
pub(super) enum ParsedLine {
    Blank,
    Comment(String),
    Requirement(Requirement),
    Invalid { raw: String, reason: String },
}

/// Classifies one line of a requirements manifest.
///
/// Blank lines and `#` comments carry no data. Everything else must be a
/// requirement declaration; lines that are not are kept verbatim as
/// `Invalid` so serialization never loses content.
pub(super) fn parse_line(raw: &str) -> ParsedLine {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return ParsedLine::Blank;
    }
    if trimmed.starts_with('#') {
        return ParsedLine::Comment(raw.to_string());
    }

    match parse_requirement(trimmed) {
        Ok(requirement) => ParsedLine::Requirement(requirement),
        Err(reason) => ParsedLine::Invalid {
            raw: raw.to_string(),
            reason,
        },
    }
}

fn parse_requirement(line: &str) -> Result<Requirement, String> {
    if line.starts_with('-') {
        // Covers -r includes, -e editable installs, --index-url and friends
        return Err("pip option lines are not requirement declarations".to_string());
    }
    if line.starts_with("git+") || line.starts_with("http://") || line.starts_with("https://") {
        return Err("URL requirements cannot be pinned; declare a released version".to_string());
    }

    // Split off a trailing same-line comment (pip requires whitespace before '#')
    let (line, comment) = match line.find('#') {
        Some(pos) if line[..pos].ends_with(char::is_whitespace) => (
            line[..pos].trim_end(),
            Some(line[pos + 1..].trim().to_string()),
        ),
        _ => (line, None),
    };

    // Split off an environment marker
    let (spec_part, marker) = match line.split_once(';') {
        Some((head, tail)) => (head.trim_end(), Some(tail.trim().to_string())),
        None => (line, None),
    };

    if spec_part.contains("===") {
        return Err("'===' is not a valid version operator".to_string());
    }

    let re = regex::Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)(\[[^\]]*\])?\s*(.*)$").unwrap();
    let captures = re
        .captures(spec_part)
        .ok_or_else(|| format!("not a valid requirement: '{}'", spec_part))?;

    let name = captures[1].to_string();
    let extras = captures.get(2).map(|m| {
        m.as_str()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|extra| extra.trim().to_string())
            .filter(|extra| !extra.is_empty())
            .collect::<Vec<_>>()
    });
    let rest = captures[3].trim();

    let constraint = if rest.is_empty() {
        Constraint::Unpinned
    } else if rest.contains(',') {
        // A comma-separated constraint list is never a single exact pin
        Constraint::Range(rest.to_string())
    } else if let Some(version_spec) = rest.strip_prefix("==") {
        let version = version_spec.trim();
        if version.is_empty() {
            return Err("missing version after '=='".to_string());
        }
        if version.contains(char::is_whitespace) {
            return Err(format!("malformed version '{}'", version));
        }
        Constraint::Exact(version.to_string())
    } else if rest.starts_with(['>', '<', '~', '!']) {
        Constraint::Range(rest.to_string())
    } else if rest.starts_with('=') {
        return Err("expected '==' for an exact pin, found a single '='".to_string());
    } else {
        return Err(format!("unrecognized requirement syntax: '{}'", rest));
    };

    Ok(Requirement {
        name,
        extras,
        constraint,
        category: None,
        marker,
        comment,
    })
}
