use crate::error::{Error, Result};
use crate::models::ManifestKind;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Finds the requirements manifests to check.
///
/// A file path selects exactly that file. A directory is scanned for
/// `requirements.txt` plus every `requirements-<group>.txt` and
/// `requirements_<group>.txt`, returned in deterministic path order.
pub fn find_manifests(path: &Path) -> Result<Vec<(PathBuf, ManifestKind)>> {
    if path.is_file() {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::FileOperation {
                path: path.to_path_buf(),
                message: "Invalid file name".to_string(),
            })?;
        let kind = classify_file_name(file_name).unwrap_or(ManifestKind::Main);
        return Ok(vec![(path.to_path_buf(), kind)]);
    }

    if !path.is_dir() {
        return Err(Error::FileOperation {
            path: path.to_path_buf(),
            message: "No such file or directory".to_string(),
        });
    }

    let mut manifests = Vec::new();
    let entries = fs::read_dir(path).map_err(|e| Error::FileOperation {
        path: path.to_path_buf(),
        message: format!("Failed to read directory: {}", e),
    })?;

    for entry in entries.filter_map(std::result::Result::ok) {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        if let Some(file_name) = entry_path.file_name().and_then(|n| n.to_str()) {
            if let Some(kind) = classify_file_name(file_name) {
                info!("Found {} requirements file: {}", kind, entry_path.display());
                manifests.push((entry_path, kind));
            }
        }
    }

    if manifests.is_empty() {
        return Err(Error::ManifestDiscovery(format!(
            "No requirements files found in {}",
            path.display()
        )));
    }

    manifests.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(manifests)
}

/// Classifies a file name into a manifest kind, or `None` if the file is
/// not a requirements manifest
fn classify_file_name(file_name: &str) -> Option<ManifestKind> {
    if file_name == "requirements.txt" {
        return Some(ManifestKind::Main);
    }

    let group = file_name
        .strip_prefix("requirements-")
        .or_else(|| file_name.strip_prefix("requirements_"))?
        .strip_suffix(".txt")?;

    if group.is_empty() {
        return None;
    }

    Some(ManifestKind::from_group_name(group))
}
