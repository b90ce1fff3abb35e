use pinlint::cli::{Args, execute};
use pinlint::manifest::Manifest;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test canonical rendering of a manifest.
///
/// This test verifies that:
/// 1. Names are rewritten to PEP 503 canonical form
/// 2. Whitespace around the operator is removed
/// 3. Comments and blank separators survive
#[test]
fn test_normalized_output() {
    let content = r#"# Unit tests
PyTest == 5.3.5
Pytest_Cov==2.8.1

Django==3.0.3  # Web framework
"#;

    let manifest = Manifest::parse(content);

    let expected = r#"# Unit tests
pytest==5.3.5
pytest-cov==2.8.1

django==3.0.3  # Web framework
"#;
    assert_eq!(manifest.normalized(), expected);
}

/// Test that normalization is idempotent.
#[test]
fn test_normalized_is_idempotent() {
    let content = "# Linting\nflake8==3.7.9\nmccabe==0.6.1\n";

    let manifest = Manifest::parse(content);
    let normalized = manifest.normalized();
    let reparsed = Manifest::parse(&normalized);

    assert_eq!(reparsed.normalized(), normalized);
}

/// Test that normalization preserves the set of effective pins.
#[test]
fn test_normalized_preserves_pins() {
    let content = "PyYAML==5.3.1\nzope.interface==4.7.1\n";

    let manifest = Manifest::parse(content);
    let reparsed = Manifest::parse(&manifest.normalized());

    assert_eq!(manifest.effective_pins(), reparsed.effective_pins());
}

fn args_for(path: PathBuf, write: bool) -> Args {
    Args {
        path,
        json: false,
        write,
        quiet: true,
    }
}

/// Test the --write flow end to end.
///
/// This test verifies that:
/// 1. A manifest with only warnings is rewritten in place
/// 2. The rewritten file is in canonical form
/// 3. An already-canonical file is left byte-identical
#[test]
fn test_write_rewrites_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("requirements_dev.txt");
    fs::write(&path, "# Unit tests\nPyTest==5.3.5\n").unwrap();

    execute(&args_for(path.clone(), true)).unwrap();

    let rewritten = fs::read_to_string(&path).unwrap();
    assert_eq!(rewritten, "# Unit tests\npytest==5.3.5\n");

    // Second run is a no-op
    execute(&args_for(path.clone(), true)).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), rewritten);
}

/// Test that --write refuses to touch a manifest with errors.
#[test]
fn test_write_skips_manifest_with_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("requirements.txt");
    let content = "flask>=2.0.0\nPyTest==5.3.5\n";
    fs::write(&path, content).unwrap();

    let result = execute(&args_for(path.clone(), true));

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

/// Test that a failing check surfaces as a non-zero outcome.
#[test]
fn test_execute_fails_on_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("requirements.txt");
    fs::write(&path, "pytest==5.0.0\npytest==6.0.0\n").unwrap();

    let result = execute(&args_for(temp_dir.path().to_path_buf(), false));

    assert!(result.is_err());
}

/// Test that a clean project passes.
#[test]
fn test_execute_passes_on_clean_project() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("requirements.txt"),
        "flask==2.0.0\nrequests==2.31.0\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("requirements_dev.txt"),
        "# Unit tests\npytest==5.3.5\n",
    )
    .unwrap();

    execute(&args_for(temp_dir.path().to_path_buf(), false)).unwrap();
}
