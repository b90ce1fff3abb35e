use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for pinlint operations
#[derive(Debug)]
pub enum Error {
    /// I/O errors (file access, permissions, etc.)
    Io(io::Error),

    /// JSON serialization errors
    Json(serde_json::Error),

    /// Errors related to manifest discovery
    ManifestDiscovery(String),

    /// Errors related to file operations
    FileOperation { path: PathBuf, message: String },

    /// One or more checks reported error-severity diagnostics
    ChecksFailed(usize),

    /// General errors
    General(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON serialization error: {}", err),
            Error::ManifestDiscovery(msg) => write!(f, "Manifest discovery error: {}", msg),
            Error::FileOperation { path, message } => {
                write!(f, "File operation error on {}: {}", path.display(), message)
            }
            Error::ChecksFailed(count) => {
                if *count == 1 {
                    write!(f, "1 problem found")
                } else {
                    write!(f, "{} problems found", count)
                }
            }
            Error::General(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error {
    /// Check if the error message contains a specific string
    #[allow(dead_code)]
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Error::FileOperation { path: _, message } => message.contains(needle),
            _ => {
                let message = self.to_string();
                message.contains(needle)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

// Implement From conversions for common error types
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::General(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::General(err.to_string())
    }
}

/// Result type alias for pinlint operations
pub type Result<T> = std::result::Result<T, Error>;
