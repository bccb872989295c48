use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum EditorError {
    FileRead { path: PathBuf, source: io::Error },
    FileWrite { path: PathBuf, source: io::Error },
    ConfigMissing(PathBuf),
    ConfigParse { path: PathBuf, message: String },
    Database(String),
}

impl EditorError {
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            EditorError::FileRead { source, .. } | EditorError::FileWrite { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            EditorError::ConfigMissing(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::FileRead { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            EditorError::FileWrite { path, source } => {
                write!(f, "cannot write '{}': {}", path.display(), source)
            }
            EditorError::ConfigMissing(path) => write!(
                f,
                "JSON file not found at the specified path '{}'",
                path.display()
            ),
            EditorError::ConfigParse { path, message } => {
                write!(f, "invalid configuration '{}': {}", path.display(), message)
            }
            EditorError::Database(msg) => write!(f, "settings database error: {}", msg),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::FileRead { source, .. } | EditorError::FileWrite { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
