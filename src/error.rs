use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Vault not initialized. Run 'para init' first.")]
    NotInitialized,

    #[error("Vault already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Precondition(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// A transition failed part-way and its completed steps could not be
    /// undone. The on-disk state is unknown.
    #[error(
        "{operation} failed ({cause}) and could not be rolled back ({rollback}); manual recovery required"
    )]
    ManualRecovery {
        operation: String,
        cause: String,
        rollback: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ParaError {
    /// True for errors raised before any file was touched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ParaError::Validation(_) | ParaError::Precondition(_) | ParaError::AlreadyExists(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ParaError>;
