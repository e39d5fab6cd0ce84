use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetwatchError {
    #[error("file {} not found", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("config file {} not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0} not in list")]
    DomainNotFound(String),

    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("malformed domain header: {0}")]
    MalformedHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetwatchError>;
