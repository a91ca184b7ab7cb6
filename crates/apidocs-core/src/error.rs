use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("version catalog is empty")]
    Empty,

    #[error("empty group name for API version {0}")]
    EmptyGroupName(String),

    #[error("duplicate group name: {0}")]
    DuplicateGroupName(String),

    #[error("invalid API version: {0}")]
    InvalidVersion(String),
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("operation filter failed on {path}: {reason}")]
    Operation { path: String, reason: String },

    #[error("parameter filter failed on `{parameter}`: {reason}")]
    Parameter { parameter: String, reason: String },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("operation {method} {path} targets unknown API version {version}")]
    UnknownVersion {
        method: String,
        path: String,
        version: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}
