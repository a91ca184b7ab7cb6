use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::builder::BuildMetadata;
use crate::catalog::{ApiVersion, VersionCatalog};
use crate::description::ApiDescription;
use crate::endpoint::DEFAULT_ROOT;
use crate::error::{CatalogError, ConfigError};
use crate::filter::DEFAULT_ACCEPT_LANGUAGE;

/// Top-level configuration loaded from `.apidocs.yaml`.
///
/// Everything the pipeline needs is in here: build metadata, the version
/// catalog and the described operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service: BuildMetadata,
    pub server: ServerConfig,
    pub filters: FilterConfig,
    pub versions: Vec<VersionEntry>,
    pub operations: ApiDescription,
}

impl ServiceConfig {
    /// Validated catalog of the configured versions, ordered by version.
    pub fn catalog(&self) -> Result<VersionCatalog, CatalogError> {
        VersionCatalog::from_versions(
            self.versions
                .iter()
                .map(|v| (v.version.clone(), v.deprecated)),
        )
    }
}

/// HTTP hosting options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Path serving the browsing UI.
    pub root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            root: DEFAULT_ROOT.to_string(),
        }
    }
}

/// Options for the standard filters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Example value of the injected `Accept-Language` header.
    pub accept_language: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// One configured API version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionEntry {
    pub version: ApiVersion,
    #[serde(default)]
    pub deprecated: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apidocs.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ServiceConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content, path).map(Some)
}

/// Parse config text; `origin` is only used in error messages.
pub fn parse_config(content: &str, origin: &Path) -> Result<ServiceConfig, ConfigError> {
    serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Yaml {
        path: origin.display().to_string(),
        source,
    })
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apidocs configuration
service:
  name: Api.Versioned
  description: api versioned
  version: 1.0.0

server:
  bind: 127.0.0.1:8080
  root: /

filters:
  accept_language: pt-BR

versions:
  - version: "1.0"
  - version: "2.0"
    deprecated: true

operations:
  - method: get
    path: /api/v{version}/users/{id}
    tag: Users
    summary: Get a user
    parameters:
      - name: version
        in: path
      - name: id
        in: path
        type: integer
        model_description: User id
        route:
          optional: false
    responses:
      "200": Success
      "404": Not Found
  - method: post
    path: /api/v{version}/users
    tag: Users
    versions: ["2.0"]
    parameters:
      - name: user
        in: body
        required: true
"#
}
