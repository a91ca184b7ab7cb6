pub mod components;
pub mod operation;
pub mod parameter;
pub mod security;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use components::Components;
pub use operation::{HttpMethod, MediaType, Operation, PathItem, RequestBody, Response};
pub use parameter::{Parameter, ParameterLocation, Schema};
pub use security::{ApiKeyLocation, SecurityRequirement, SecurityScheme, SecuritySchemeType};

/// OpenAPI version written into every generated document.
pub const OPENAPI_VERSION: &str = "3.0.1";

/// Info object describing one API version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// License information. Carries the build version text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Generated specification document for one API version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub openapi: String,

    pub info: Info,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

impl SpecDocument {
    pub fn new(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            paths: IndexMap::new(),
            components: Components::default(),
            security: Vec::new(),
        }
    }

    /// All operations in path order, then method order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get(method))
    }
}
