//! Description of the documented HTTP surface.
//!
//! The hosting service supplies this: which operations exist, which API
//! versions they belong to, and the metadata known about each parameter
//! (model description, route optionality). The pipeline turns it into
//! document operations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ApiVersion;
use crate::document::{HttpMethod, ParameterLocation};

const VERSION_SEGMENTS: [&str; 2] = ["{version}", "{version:apiVersion}"];

/// Where a parameter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Query,
    Header,
    Path,
    Cookie,
    Body,
}

impl ParameterSource {
    /// Document location, or `None` for body parameters.
    pub fn location(self) -> Option<ParameterLocation> {
        match self {
            ParameterSource::Query => Some(ParameterLocation::Query),
            ParameterSource::Header => Some(ParameterLocation::Header),
            ParameterSource::Path => Some(ParameterLocation::Path),
            ParameterSource::Cookie => Some(ParameterLocation::Cookie),
            ParameterSource::Body => None,
        }
    }
}

/// Routing information for a parameter bound from the route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteInfo {
    #[serde(default)]
    pub optional: bool,
}

/// One input of a described operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,

    #[serde(rename = "in")]
    pub source: ParameterSource,

    #[serde(default)]
    pub required: bool,

    /// Description taken from the bound model's metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteInfo>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl ApiParameter {
    pub fn new(name: impl Into<String>, source: ParameterSource) -> Self {
        Self {
            name: name.into(),
            source,
            required: false,
            model_description: None,
            route: None,
            schema_type: None,
            example: None,
        }
    }

    pub fn is_body(&self) -> bool {
        self.source == ParameterSource::Body
    }
}

/// One described operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOperation {
    pub method: HttpMethod,

    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    /// Versions exposing this operation. Empty means every version.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<ApiVersion>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ApiParameter>,

    /// Status code → description.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, String>,
}

impl ApiOperation {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            tag: None,
            summary: None,
            operation_id: None,
            deprecated: false,
            versions: Vec::new(),
            parameters: Vec::new(),
            responses: IndexMap::new(),
        }
    }

    pub fn applies_to(&self, version: &ApiVersion) -> bool {
        self.versions.is_empty() || self.versions.contains(version)
    }

    /// Whether the route template carries a version placeholder.
    pub fn has_version_segment(&self) -> bool {
        VERSION_SEGMENTS.iter().any(|seg| self.path.contains(seg))
    }

    /// Route template with the version placeholder substituted.
    pub fn path_for(&self, version: &ApiVersion) -> String {
        let text = version.short_text();
        VERSION_SEGMENTS
            .iter()
            .fold(self.path.clone(), |path, seg| path.replace(seg, &text))
    }
}

/// The full described surface of the hosting service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiDescription {
    pub operations: Vec<ApiOperation>,
}

impl ApiDescription {
    pub fn new(operations: Vec<ApiOperation>) -> Self {
        Self { operations }
    }

    /// Operations exposed in the given version, in declaration order.
    pub fn for_version<'a>(
        &'a self,
        version: &'a ApiVersion,
    ) -> impl Iterator<Item = &'a ApiOperation> + 'a {
        self.operations.iter().filter(move |op| op.applies_to(version))
    }
}
