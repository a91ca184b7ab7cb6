use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        };
        f.write_str(s)
    }
}

/// Primitive schema attached to parameters and request bodies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Schema {
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            format: None,
        }
    }
}

/// A non-body operation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: false,
            schema: None,
            example: None,
        }
    }

    /// Whether this parameter has the given name and location.
    ///
    /// Header names compare case-insensitively.
    pub fn matches(&self, name: &str, location: ParameterLocation) -> bool {
        self.location == location
            && match location {
                ParameterLocation::Header => self.name.eq_ignore_ascii_case(name),
                _ => self.name == name,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_match_ignores_case() {
        let p = Parameter::new("accept-language", ParameterLocation::Header);
        assert!(p.matches("Accept-Language", ParameterLocation::Header));
        assert!(!p.matches("Accept-Language", ParameterLocation::Query));
    }

    #[test]
    fn test_query_match_is_case_sensitive() {
        let p = Parameter::new("id", ParameterLocation::Query);
        assert!(p.matches("id", ParameterLocation::Query));
        assert!(!p.matches("ID", ParameterLocation::Query));
    }
}
