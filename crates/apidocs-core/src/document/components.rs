use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::security::SecurityScheme;

/// Components object holding reusable definitions.
///
/// Security schemes are shared across documents, so entries hold an `Arc`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, Arc<SecurityScheme>>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.security_schemes.is_empty()
    }
}
