use std::sync::Arc;

use indexmap::IndexMap;

use crate::document::{
    ApiKeyLocation, SecurityRequirement, SecurityScheme, SecuritySchemeType, SpecDocument,
};

pub const BEARER_SCHEME: &str = "Bearer";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const BEARER_DESCRIPTION: &str =
    "Authorization header using the Bearer scheme. Example: \"Bearer {token}\"";

/// Holds the one security scheme shared by every generated document.
#[derive(Debug, Clone)]
pub struct SecuritySchemeRegistry {
    name: String,
    scheme: Arc<SecurityScheme>,
}

impl SecuritySchemeRegistry {
    /// Bearer token passed in the `Authorization` header.
    pub fn bearer() -> Self {
        Self {
            name: BEARER_SCHEME.to_string(),
            scheme: Arc::new(SecurityScheme {
                scheme_type: SecuritySchemeType::ApiKey,
                description: Some(BEARER_DESCRIPTION.to_string()),
                name: Some(AUTHORIZATION_HEADER.to_string()),
                location: Some(ApiKeyLocation::Header),
            }),
        }
    }

    pub fn scheme_name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &Arc<SecurityScheme> {
        &self.scheme
    }

    /// Global requirement referencing the scheme, with no scopes.
    pub fn requirement(&self) -> SecurityRequirement {
        let mut requirement = IndexMap::new();
        requirement.insert(self.name.clone(), Vec::new());
        requirement
    }

    /// Register the scheme and the global requirement on a document.
    ///
    /// Attaching more than once leaves the document unchanged.
    pub fn attach(&self, document: &mut SpecDocument) {
        document
            .components
            .security_schemes
            .entry(self.name.clone())
            .or_insert_with(|| Arc::clone(&self.scheme));

        let requirement = self.requirement();
        if !document.security.contains(&requirement) {
            document.security.push(requirement);
        }
    }
}

impl Default for SecuritySchemeRegistry {
    fn default() -> Self {
        Self::bearer()
    }
}
