use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::builder::{BuildMetadata, build_document};
use crate::catalog::{VersionCatalog, VersionDescriptor};
use crate::config::ServiceConfig;
use crate::description::{ApiDescription, ApiOperation};
use crate::document::{
    MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response, Schema,
    SpecDocument,
};
use crate::endpoint::{DEFAULT_ROOT, map_endpoints};
use crate::error::BuildError;
use crate::filter::{FilterChain, OperationFilterContext, ParameterFilterContext};
use crate::security::SecuritySchemeRegistry;
use crate::store::DocumentSet;

const VERSION_PARAMETER: &str = "version";
const DEFAULT_SCHEMA_TYPE: &str = "string";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Turns a version catalog and an API description into a [`DocumentSet`].
///
/// One pass: build a skeleton per version, generate its operations through the
/// filter chain, attach the shared security scheme, then map endpoints.
#[derive(Debug)]
pub struct Pipeline {
    metadata: BuildMetadata,
    filters: FilterChain,
    security: SecuritySchemeRegistry,
    root: String,
}

impl Pipeline {
    pub fn new(metadata: BuildMetadata) -> Self {
        Self {
            metadata,
            filters: FilterChain::default(),
            security: SecuritySchemeRegistry::default(),
            root: DEFAULT_ROOT.to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.service.clone())
            .with_filters(FilterChain::standard(&config.filters.accept_language))
            .with_root(&config.server.root)
    }

    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_security(mut self, security: SecuritySchemeRegistry) -> Self {
        self.security = security;
        self
    }

    pub fn with_root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    /// Generate every document. Nothing is returned unless every version builds.
    pub fn run(
        &self,
        catalog: &VersionCatalog,
        description: &ApiDescription,
    ) -> Result<DocumentSet, BuildError> {
        check_versions(catalog, description)?;

        let mut documents = IndexMap::with_capacity(catalog.len());
        for descriptor in catalog.descriptors() {
            let document = self.build_version(descriptor, description)?;
            debug!(
                "built document {} with {} paths",
                descriptor.group_name,
                document.paths.len()
            );
            documents.insert(descriptor.group_name.clone(), Arc::new(document));
        }

        let endpoints = map_endpoints(catalog, &self.root);
        info!(
            "generated {} documents for {} {}",
            documents.len(),
            self.metadata.name,
            self.metadata.version
        );
        Ok(DocumentSet::new(documents, endpoints))
    }

    fn build_version(
        &self,
        descriptor: &VersionDescriptor,
        description: &ApiDescription,
    ) -> Result<SpecDocument, BuildError> {
        let mut document = build_document(descriptor, &self.metadata);

        for api_op in description.for_version(&descriptor.api_version) {
            let path = api_op.path_for(&descriptor.api_version);
            let operation = self.build_operation(descriptor, &path, api_op)?;
            let replaced = document
                .paths
                .entry(path.clone())
                .or_default()
                .insert(api_op.method, operation);
            if replaced.is_some() {
                warn!(
                    "{} {} declared twice in {}; keeping the last declaration",
                    api_op.method, path, descriptor.group_name
                );
            }
        }

        self.security.attach(&mut document);
        Ok(document)
    }

    fn build_operation(
        &self,
        descriptor: &VersionDescriptor,
        path: &str,
        api_op: &ApiOperation,
    ) -> Result<Operation, BuildError> {
        let group_name = descriptor.group_name.as_str();
        let substituted = api_op.has_version_segment();

        let mut parameters = Vec::new();
        let mut request_body = None;

        for api_param in &api_op.parameters {
            let Some(location) = api_param.source.location() else {
                if request_body.is_some() {
                    warn!(
                        "{} {} has more than one body parameter; ignoring `{}`",
                        api_op.method, path, api_param.name
                    );
                    continue;
                }
                request_body = Some(RequestBody {
                    description: api_param.model_description.clone(),
                    content: IndexMap::from([(
                        JSON_CONTENT_TYPE.to_string(),
                        MediaType {
                            schema: Some(Schema::of_type(
                                api_param.schema_type.as_deref().unwrap_or("object"),
                            )),
                        },
                    )]),
                    required: api_param.required,
                });
                continue;
            };

            // The version segment is fixed per document once substituted.
            if substituted
                && location == ParameterLocation::Path
                && api_param.name == VERSION_PARAMETER
            {
                continue;
            }

            let mut parameter = Parameter {
                required: api_param.required,
                schema: Some(Schema::of_type(
                    api_param
                        .schema_type
                        .as_deref()
                        .unwrap_or(DEFAULT_SCHEMA_TYPE),
                )),
                example: api_param.example.clone(),
                ..Parameter::new(api_param.name.clone(), location)
            };

            let ctx = ParameterFilterContext {
                group_name,
                api_operation: api_op,
                api_parameter: api_param,
            };
            self.filters.apply_to_parameter(&mut parameter, &ctx)?;
            parameters.push(parameter);
        }

        let responses = if api_op.responses.is_empty() {
            IndexMap::from([(
                "200".to_string(),
                Response {
                    description: "Success".to_string(),
                },
            )])
        } else {
            api_op
                .responses
                .iter()
                .map(|(status, description)| {
                    (
                        status.clone(),
                        Response {
                            description: description.clone(),
                        },
                    )
                })
                .collect()
        };

        let mut operation = Operation {
            tags: api_op.tag.iter().cloned().collect(),
            summary: api_op.summary.clone(),
            operation_id: api_op.operation_id.clone(),
            parameters,
            request_body,
            responses,
            deprecated: api_op.deprecated.then_some(true),
        };

        let ctx = OperationFilterContext {
            group_name,
            path,
            method: api_op.method,
            api_operation: api_op,
        };
        self.filters.apply_to_operation(&mut operation, &ctx)?;
        Ok(operation)
    }
}

/// Generate the document set described by a config.
pub fn generate(config: &ServiceConfig) -> Result<DocumentSet, BuildError> {
    let catalog = config.catalog()?;
    Pipeline::from_config(config).run(&catalog, &config.operations)
}

fn check_versions(catalog: &VersionCatalog, description: &ApiDescription) -> Result<(), BuildError> {
    for op in &description.operations {
        if let Some(unknown) = op
            .versions
            .iter()
            .find(|v| catalog.find_version(v).is_none())
        {
            return Err(BuildError::UnknownVersion {
                method: op.method.to_string(),
                path: op.path.clone(),
                version: unknown.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ApiVersion;
    use crate::description::{ApiParameter, ParameterSource};
    use crate::document::HttpMethod;

    fn catalog() -> VersionCatalog {
        VersionCatalog::from_versions([(ApiVersion::new(1, 0), false)]).unwrap()
    }

    #[test]
    fn test_version_parameter_dropped_when_substituted() {
        let mut op = ApiOperation::new(HttpMethod::Get, "/api/v{version}/users");
        op.parameters = vec![ApiParameter::new("version", ParameterSource::Path)];
        let set = Pipeline::new(BuildMetadata::default())
            .with_filters(FilterChain::empty())
            .run(&catalog(), &ApiDescription::new(vec![op]))
            .unwrap();

        let doc = set.get("v1").unwrap();
        let users = doc.operation("/api/v1/users", HttpMethod::Get).unwrap();
        assert!(users.parameters.is_empty());
    }

    #[test]
    fn test_body_parameter_becomes_request_body() {
        let mut op = ApiOperation::new(HttpMethod::Post, "/users");
        let mut body = ApiParameter::new("user", ParameterSource::Body);
        body.required = true;
        body.route = Some(crate::description::RouteInfo { optional: false });
        op.parameters = vec![body];

        let set = Pipeline::new(BuildMetadata::default())
            .run(&catalog(), &ApiDescription::new(vec![op]))
            .unwrap();

        let created = set
            .get("v1")
            .unwrap()
            .operation("/users", HttpMethod::Post)
            .cloned()
            .unwrap();
        let request_body = created.request_body.unwrap();
        assert!(request_body.required);
        assert!(request_body.content.contains_key("application/json"));
        assert!(
            created
                .parameters
                .iter()
                .all(|p| p.location == ParameterLocation::Header)
        );
    }

    #[test]
    fn test_default_response() {
        let op = ApiOperation::new(HttpMethod::Get, "/health");
        let set = Pipeline::new(BuildMetadata::default())
            .run(&catalog(), &ApiDescription::new(vec![op]))
            .unwrap();
        let health = set
            .get("v1")
            .unwrap()
            .operation("/health", HttpMethod::Get)
            .cloned()
            .unwrap();
        assert_eq!(health.responses["200"].description, "Success");
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut op = ApiOperation::new(HttpMethod::Get, "/users");
        op.versions = vec![ApiVersion::new(9, 0)];
        let err = Pipeline::new(BuildMetadata::default())
            .run(&catalog(), &ApiDescription::new(vec![op]))
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownVersion { ref version, .. } if version == "9.0"));
    }

    #[test]
    fn test_filter_error_aborts_pass() {
        let op = ApiOperation::new(HttpMethod::Get, "/users");
        let chain = FilterChain::empty().with_operation_filter(|_, ctx| {
            Err(crate::error::FilterError::Operation {
                path: ctx.path.to_string(),
                reason: "malformed".to_string(),
            })
        });
        let result = Pipeline::new(BuildMetadata::default())
            .with_filters(chain)
            .run(&catalog(), &ApiDescription::new(vec![op]));
        assert!(matches!(result, Err(BuildError::Filter(_))));
    }
}
