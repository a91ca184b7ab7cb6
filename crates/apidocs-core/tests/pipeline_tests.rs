use std::path::Path;

use apidocs_core::builder::DEPRECATION_NOTICE;
use apidocs_core::catalog::{ApiVersion, VersionCatalog};
use apidocs_core::config::{self, ServiceConfig};
use apidocs_core::description::{ApiDescription, ApiOperation, ApiParameter, ParameterSource, RouteInfo};
use apidocs_core::document::{HttpMethod, Parameter, ParameterLocation, SpecDocument};
use apidocs_core::error::{BuildError, CatalogError};
use apidocs_core::{BuildMetadata, DocumentSet, Pipeline, generate};

const SERVICE: &str = include_str!("fixtures/versioned-service.yaml");

fn service_config() -> ServiceConfig {
    config::parse_config(SERVICE, Path::new("fixtures/versioned-service.yaml")).unwrap()
}

fn generated() -> DocumentSet {
    generate(&service_config()).expect("fixture should generate")
}

fn accept_language(params: &[Parameter]) -> Vec<&Parameter> {
    params
        .iter()
        .filter(|p| p.name == "Accept-Language" && p.location == ParameterLocation::Header)
        .collect()
}

#[test]
fn one_document_per_version() {
    let set = generated();
    let names: Vec<&str> = set.documents().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["v1", "v1.1", "v2"]);

    for (name, doc) in set.documents() {
        assert!(doc.info.title.contains(name));
        assert_eq!(doc.info.title, format!("Orders.Api {name}"));
        assert_eq!(doc.info.version, "2.7.1");
        assert_eq!(
            doc.info.license.as_ref().unwrap().name,
            "App Version: 2.7.1"
        );
    }
}

#[test]
fn deprecation_notice_only_on_deprecated_versions() {
    let set = generated();
    let v1 = set.get("v1").unwrap().info.description.clone().unwrap();
    let v2 = set.get("v2").unwrap().info.description.clone().unwrap();

    assert_eq!(v1, "order management");
    assert!(!v1.contains("deprecated"));
    assert_eq!(v2.matches(DEPRECATION_NOTICE).count(), 1);
}

#[test]
fn regeneration_is_deterministic() {
    let first = generated();
    let second = generated();
    assert_eq!(first, second);

    let v2 = second.get("v2").unwrap().info.description.clone().unwrap();
    assert_eq!(v2.matches(DEPRECATION_NOTICE).count(), 1);
}

#[test]
fn every_operation_has_exactly_one_accept_language() {
    let set = generated();
    for (_, doc) in set.documents() {
        for (path, method, op) in doc.operations() {
            let found = accept_language(&op.parameters);
            assert_eq!(found.len(), 1, "{method} {path}");
        }
    }
}

#[test]
fn injected_header_is_optional_with_example() {
    let set = generated();
    let list = set
        .get("v1")
        .unwrap()
        .operation("/api/v1/orders", HttpMethod::Get)
        .unwrap();
    let header = accept_language(&list.parameters)[0];
    assert!(!header.required);
    assert_eq!(header.example, Some(serde_json::json!("pt-BR")));
}

#[test]
fn declared_header_is_not_duplicated() {
    let set = generated();
    let get = set
        .get("v1")
        .unwrap()
        .operation("/api/v1/orders/{id}", HttpMethod::Get)
        .unwrap();
    let found = accept_language(&get.parameters);
    assert_eq!(found.len(), 1);
    assert!(found[0].required, "declared required flag should survive");
    assert_eq!(found[0].example, Some(serde_json::json!("pt-BR")));
}

#[test]
fn repeated_or_lowercase_header_normalized() {
    let mut op = ApiOperation::new(HttpMethod::Get, "/users");
    op.parameters = vec![
        ApiParameter::new("accept-language", ParameterSource::Header),
        ApiParameter::new("Accept-Language", ParameterSource::Header),
    ];

    let catalog = VersionCatalog::from_versions([(ApiVersion::new(1, 0), false)]).unwrap();
    let set = Pipeline::new(BuildMetadata::default())
        .run(&catalog, &ApiDescription::new(vec![op]))
        .unwrap();
    let get = set
        .get("v1")
        .unwrap()
        .operation("/users", HttpMethod::Get)
        .unwrap();

    assert_eq!(get.parameters.len(), 1);
    let found = accept_language(&get.parameters);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].example, Some(serde_json::json!("pt-BR")));
}

#[test]
fn query_version_parameter_survives_substitution() {
    let mut op = ApiOperation::new(HttpMethod::Get, "/api/v{version}/u");
    op.parameters = vec![
        ApiParameter::new("version", ParameterSource::Path),
        ApiParameter::new("version", ParameterSource::Query),
    ];

    let catalog = VersionCatalog::from_versions([(ApiVersion::new(1, 0), false)]).unwrap();
    let set = Pipeline::new(BuildMetadata::default())
        .run(&catalog, &ApiDescription::new(vec![op]))
        .unwrap();
    let get = set
        .get("v1")
        .unwrap()
        .operation("/api/v1/u", HttpMethod::Get)
        .unwrap();

    let versions: Vec<ParameterLocation> = get
        .parameters
        .iter()
        .filter(|p| p.name == "version")
        .map(|p| p.location)
        .collect();
    assert_eq!(versions, vec![ParameterLocation::Query]);
}

#[test]
fn version_segment_substituted_per_document() {
    let set = generated();
    assert!(set.get("v1").unwrap().paths.contains_key("/api/v1/orders"));
    assert!(set.get("v1.1").unwrap().paths.contains_key("/api/v1.1/orders"));
    assert!(set.get("v2").unwrap().paths.contains_key("/api/v2/orders"));

    let list = set
        .get("v2")
        .unwrap()
        .operation("/api/v2/orders", HttpMethod::Get)
        .unwrap();
    assert!(list.parameters.iter().all(|p| p.name != "version"));
}

#[test]
fn operations_restricted_to_their_versions() {
    let set = generated();
    let v1 = set.get("v1").unwrap();
    let v2 = set.get("v2").unwrap();

    assert!(v1.operation("/api/v1/orders", HttpMethod::Post).is_none());
    assert!(v2.operation("/api/v2/orders", HttpMethod::Post).is_some());
    assert!(v1.operation("/api/v1/orders/{id}", HttpMethod::Delete).is_some());
    assert!(v2.operation("/api/v2/orders/{id}", HttpMethod::Delete).is_none());
}

#[test]
fn parameter_metadata_merged() {
    let set = generated();
    let v1 = set.get("v1").unwrap();

    let get = v1.operation("/api/v1/orders/{id}", HttpMethod::Get).unwrap();
    let id = get.parameters.iter().find(|p| p.name == "id").unwrap();
    assert!(id.required);
    assert_eq!(id.description.as_deref(), Some("Order id"));

    let delete = v1
        .operation("/api/v1/orders/{id}", HttpMethod::Delete)
        .unwrap();
    let id = delete.parameters.iter().find(|p| p.name == "id").unwrap();
    assert!(id.required, "optional route must not demote a required flag");
    assert!(id.description.is_none());
    assert_eq!(delete.deprecated, Some(true));
}

#[test]
fn security_attached_to_every_document() {
    let set = generated();
    let mut schemes = Vec::new();
    for (_, doc) in set.documents() {
        assert_eq!(doc.components.security_schemes.len(), 1);
        assert_eq!(doc.security.len(), 1);
        assert!(doc.security[0].contains_key("Bearer"));
        schemes.push(doc.components.security_schemes["Bearer"].clone());
    }
    assert!(schemes.windows(2).all(|w| std::sync::Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn endpoints_cover_catalog() {
    let set = generated();
    let table = set.endpoints();
    assert_eq!(table.len(), set.len());
    assert_eq!(table.root, "/");
    for entry in &table.entries {
        assert!(entry.url.contains(&entry.group_name));
        assert_eq!(entry.url, format!("/spec/{}/document.json", entry.group_name));
        assert_eq!(entry.display_label, entry.group_name.to_uppercase());
    }
}

#[test]
fn serialized_document_shape() {
    let set = generated();
    let doc: &SpecDocument = set.get("v1.1").unwrap();
    let json = serde_json::to_value(doc).unwrap();

    assert_eq!(json["openapi"], "3.0.1");
    assert_eq!(json["info"]["title"], "Orders.Api v1.1");
    let post = &json["paths"]["/api/v1.1/orders"]["post"];
    assert_eq!(post["requestBody"]["required"], true);
    assert_eq!(post["requestBody"]["description"], "Order to create");
    assert_eq!(post["responses"]["200"]["description"], "Success");
    assert_eq!(json["security"], serde_json::json!([{ "Bearer": [] }]));
}

// Scenario A
#[test]
fn two_versions_one_deprecated() {
    let catalog = VersionCatalog::from_versions([
        (ApiVersion::new(1, 0), false),
        (ApiVersion::new(2, 0), true),
    ])
    .unwrap();
    let set = Pipeline::new(BuildMetadata::default())
        .run(&catalog, &ApiDescription::default())
        .unwrap();

    assert_eq!(set.len(), 2);
    let v1 = set.get("v1").unwrap().info.description.clone().unwrap();
    let v2 = set.get("v2").unwrap().info.description.clone().unwrap();
    assert!(!v1.contains("deprecated"));
    assert!(v2.contains("deprecated"));
}

// Scenarios B, C and D in a single operation.
#[test]
fn parameter_and_header_scenarios() {
    let mut op = ApiOperation::new(HttpMethod::Get, "/users/{id}");
    let mut id = ApiParameter::new("id", ParameterSource::Path);
    id.route = Some(RouteInfo { optional: false });
    id.model_description = Some("User id".to_string());
    let mut lang = ApiParameter::new("Accept-Language", ParameterSource::Header);
    lang.example = Some(serde_json::json!("en-US"));
    op.parameters = vec![id, lang];

    let catalog = VersionCatalog::from_versions([(ApiVersion::new(1, 0), false)]).unwrap();
    let set = Pipeline::new(BuildMetadata::default())
        .run(&catalog, &ApiDescription::new(vec![op]))
        .unwrap();
    let get = set
        .get("v1")
        .unwrap()
        .operation("/users/{id}", HttpMethod::Get)
        .unwrap();

    let id = get.parameters.iter().find(|p| p.name == "id").unwrap();
    assert!(id.required);
    assert_eq!(id.description.as_deref(), Some("User id"));

    let found = accept_language(&get.parameters);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].example, Some(serde_json::json!("en-US")));
}

#[test]
fn duplicate_group_names_abort_generation() {
    let mut config = service_config();
    let extra = config.versions[1].clone();
    config.versions.push(extra);

    let err = generate(&config).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Catalog(CatalogError::DuplicateGroupName(ref g)) if g == "v1"
    ));
}

#[test]
fn configured_root_and_language() {
    let mut config = service_config();
    config.server.root = "docs/".to_string();
    config.filters.accept_language = "en-GB".to_string();

    let set = generate(&config).unwrap();
    assert_eq!(set.endpoints().root, "/docs");
    let list = set
        .get("v1")
        .unwrap()
        .operation("/api/v1/orders", HttpMethod::Get)
        .unwrap();
    assert_eq!(
        accept_language(&list.parameters)[0].example,
        Some(serde_json::json!("en-GB"))
    );
}
