use std::path::Path;

use scim_config::ScimConfig;
use scim_resource::{Resource, ScimReason};
use scim_service::{
    DeleteParamParser, HttpMethod, MutabilityCheck, Processor, RequestContext, RequestParts,
    ResourceKind, ScimEngine, SearchParamParser,
};

fn fixtures() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

/// Engine bootstrapped from a `scim.toml` whose `schemas` glob matches the
/// fixture schemas.
fn bootstrap(extra: &str) -> ScimEngine {
    let dir = tempfile::tempdir().unwrap();
    let schemas = fixtures().join("schemas/*.json");
    let toml = format!(
        "[service]\nitems_per_page = 5\nschemas = [{:?}]\n{extra}",
        schemas.display().to_string()
    );
    let path = dir.path().join("scim.toml");
    std::fs::write(&path, toml).unwrap();

    let config = ScimConfig::load(&path).unwrap();
    ScimEngine::bootstrap(&config, dir.path()).unwrap()
}

fn resource(name: &str) -> Resource {
    let content = std::fs::read_to_string(fixtures().join(name)).unwrap();
    Resource::from_json(serde_json::from_str(&content).unwrap()).unwrap()
}

#[test]
fn bootstrap_loads_schema_glob() {
    let engine = bootstrap("");
    let schema = engine.schema_for(ResourceKind::User).unwrap();
    assert_eq!(schema.name.as_deref(), Some("User"));
    assert!(schema.attribute("emails").is_some_and(|a| a.multi_valued));
}

#[test]
fn bootstrap_fails_on_missing_schema_file() {
    let config: ScimConfig = "[service]\nschemas = [\"does-not-exist.json\"]\n".parse().unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(ScimEngine::bootstrap(&config, dir.path()).is_err());
}

#[test]
fn bootstrap_resolves_patterns_against_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("schemas")).unwrap();
    std::fs::copy(
        fixtures().join("schemas/user.json"),
        dir.path().join("schemas/user.json"),
    )
    .unwrap();

    let config: ScimConfig = "[service]\nschemas = [\"schemas/*.json\"]\n".parse().unwrap();
    let engine = ScimEngine::bootstrap(&config, dir.path()).unwrap();
    assert!(engine.schema_for(ResourceKind::User).is_ok());
}

#[test]
fn user_query_get() {
    let engine = bootstrap("");
    let req = RequestParts::new(HttpMethod::Get)
        .with_query("filter", r#"userName sw "david" and not (active eq false)"#)
        .with_query("sortBy", "userName");
    let mut ctx = RequestContext::new(&req);
    SearchParamParser::new(&engine, ResourceKind::User)
        .process(&mut ctx)
        .unwrap();

    let query = ctx.query.unwrap();
    assert_eq!(query.page_size, 5);
    assert_eq!(query.sort_by.as_deref(), Some("userName"));
    let names: Vec<String> = query
        .filter
        .attributes()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(names, vec!["userName", "active"]);
}

#[test]
fn filter_operand_cannot_embed_filter() {
    let engine = bootstrap("");
    let req = RequestParts::new(HttpMethod::Get)
        .with_query("filter", r#"emails[type eq "work"].value ew "@example.com""#);
    let mut ctx = RequestContext::new(&req);
    let err = SearchParamParser::new(&engine, ResourceKind::User)
        .process(&mut ctx)
        .unwrap_err();
    assert_eq!(*err.reason(), ScimReason::InvalidSyntax);
    assert!(ctx.query.is_none());
}

#[test]
fn root_query_without_root_schema_is_server_error() {
    let engine = bootstrap("");
    let req = RequestParts::new(HttpMethod::Get);
    let mut ctx = RequestContext::new(&req);
    let err = SearchParamParser::new(&engine, ResourceKind::Root)
        .process(&mut ctx)
        .unwrap_err();
    assert_eq!(*err.reason(), ScimReason::ServerError);
    assert_eq!(err.reason().http_status(), 500);
}

#[test]
fn user_delete_then_replace_check() {
    let engine = bootstrap("[validation]\nunassigned_immutable_is_ignored = true\n");

    let req = RequestParts::new(HttpMethod::Delete)
        .with_url_param("userId", "6B69753B-4E38-444E-8AC6-9D0E4D644D80");
    let mut ctx = RequestContext::new(&req);
    DeleteParamParser::new(&engine, ResourceKind::User)
        .process(&mut ctx)
        .unwrap();
    assert_eq!(
        ctx.identity.as_deref(),
        Some("6B69753B-4E38-444E-8AC6-9D0E4D644D80")
    );

    // The schema resolved by the delete step is reused for a replace check.
    ctx.reference = Some(resource("david.json"));
    ctx.resource = Some(resource("omits_immutable.json"));
    MutabilityCheck::new(&engine).process(&mut ctx).unwrap();

    ctx.resource = Some(resource("changes_readonly_complex.json"));
    let err = MutabilityCheck::new(&engine).process(&mut ctx).unwrap_err();
    assert_eq!(*err.reason(), ScimReason::Mutability);
    assert_eq!(err.reason().scim_type(), Some("mutability"));
}

#[test]
fn path_resolution_through_engine() {
    let engine = bootstrap("");
    let schema = engine.schema_for(ResourceKind::User).unwrap();

    let attr = engine
        .resolve_path(&schema, r#"emails[type eq "work" and primary eq true].value"#)
        .unwrap();
    assert_eq!(attr.name, "value");

    let err = engine
        .resolve_path(&schema, r#"name[givenName eq "David"].familyName"#)
        .unwrap_err();
    assert_eq!(*err.reason(), ScimReason::InvalidPath);

    let err = engine.resolve_path(&schema, "emails[type eq]").unwrap_err();
    assert_eq!(*err.reason(), ScimReason::InvalidSyntax);
}
