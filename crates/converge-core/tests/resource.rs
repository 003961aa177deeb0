use converge_canonical::Document;
use converge_core::{
    hashed_name, verify_hashed_name, with_hashed_name, CoreError, ResourceError, ResourceId,
};
use serde_json::{json, Value};

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn app_config() -> Document {
    doc(json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {"name": "app-config", "namespace": "prod"},
        "data": {"b": "2", "a": "1"}
    }))
}

#[test]
fn resource_id_reads_identity() {
    let id = ResourceId::from_document(&app_config()).unwrap();

    assert_eq!(id.kind, "ConfigMap");
    assert_eq!(id.name, "app-config");
    assert_eq!(id.namespace.as_deref(), Some("prod"));
    assert_eq!(id.to_string(), "ConfigMap/prod/app-config");
}

#[test]
fn resource_id_requires_kind_and_name() {
    let no_kind = doc(json!({"metadata": {"name": "x"}}));
    let no_name = doc(json!({"kind": "Secret", "metadata": {}}));

    assert!(matches!(
        ResourceId::from_document(&no_kind),
        Err(CoreError::InvalidResource(_))
    ));
    assert!(matches!(
        ResourceId::from_document(&no_name),
        Err(CoreError::InvalidResource(_))
    ));
}

#[test]
fn hashed_name_appends_fingerprint() {
    assert_eq!(
        hashed_name(&app_config()).unwrap().as_deref(),
        Some("app-config-k227d6b494")
    );
}

#[test]
fn hashed_name_skips_other_kinds() {
    let service = doc(json!({"kind": "Service", "metadata": {"name": "web"}}));
    assert_eq!(hashed_name(&service).unwrap(), None);
    assert_eq!(with_hashed_name(&service).unwrap(), service);
}

#[test]
fn with_hashed_name_renames_a_copy() {
    let original = app_config();
    let renamed = with_hashed_name(&original).unwrap();

    assert_eq!(renamed["metadata"]["name"], json!("app-config-k227d6b494"));
    assert_eq!(original["metadata"]["name"], json!("app-config"));
    assert_eq!(renamed["data"], original["data"]);
}

#[test]
fn verify_hashed_name_detects_drift() {
    let mut renamed = with_hashed_name(&app_config()).unwrap();
    assert!(verify_hashed_name(&renamed).unwrap());

    renamed["data"]["a"] = json!("changed");
    assert!(!verify_hashed_name(&renamed).unwrap());
}

#[test]
fn verify_hashed_name_rejects_unsuffixed_names() {
    let plain = doc(json!({"kind": "ConfigMap", "metadata": {"name": "plain"}}));
    let bogus = doc(json!({"kind": "ConfigMap", "metadata": {"name": "app-config"}}));

    assert!(matches!(
        verify_hashed_name(&plain),
        Err(CoreError::InvalidResource(_))
    ));
    assert!(matches!(
        verify_hashed_name(&bogus),
        Err(CoreError::Fingerprint(_))
    ));
}

#[test]
fn unsupported_kind_propagates_from_verification() {
    let pod = doc(json!({"kind": "Pod", "metadata": {"name": "web-c55cmkg5g6"}}));
    assert!(matches!(verify_hashed_name(&pod), Err(CoreError::Hash(_))));
}

#[test]
fn resource_error_formats_kind_and_name() {
    let err = ResourceError::new("Secret", "creds", "Failed to retrieve requested object");
    assert_eq!(err.to_string(), "Secret creds: Failed to retrieve requested object");
}
