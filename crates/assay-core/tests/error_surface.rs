use assay_core::errors::{AssayError, ErrorInfo};
use assay_core::Value;

#[test]
fn usage_error_names_the_value() {
    let err = Value::Bool(true).len().unwrap_err();
    assert_eq!(err.info().code, "assay.len_unsupported");
    assert!(err.to_string().starts_with("usage error: Cannot get the length of true"));
    assert_eq!(err.info().context.get("kind").map(String::as_str), Some("Bool"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = AssayError::Config(
        ErrorInfo::new("assay.policy_parse", "bad policy")
            .with_context("path", "assay.toml")
            .with_hint("check the render field"),
    );
    assert_eq!(
        err.to_string(),
        "config error: bad policy (code: assay.policy_parse) | context: [path=assay.toml] | hint: check the render field"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = AssayError::Serde(ErrorInfo::new("assay.render_json", "boom"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "assay.render_json");
    let back: AssayError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
