mod common;

use assay_check::{
    AbortHost, AssertPolicy, Asserter, JsonDiff, Polarity, RenderStyle, Reporter, Value,
};

use common::{asserter_with, expect_mismatch};

struct OneLine;

impl Reporter for OneLine {
    fn render(&self, polarity: Polarity, expected: &Value, actual: &Value) -> String {
        let verb = match polarity {
            Polarity::Positive => "==",
            Polarity::Negative => "!=",
        };
        format!("want {expected} {verb} {actual}")
    }
}

#[test]
fn custom_reporter_replaces_the_text_diff() {
    let a = Asserter::new(AbortHost::without_helper_frames()).with_reporter(OneLine);
    let failure = expect_mismatch(|| {
        a.equal("left", "right");
    });
    assert_eq!(failure.message, "want left == right");
    let failure = expect_mismatch(|| {
        a.not_equal(3, 3);
    });
    assert_eq!(failure.message, "want 3 != 3");
}

#[test]
fn json_policy_renders_structured_failures() {
    let a = asserter_with(AssertPolicy {
        render: RenderStyle::Json,
        ..AssertPolicy::default()
    });
    let failure = expect_mismatch(|| {
        a.equal(vec![1, 2], vec![1, 3]);
    });
    let doc: serde_json::Value = serde_json::from_str(&failure.message).unwrap();
    assert_eq!(doc["polarity"], "positive");
    assert_eq!(doc["expected"]["type"], "[]int32");
    assert_eq!(doc["expected"]["display"], "[1 2]");
    assert_eq!(doc["actual"]["display"], "[1 3]");
    assert_eq!(doc["actual"]["kind"], "sequence");
}

#[test]
fn pretty_json_spans_lines() {
    let rendered = JsonDiff { pretty: true }.render(
        Polarity::Negative,
        &Value::Bool(true),
        &Value::Bool(true),
    );
    assert!(rendered.contains('\n'));
    let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(doc["polarity"], "negative");
}
