use std::panic::Location;

use assay_core::errors::{AssayError, ErrorInfo};
use assay_core::{Polarity, Value};
use log::debug;
use serde::Serialize;

use crate::host::{Failure, TestHost};

/// Renders a failed comparison and hands it to the host.
///
/// Implementations are swapped per asserter with [`crate::Asserter::with_reporter`]
/// or globally through [`crate::AssertPolicy::render`].
pub trait Reporter: Send + Sync {
    /// Renders the failure message for `expected` and `actual` under `polarity`.
    fn render(&self, polarity: Polarity, expected: &Value, actual: &Value) -> String;

    /// Renders the failure and stops the current test.
    fn report(
        &self,
        host: &dyn TestHost,
        polarity: Polarity,
        expected: &Value,
        actual: &Value,
        caller: Option<&'static Location<'static>>,
    ) -> ! {
        let failure = Failure::mismatch(self.render(polarity, expected, actual)).at(caller);
        host.fail_now(failure)
    }
}

/// Two-block textual diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDiff;

impl Reporter for TextDiff {
    fn render(&self, polarity: Polarity, expected: &Value, actual: &Value) -> String {
        match polarity {
            Polarity::Positive => format!("\nExpected:\n{expected}\ngot:\n{actual}"),
            Polarity::Negative => format!("\nExpected:\n{expected}\nto not equal:\n{actual}"),
        }
    }
}

#[derive(Serialize)]
struct Described<'a> {
    kind: assay_core::Kind,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
    display: String,
    value: &'a Value,
}

impl<'a> Described<'a> {
    fn of(value: &'a Value) -> Self {
        Self {
            kind: value.kind(),
            ty: value.type_of().map(|ty| ty.to_string()),
            display: value.to_string(),
            value,
        }
    }
}

#[derive(Serialize)]
struct JsonPayload<'a> {
    polarity: Polarity,
    expected: Described<'a>,
    actual: Described<'a>,
}

/// Structured diff rendered as a single JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDiff {
    /// Pretty-print the document.
    pub pretty: bool,
}

impl JsonDiff {
    /// Renders the JSON document describing the failed comparison.
    pub fn render_json(
        &self,
        polarity: Polarity,
        expected: &Value,
        actual: &Value,
    ) -> Result<String, AssayError> {
        let payload = JsonPayload {
            polarity,
            expected: Described::of(expected),
            actual: Described::of(actual),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&payload)
        } else {
            serde_json::to_string(&payload)
        };
        rendered.map_err(|err| {
            AssayError::Serde(
                ErrorInfo::new("assay.render_json", err.to_string())
                    .with_context("polarity", format!("{polarity:?}")),
            )
        })
    }
}

impl Reporter for JsonDiff {
    fn render(&self, polarity: Polarity, expected: &Value, actual: &Value) -> String {
        match self.render_json(polarity, expected, actual) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!("falling back to text diff: {err}");
                TextDiff.render(polarity, expected, actual)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_diff_blocks() {
        let rendered = TextDiff.render(Polarity::Positive, &Value::int(1), &Value::int(2));
        assert_eq!(rendered, "\nExpected:\n1\ngot:\n2");
        let rendered = TextDiff.render(Polarity::Negative, &Value::Absent, &Value::Absent);
        assert_eq!(rendered, "\nExpected:\n<nil>\nto not equal:\n<nil>");
    }

    #[test]
    fn json_diff_describes_both_sides() {
        let rendered = JsonDiff::default()
            .render_json(Polarity::Positive, &Value::str("a"), &Value::Absent)
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["polarity"], "positive");
        assert_eq!(doc["expected"]["kind"], "string");
        assert_eq!(doc["expected"]["type"], "string");
        assert_eq!(doc["expected"]["display"], "a");
        assert_eq!(doc["actual"]["kind"], "absent");
        assert!(doc["actual"].get("type").is_none());
    }
}
