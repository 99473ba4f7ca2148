//! The comparator deciding whether an expected and an actual value are equal.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::convert::convert;
use crate::equality::{both_nan, deep_equal};
use crate::nil::is_nil_like;
use crate::value::Value;

/// Result of comparing an expected value with an actual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The values are equal.
    Equal,
    /// The values differ.
    NotEqual,
    /// The expected value cannot be converted into the actual value's type.
    Incomparable,
}

impl Outcome {
    /// Returns whether the outcome stops an assertion of `polarity`.
    pub fn is_mismatch(self, polarity: Polarity) -> bool {
        polarity.fails(self)
    }
}

/// Whether an assertion expects equality or inequality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Assert equal.
    Positive,
    /// Assert not equal.
    Negative,
}

impl Polarity {
    /// Returns whether `outcome` is a failure under this polarity.
    ///
    /// [`Outcome::Incomparable`] never fails: asserting equality between values of
    /// unrelated types passes silently. Suites that rely on this keep working; use
    /// [`Polarity::fails_strict`] to reject it.
    pub fn fails(self, outcome: Outcome) -> bool {
        match self {
            Polarity::Positive => outcome == Outcome::NotEqual,
            Polarity::Negative => outcome == Outcome::Equal,
        }
    }

    /// Like [`Polarity::fails`], but positive assertions also fail on
    /// [`Outcome::Incomparable`].
    pub fn fails_strict(self, outcome: Outcome) -> bool {
        match self {
            Polarity::Positive => outcome != Outcome::Equal,
            Polarity::Negative => outcome == Outcome::Equal,
        }
    }
}

/// Full comparison result, including the converted expected value.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Decided outcome.
    pub outcome: Outcome,
    /// Expected value converted into the actual value's type, when a conversion happened.
    pub converted: Option<Value>,
}

impl Comparison {
    fn decided(outcome: Outcome) -> Self {
        Self {
            outcome,
            converted: None,
        }
    }

    /// Returns the expected value as it should be shown next to `actual`.
    pub fn shown_expected<'a>(&'a self, expected: &'a Value) -> &'a Value {
        self.converted.as_ref().unwrap_or(expected)
    }
}

/// Compares `expected` with `actual`, keeping the converted expected value.
pub fn evaluate(expected: &Value, actual: &Value) -> Comparison {
    let expected_nil = is_nil_like(expected);
    let actual_nil = is_nil_like(actual);
    if expected_nil || actual_nil {
        let outcome = if expected_nil && actual_nil {
            Outcome::Equal
        } else {
            Outcome::NotEqual
        };
        trace!("nil-like comparison: expected_nil={expected_nil} actual_nil={actual_nil}");
        return Comparison::decided(outcome);
    }

    let Some(target) = actual.type_of() else {
        return Comparison::decided(Outcome::Incomparable);
    };
    let Some(converted) = convert(expected, &target) else {
        trace!("expected value of kind {:?} does not convert to {target}", expected.kind());
        return Comparison::decided(Outcome::Incomparable);
    };

    let outcome = if both_nan(&converted, actual) || deep_equal(&converted, actual) {
        Outcome::Equal
    } else {
        Outcome::NotEqual
    };
    trace!("compared as {target}: {outcome:?}");
    Comparison {
        outcome,
        converted: Some(converted),
    }
}

/// Compares `expected` with `actual`.
pub fn compare(expected: &Value, actual: &Value) -> Outcome {
    evaluate(expected, actual).outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_table() {
        assert!(Polarity::Positive.fails(Outcome::NotEqual));
        assert!(!Polarity::Positive.fails(Outcome::Equal));
        assert!(!Polarity::Positive.fails(Outcome::Incomparable));
        assert!(Polarity::Negative.fails(Outcome::Equal));
        assert!(!Polarity::Negative.fails(Outcome::NotEqual));
        assert!(!Polarity::Negative.fails(Outcome::Incomparable));
        assert!(Polarity::Positive.fails_strict(Outcome::Incomparable));
        assert!(!Polarity::Negative.fails_strict(Outcome::Incomparable));
        assert!(Outcome::Equal.is_mismatch(Polarity::Negative));
        assert!(!Outcome::Incomparable.is_mismatch(Polarity::Positive));
    }

    #[test]
    fn converted_value_is_shown() {
        let expected = Value::int(42);
        let actual = Value::float(41.5);
        let comparison = evaluate(&expected, &actual);
        assert_eq!(comparison.outcome, Outcome::NotEqual);
        assert_eq!(comparison.shown_expected(&expected), &Value::float(42.0));
    }
}
