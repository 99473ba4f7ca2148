use std::error::Error;
use std::sync::OnceLock;

use assay_core::{Outcome, Polarity, Reflect, Value};
use log::warn;

use crate::asserter::Asserter;
use crate::host::PanicHost;
use crate::policy::AssertPolicy;

static DEFAULT: OnceLock<Asserter<PanicHost>> = OnceLock::new();

/// Returns the shared asserter, building it on first use from [`AssertPolicy::from_env`].
pub fn asserter() -> &'static Asserter<PanicHost> {
    DEFAULT.get_or_init(|| {
        let policy = AssertPolicy::from_env().unwrap_or_else(|err| {
            warn!("ignoring assertion policy: {err}");
            AssertPolicy::default()
        });
        Asserter::with_policy(PanicHost, policy)
    })
}

/// Stops the test unless `outcome` agrees with `polarity`.
#[track_caller]
pub fn report(
    polarity: Polarity,
    outcome: Outcome,
    expected: &Value,
    actual: &Value,
) -> &'static Asserter {
    asserter().report(polarity, outcome, expected, actual)
}

/// Asserts that `expected` equals `actual`.
#[track_caller]
pub fn equal(expected: impl Reflect, actual: impl Reflect) -> &'static Asserter {
    asserter().equal(expected, actual)
}

/// Asserts that `expected` does not equal `actual`.
#[track_caller]
pub fn not_equal(expected: impl Reflect, actual: impl Reflect) -> &'static Asserter {
    asserter().not_equal(expected, actual)
}

/// Asserts that `condition` holds.
#[track_caller]
pub fn is_true(condition: bool) -> &'static Asserter {
    asserter().is_true(condition)
}

/// Asserts that `condition` does not hold.
#[track_caller]
pub fn is_false(condition: bool) -> &'static Asserter {
    asserter().is_false(condition)
}

/// Asserts that `value` is nil-like.
#[track_caller]
pub fn nil(value: impl Reflect) -> &'static Asserter {
    asserter().nil(value)
}

/// Asserts that `value` is not nil-like.
#[track_caller]
pub fn not_nil(value: impl Reflect) -> &'static Asserter {
    asserter().not_nil(value)
}

/// Alias of [`not_nil`].
#[track_caller]
pub fn present(value: impl Reflect) -> &'static Asserter {
    asserter().present(value)
}

/// Asserts that `err` is set and its message equals the concatenation of `parts`.
#[track_caller]
pub fn error(err: Option<&dyn Error>, parts: &[&str]) -> &'static Asserter {
    asserter().error(err, parts)
}

/// Asserts that `value` has length `length`.
#[track_caller]
pub fn len(length: usize, value: impl Reflect) -> &'static Asserter {
    asserter().len(length, value)
}

/// Asserts that `body` panics.
#[track_caller]
pub fn panics<F: FnOnce()>(body: F) -> &'static Asserter {
    asserter().panics(body)
}
