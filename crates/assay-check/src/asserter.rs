use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

use assay_core::{evaluate, Outcome, Polarity, Reflect, Value};
use log::debug;

use crate::frames::FrameMarking;
use crate::host::{Failure, PanicHost, TestHost};
use crate::policy::AssertPolicy;
use crate::reporter::Reporter;

/// Assertion entry point bound to a test host.
///
/// Every assertion returns `&Self` so checks can be chained; a failing check
/// never returns because the host stops the test.
pub struct Asserter<H: TestHost = PanicHost> {
    host: H,
    reporter: Box<dyn Reporter>,
    frames: FrameMarking,
    policy: AssertPolicy,
}

impl<H: TestHost> fmt::Debug for Asserter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asserter")
            .field("frames", &self.frames)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<H: TestHost> Asserter<H> {
    /// Creates an asserter with the default policy.
    pub fn new(host: H) -> Self {
        Self::with_policy(host, AssertPolicy::default())
    }

    /// Creates an asserter with `policy`; helper-frame support is probed once here.
    pub fn with_policy(host: H, policy: AssertPolicy) -> Self {
        let frames = FrameMarking::probe(&host, &policy);
        Self {
            reporter: policy.reporter(),
            host,
            frames,
            policy,
        }
    }

    /// Replaces the reporter used for mismatches.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Returns the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &AssertPolicy {
        &self.policy
    }

    /// Returns the helper-frame decision taken at construction.
    pub fn frames(&self) -> FrameMarking {
        self.frames
    }

    /// Stops the test unless `outcome` agrees with `polarity`.
    #[track_caller]
    pub fn report(
        &self,
        polarity: Polarity,
        outcome: Outcome,
        expected: &Value,
        actual: &Value,
    ) -> &Self {
        let caller = self.frames.mark(Location::caller());
        if self.policy.fails(polarity, outcome) {
            debug!("{polarity:?} assertion failed with outcome {outcome:?}");
            self.reporter
                .report(&self.host, polarity, expected, actual, caller)
        }
        self
    }

    #[track_caller]
    fn check(&self, polarity: Polarity, expected: Value, actual: Value) -> &Self {
        let comparison = evaluate(&expected, &actual);
        self.report(
            polarity,
            comparison.outcome,
            comparison.shown_expected(&expected),
            &actual,
        )
    }

    #[track_caller]
    fn usage(&self, message: String) -> ! {
        let caller = self.frames.mark(Location::caller());
        debug!("assertion misused: {message}");
        self.host.fail_now(Failure::usage(message).at(caller))
    }

    /// Asserts that `expected` equals `actual`.
    #[track_caller]
    pub fn equal(&self, expected: impl Reflect, actual: impl Reflect) -> &Self {
        self.check(Polarity::Positive, expected.reflect(), actual.reflect())
    }

    /// Asserts that `expected` does not equal `actual`.
    #[track_caller]
    pub fn not_equal(&self, expected: impl Reflect, actual: impl Reflect) -> &Self {
        self.check(Polarity::Negative, expected.reflect(), actual.reflect())
    }

    /// Asserts that `condition` holds.
    #[track_caller]
    pub fn is_true(&self, condition: bool) -> &Self {
        self.equal(true, condition)
    }

    /// Asserts that `condition` does not hold.
    #[track_caller]
    pub fn is_false(&self, condition: bool) -> &Self {
        self.equal(false, condition)
    }

    /// Asserts that `value` is nil-like.
    #[track_caller]
    pub fn nil(&self, value: impl Reflect) -> &Self {
        self.check(Polarity::Positive, Value::Absent, value.reflect())
    }

    /// Asserts that `value` is not nil-like.
    #[track_caller]
    pub fn not_nil(&self, value: impl Reflect) -> &Self {
        self.check(Polarity::Negative, Value::Absent, value.reflect())
    }

    /// Alias of [`Asserter::not_nil`].
    #[track_caller]
    pub fn present(&self, value: impl Reflect) -> &Self {
        self.not_nil(value)
    }

    /// Asserts that `err` is set and, when `parts` is not empty, that its message
    /// equals the concatenation of `parts`.
    #[track_caller]
    pub fn error(&self, err: Option<&dyn Error>, parts: &[&str]) -> &Self {
        let value = err.map_or_else(Value::nil_error, Value::from_error);
        self.error_value(value, parts)
    }

    /// [`Asserter::error`] applied to the error side of `result`.
    #[track_caller]
    pub fn error_of<T, E: Error>(&self, result: &Result<T, E>, parts: &[&str]) -> &Self {
        let value = match result {
            Ok(_) => Value::nil_error(),
            Err(err) => Value::from_error(err),
        };
        self.error_value(value, parts)
    }

    /// [`Asserter::error`] for an error already converted into a [`Value`].
    #[track_caller]
    pub fn error_value(&self, err: Value, parts: &[&str]) -> &Self {
        self.not_nil(err.clone());
        if !parts.is_empty() {
            let text = err
                .error_text()
                .map(str::to_owned)
                .unwrap_or_else(|| err.to_string());
            self.equal(parts.concat(), text);
        }
        self
    }

    /// Asserts that `value`, after following one pointer, has length `length`.
    ///
    /// Values without a length stop the test with a usage failure.
    #[track_caller]
    pub fn len(&self, length: usize, value: impl Reflect) -> &Self {
        let value = value.reflect();
        match value.len() {
            Ok(actual) => self.equal(length, actual),
            Err(err) => self.usage(err.info().message.clone()),
        }
    }

    /// Asserts that `body` panics.
    #[track_caller]
    pub fn panics<F: FnOnce()>(&self, body: F) -> &Self {
        if panic::catch_unwind(AssertUnwindSafe(body)).is_ok() {
            let caller = self.frames.mark(Location::caller());
            self.reporter.report(
                &self.host,
                Polarity::Positive,
                &Value::str("a panic"),
                &Value::str("normal return"),
                caller,
            )
        }
        self
    }
}
