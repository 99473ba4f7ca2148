#![allow(dead_code)]

use assay_check::{AbortHost, AssertPolicy, Asserter, Failure, FailureKind, TestAbort};

pub fn asserter() -> Asserter<AbortHost> {
    Asserter::new(AbortHost::new())
}

pub fn asserter_with(policy: AssertPolicy) -> Asserter<AbortHost> {
    Asserter::with_policy(AbortHost::new(), policy)
}

/// Runs `body` and returns the failure that stopped it.
pub fn failure_of(body: impl FnOnce()) -> Option<Failure> {
    TestAbort::catch(body).map(|abort| abort.failure)
}

#[track_caller]
pub fn expect_pass(body: impl FnOnce()) {
    if let Some(failure) = failure_of(body) {
        panic!("assertion unexpectedly failed: {failure}");
    }
}

#[track_caller]
pub fn expect_mismatch(body: impl FnOnce()) -> Failure {
    let failure = failure_of(body).expect("assertion should have failed");
    assert_eq!(failure.kind, FailureKind::Mismatch);
    failure
}
