#![deny(missing_docs)]
#![doc = "Test assertions built on the assay comparison engine: host integration, failure reporting and convenience checks."]

/// Assertion methods bound to a host.
pub mod asserter;
/// Helper-frame marking.
pub mod frames;
/// Process-wide default asserter and free assertion functions.
pub mod global;
/// Test runner boundary.
pub mod host;
/// Assertion policy configuration.
pub mod policy;
/// Failure rendering strategies.
pub mod reporter;

pub use assay_core::{compare, evaluate, AssayError, Outcome, Polarity, Reflect, Type, Value};
pub use asserter::Asserter;
pub use frames::FrameMarking;
pub use global::{
    asserter, equal, error, is_false, is_true, len, nil, not_equal, not_nil, panics, present,
    report,
};
pub use host::{AbortHost, Failure, FailureKind, PanicHost, TestAbort, TestHost};
pub use policy::{AssertPolicy, RenderStyle, POLICY_ENV};
pub use reporter::{JsonDiff, Reporter, TextDiff};
