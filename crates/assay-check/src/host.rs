use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe, Location};

use log::debug;

/// Failure family delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The comparison outcome disagrees with the assertion's polarity.
    Mismatch,
    /// The assertion was called on a value it cannot handle.
    Usage,
}

/// Failure handed to [`TestHost::fail_now`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Failure family.
    pub kind: FailureKind,
    /// Rendered message.
    pub message: String,
    /// Test code location that made the failing assertion, when helper frames are marked.
    pub caller: Option<&'static Location<'static>>,
}

impl Failure {
    /// Creates a mismatch failure.
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Mismatch,
            message: message.into(),
            caller: None,
        }
    }

    /// Creates a usage failure.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Usage,
            message: message.into(),
            caller: None,
        }
    }

    /// Attributes the failure to `caller`.
    pub fn at(mut self, caller: Option<&'static Location<'static>>) -> Self {
        self.caller = caller;
        self
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.caller {
            Some(caller) => write!(f, "{caller}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Test runner integration used by assertions.
pub trait TestHost {
    /// Marks the current test as failed and unwinds out of it.
    fn fail_now(&self, failure: Failure) -> !;

    /// Returns whether the host can attribute failures to the calling test code.
    fn supports_helper_frames(&self) -> bool {
        false
    }
}

/// Host for the built-in Rust test harness: failing panics with the rendered message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicHost;

impl TestHost for PanicHost {
    fn fail_now(&self, failure: Failure) -> ! {
        debug!("failing test: {:?} failure", failure.kind);
        panic!("{failure}")
    }

    fn supports_helper_frames(&self) -> bool {
        true
    }
}

/// Panic payload raised by [`AbortHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAbort {
    /// Failure that stopped the test.
    pub failure: Failure,
}

impl TestAbort {
    /// Runs `body` and returns the abort that stopped it, if any.
    ///
    /// Panics that are not a [`TestAbort`] keep unwinding.
    pub fn catch<F: FnOnce()>(body: F) -> Option<TestAbort> {
        match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(()) => None,
            Err(payload) => match payload.downcast::<TestAbort>() {
                Ok(abort) => Some(*abort),
                Err(other) => panic::resume_unwind(other),
            },
        }
    }
}

/// Host that unwinds with a typed [`TestAbort`] payload.
///
/// Suitable for runners that inspect panic payloads instead of messages.
#[derive(Debug, Clone, Copy)]
pub struct AbortHost {
    helper_frames: bool,
}

impl AbortHost {
    /// Host with helper-frame support.
    pub fn new() -> Self {
        Self {
            helper_frames: true,
        }
    }

    /// Host lacking helper-frame support.
    pub fn without_helper_frames() -> Self {
        Self {
            helper_frames: false,
        }
    }
}

impl Default for AbortHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHost for AbortHost {
    fn fail_now(&self, failure: Failure) -> ! {
        debug!("aborting test: {:?} failure", failure.kind);
        panic::panic_any(TestAbort { failure })
    }

    fn supports_helper_frames(&self) -> bool {
        self.helper_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_returns_abort_payload() {
        let abort = TestAbort::catch(|| {
            AbortHost::new().fail_now(Failure::usage("boom"));
        });
        let abort = abort.expect("body should abort");
        assert_eq!(abort.failure.kind, FailureKind::Usage);
        assert_eq!(abort.failure.message, "boom");
    }

    #[test]
    fn catch_is_empty_when_body_completes() {
        assert!(TestAbort::catch(|| {}).is_none());
    }

    #[test]
    fn display_prefixes_caller() {
        let failure = Failure::mismatch("\nExpected:\n1\ngot:\n2").at(Some(Location::caller()));
        let rendered = failure.to_string();
        assert!(rendered.starts_with(file!()));
        assert!(rendered.ends_with(": \nExpected:\n1\ngot:\n2"));
    }
}
