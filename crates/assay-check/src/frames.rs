use std::panic::Location;

use log::trace;

use crate::host::TestHost;
use crate::policy::AssertPolicy;

/// Decision taken once per asserter on whether failures carry the caller location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMarking {
    /// Failures point at the test code calling the assertion.
    Caller,
    /// Marking is unavailable or switched off; failures carry no location.
    Disabled,
}

impl FrameMarking {
    /// Probes the host capability and the policy switch.
    pub fn probe<H: TestHost + ?Sized>(host: &H, policy: &AssertPolicy) -> Self {
        let supported = host.supports_helper_frames();
        let marking = if supported && policy.helper_frames {
            FrameMarking::Caller
        } else {
            FrameMarking::Disabled
        };
        trace!(
            "helper frames: host_supported={supported} enabled={} -> {marking:?}",
            policy.helper_frames
        );
        marking
    }

    /// Returns the location to attach to a failure raised from `caller`.
    pub fn mark(self, caller: &'static Location<'static>) -> Option<&'static Location<'static>> {
        match self {
            FrameMarking::Caller => Some(caller),
            FrameMarking::Disabled => None,
        }
    }
}
