//! Frame-rate bounded recomputation.
//!
//! Pointer moves arrive faster than frames. [`FrameThrottle`] is a
//! leading-edge coalescing flag: the first request after a tick schedules a
//! run, later ones are dropped until the host drains the flag on its next
//! frame. The run then reads whatever the capture holds at that moment.

use log::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    pending: bool,
    coalesced: u64,
}

impl FrameThrottle {
    pub const fn new() -> Self {
        Self {
            pending: false,
            coalesced: 0,
        }
    }

    /// Ask for a run on the next tick. Returns `true` if this request
    /// scheduled one, `false` if it was folded into a pending run.
    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            trace!("recompute already scheduled, dropping request");
            return false;
        }
        self.pending = true;
        true
    }

    /// Take the pending flag. Returns `true` exactly once per scheduled run.
    pub fn drain(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drop a scheduled run without executing it. Returns whether one was
    /// pending.
    pub fn cancel(&mut self) -> bool {
        let was = self.pending;
        if was {
            trace!("cancelling scheduled recompute");
        }
        self.pending = false;
        was
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests dropped because a run was already scheduled.
    pub const fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
