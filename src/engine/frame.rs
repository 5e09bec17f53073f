use std::collections::BTreeMap;

use crate::engine::animation_engine::BindingId;

/// Handle for a pending per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Pending animation-frame callbacks, each owned by one binding.
#[derive(Debug, Default)]
pub(crate) struct FrameScheduler {
    next: u64,
    pending: BTreeMap<FrameHandle, BindingId>,
}

impl FrameScheduler {
    pub(crate) fn request(&mut self, owner: BindingId) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.insert(handle, owner);
        handle
    }

    pub(crate) fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Callbacks due this frame. Requests made while running them wait for the next frame.
    pub(crate) fn due(&self) -> Vec<(FrameHandle, BindingId)> {
        self.pending.iter().map(|(h, b)| (*h, *b)).collect()
    }
}
