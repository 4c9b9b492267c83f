/// Opaque handle for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct FrameHandle(pub u64);

/// Per-frame scheduling primitive.
///
/// `request_frame` asks the host to call [`crate::Backdrop::on_animation_frame`] with the
/// returned handle before the next repaint. A cancelled handle must not be delivered; if it is
/// anyway, the backdrop ignores it.
pub trait FrameScheduler {
    /// Schedule one callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending callback.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven explicitly by the caller.
///
/// Keeps the outstanding handles in request order and counts requests and cancellations.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    outstanding: Vec<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Fresh scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and neither cancelled nor taken.
    pub fn outstanding(&self) -> &[FrameHandle] {
        &self.outstanding
    }

    /// Pop the oldest outstanding handle, as the host would when the next repaint is due.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }

    /// Total `request_frame` calls.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total `cancel_frame` calls that hit an outstanding handle.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.outstanding.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.outstanding.iter().position(|h| *h == handle) {
            self.outstanding.remove(pos);
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/schedule.rs"]
mod tests;
