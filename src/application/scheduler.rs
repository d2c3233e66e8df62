//! Frame scheduling hooks supplied by the host.

use thiserror::Error;

use crate::domain::CellsView;

/// Token for one scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("host refused to schedule a frame: {0}")]
    Refused(String),
    #[error("host is shutting down")]
    Closed,
}

/// What the render loop needs from whoever owns the display.
///
/// A frame requested here must later be delivered back through
/// [`RenderLoop::on_frame`](super::RenderLoop::on_frame) with the same handle,
/// unless it was cancelled first.
pub trait FrameHost {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Draw the given generation. The view dies with this call.
    fn redraw(&mut self, cells: CellsView<'_>);
}

/// One-slot frame queue for hosts that pump frames themselves.
///
/// Handles are never reused, so a cancelled handle can't alias a newer one.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame, replacing nothing: a second request while one is
    /// pending is refused.
    pub fn request(&mut self) -> Result<FrameHandle, ScheduleError> {
        if let Some(pending) = self.pending {
            return Err(ScheduleError::Refused(format!(
                "frame {} still pending",
                pending.id()
            )));
        }
        let handle = FrameHandle::new(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        Ok(handle)
    }

    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Take the frame that should fire now, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
