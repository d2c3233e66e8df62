mod render_loop;
mod scheduler;

pub use render_loop::{FrameOutcome, LoopState, RenderLoop};
pub use scheduler::{FrameHandle, FrameHost, FrameQueue, ScheduleError};
