use tracing::{debug, info, warn};

use super::scheduler::{FrameHandle, FrameHost, ScheduleError};
use crate::domain::{Automaton, Initial, LifeError};
use crate::input::{InputAdapter, Pointer, SurfaceGeometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Paused,
    Running,
}

/// Result of delivering a fired frame.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The handle was cancelled or superseded; nothing ran.
    Stale,
    /// Ticked, redrew and scheduled the next frame.
    Rendered { generation: u64 },
    /// Ticked and redrew, but the next frame could not be scheduled.
    /// The loop is now paused.
    Stopped(ScheduleError),
    /// The tick failed. The loop is now paused.
    Failed(LifeError),
}

/// Drives an [`Automaton`] one generation per host frame.
///
/// The loop is running exactly when it holds an outstanding frame handle,
/// so there is never more than one scheduled frame.
pub struct RenderLoop<H: FrameHost> {
    automaton: Automaton,
    host: H,
    frame: Option<FrameHandle>,
}

impl<H: FrameHost> RenderLoop<H> {
    /// Start running immediately. If the host can't schedule the first
    /// frame the loop comes up paused; check [`is_running`](Self::is_running).
    pub fn new(automaton: Automaton, host: H) -> Self {
        let mut render_loop = Self::paused(automaton, host);
        if let Err(err) = render_loop.resume() {
            warn!(%err, "render loop starting paused");
        }
        render_loop
    }

    pub fn paused(automaton: Automaton, host: H) -> Self {
        Self {
            automaton,
            host,
            frame: None,
        }
    }

    pub fn state(&self) -> LoopState {
        if self.frame.is_some() {
            LoopState::Running
        } else {
            LoopState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Running -> Paused. The outstanding frame is cancelled and forgotten,
    /// so even if the host still fires it, it won't tick.
    pub fn pause(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
            debug!(
                frame = handle.id(),
                generation = self.automaton.generation(),
                "paused"
            );
        }
    }

    /// Paused -> Running. Schedules one frame; a no-op when already running.
    pub fn resume(&mut self) -> Result<(), ScheduleError> {
        if self.frame.is_some() {
            return Ok(());
        }
        let handle = self.host.request_frame()?;
        self.frame = Some(handle);
        debug!(frame = handle.id(), "resumed");
        Ok(())
    }

    /// Play/pause button.
    pub fn toggle_running(&mut self) -> Result<(), ScheduleError> {
        if self.is_running() {
            self.pause();
            Ok(())
        } else {
            self.resume()
        }
    }

    /// Host callback for a fired frame.
    pub fn on_frame(&mut self, handle: FrameHandle) -> FrameOutcome {
        if self.frame != Some(handle) {
            debug!(frame = handle.id(), "ignoring stale frame");
            return FrameOutcome::Stale;
        }
        self.frame = None;

        if let Err(err) = self.automaton.tick() {
            warn!(%err, "tick failed, pausing");
            return FrameOutcome::Failed(err);
        }
        self.host.redraw(self.automaton.cells_view());

        match self.resume() {
            Ok(()) => FrameOutcome::Rendered {
                generation: self.automaton.generation(),
            },
            Err(err) => {
                warn!(%err, "could not schedule next frame, pausing");
                FrameOutcome::Stopped(err)
            }
        }
    }

    /// Advance a single generation by hand. Only allowed while paused so it
    /// never races a scheduled frame.
    pub fn step(&mut self) -> Result<bool, LifeError> {
        if self.is_running() {
            return Ok(false);
        }
        self.automaton.tick()?;
        self.host.redraw(self.automaton.cells_view());
        Ok(true)
    }

    /// Flip the cell under the pointer. Run state is untouched; while paused
    /// the host is asked to redraw so the edit shows up at once.
    pub fn toggle_at(
        &mut self,
        adapter: &InputAdapter,
        pointer: Pointer,
        surface: &SurfaceGeometry,
    ) -> Option<(u32, u32)> {
        let cell = adapter.toggle(&mut self.automaton, pointer, surface)?;
        if !self.is_running() {
            self.host.redraw(self.automaton.cells_view());
        }
        Some(cell)
    }

    /// Replace the grid contents and restart from generation 0.
    pub fn reset(&mut self, initial: Initial) -> Result<(), LifeError> {
        self.automaton.reset(initial)?;
        info!(population = self.automaton.population(), "simulation reset");
        self.host.redraw(self.automaton.cells_view());
        Ok(())
    }

    /// Push the current generation to the host without ticking.
    pub fn redraw(&mut self) {
        self.host.redraw(self.automaton.cells_view());
    }

    /// Stop and hand back the parts.
    pub fn into_parts(mut self) -> (Automaton, H) {
        self.pause();
        (self.automaton, self.host)
    }
}
