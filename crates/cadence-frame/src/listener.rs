// Copyright 2026 the Cadence authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The application-facing callback surface of the scheduler.
//!
//! The application implements [`FrameListener`] and receives one callback
//! per phase per frame, each handed a [`FrameContext`]. The context is the
//! only route to the scheduler's collaborators during a callback; there is
//! no ambient "current app" to reach for.

use crate::error::PhaseError;
use crate::submit::SubmitMode;
use cadence_core::{DependencyOrder, EventSender, FrameEvent, WidgetRegistry};

/// Collaborator that performs the double-buffered presentation swap.
pub trait Presenter {
    /// Presents the current back buffer.
    fn swap_buffers(&mut self);
}

/// A presenter that does nothing. Used by tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn swap_buffers(&mut self) {}
}

/// A pending request to leave the run loop.
///
/// Set through [`FrameContext::request_stop`] (or the scheduler's own
/// accessor) and honored only at the frame boundary, never mid-phase, so a
/// frame that began always runs its full phase sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct StopRequest {
    pub(crate) requested: bool,
    pub(crate) exit_code: i32,
}

impl StopRequest {
    /// True once a stop has been requested.
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// The exit code the run loop will return.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// Per-frame context handed to every listener callback.
///
/// Borrows the scheduler's collaborators for the duration of one callback.
pub struct FrameContext<'a> {
    /// The widget registry, for dispatch-safe structural mutation.
    pub registry: &'a WidgetRegistry,
    /// The named entities advanced by the Simulation phase, in dependency
    /// order.
    pub entities: &'a mut DependencyOrder,
    /// The presentation-swap collaborator. The Graphics callback swaps
    /// through this under `MaximizeThroughput`.
    pub presenter: &'a mut dyn Presenter,
    /// Handle for posting events onto the next frame's Input phase.
    pub events: EventSender,
    /// The active swap-placement policy.
    pub submit_mode: SubmitMode,
    /// Measured real elapsed seconds of the current pass.
    pub rdt: f64,
    /// Resolved simulation step of the current pass, scale applied.
    pub sdt: f64,
    /// The fixed ideal step (the wall-clock target duration).
    pub idt: f64,
    pub(crate) stop: &'a mut StopRequest,
}

impl FrameContext<'_> {
    /// Requests that the run loop end with `exit_code` at the natural end
    /// of the current frame. Later requests in the same frame overwrite
    /// earlier ones.
    pub fn request_stop(&mut self, exit_code: i32) {
        self.stop.requested = true;
        self.stop.exit_code = exit_code;
    }

    /// True once a stop has been requested this run.
    pub fn stop_requested(&self) -> bool {
        self.stop.requested
    }
}

/// Per-phase callbacks invoked by the scheduler, in fixed frame order.
///
/// Every method is optional and defaults to a no-op. Widget dispatch for a
/// phase happens before the listener's callback for that phase.
#[allow(unused_variables)]
pub trait FrameListener {
    /// Called once before the first frame of a run.
    fn on_init(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Called once after the last frame of a run, even when the run ends
    /// early by stop request.
    fn on_cleanup(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Handles an event no widget consumed. Returning `true` marks it
    /// handled (currently informational; the event has no further
    /// recipients either way).
    fn on_event(&mut self, ctx: &mut FrameContext, event: &FrameEvent) -> Result<bool, PhaseError> {
        Ok(false)
    }

    /// Runs after the frame's events have all been dispatched.
    fn on_after_events(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Polls user input state (held keys, pointer position).
    fn on_user_input(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Services network traffic.
    fn on_network(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Runs decision logic.
    fn on_ai(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Advances application state by one simulation step.
    fn on_simulation(
        &mut self,
        ctx: &mut FrameContext,
        rdt: f64,
        sdt: f64,
        idt: f64,
    ) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Produces renderable state for this frame.
    fn on_pose(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }

    /// Renders the frame. Under `MaximizeThroughput` this is also where the
    /// swap happens, via `ctx.presenter`.
    fn on_graphics(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        Ok(())
    }
}

/// A listener that does nothing. Useful for driving the scheduler from
/// widgets alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl FrameListener for NullListener {}
