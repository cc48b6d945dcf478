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

//! Frame timing state and pacing math.
//!
//! The scheduler owns a [`FrameTiming`] for the lifetime of the process and
//! mutates it once per frame. The pacing helpers are pure functions so the
//! wait math can be tested without sleeping.

mod stopwatch;

pub use stopwatch::Stopwatch;

use serde::{Deserialize, Serialize};

/// How the simulation time step is derived each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimTimeStepPolicy {
    /// Step by measured wall-clock time: variable, matches reality.
    RealTime,
    /// Step by the wall-clock target duration: fixed as long as the frame
    /// rate holds, which keeps simulation repeatable at the target rate.
    MatchRealTimeTarget,
    /// Step by a fixed number of seconds regardless of frame rate.
    Fixed(f64),
}

/// Per-process timing state owned by the frame scheduler.
///
/// `previous_real_time_step` and `previous_sim_time_step` always hold
/// concrete non-negative seconds, never a policy tag.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Policy for resolving the simulation time step.
    pub sim_time_step: SimTimeStepPolicy,
    /// Multiplier on the resolved simulation step; 0 pauses simulation.
    pub sim_time_scale: f64,
    /// Target wall-clock seconds per frame.
    pub wall_clock_target_duration: f64,
    real_time: f64,
    sim_time: f64,
    previous_real_time_step: f64,
    previous_sim_time_step: f64,
    last_frame_over_wait: f64,
}

impl FrameTiming {
    /// Creates timing state for the given wall-clock target duration,
    /// defaulting to the match-real-time-target step policy.
    pub fn new(wall_clock_target_duration: f64) -> Self {
        Self {
            sim_time_step: SimTimeStepPolicy::MatchRealTimeTarget,
            sim_time_scale: 1.0,
            wall_clock_target_duration,
            real_time: 0.0,
            sim_time: 0.0,
            previous_real_time_step: 0.0,
            previous_sim_time_step: 0.0,
            last_frame_over_wait: 0.0,
        }
    }

    /// Accumulated wall-clock time across all frames, in seconds.
    pub fn real_time(&self) -> f64 {
        self.real_time
    }

    /// Accumulated simulation time across all frames, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// The concrete real-time step of the previous frame (>= 0).
    pub fn previous_real_time_step(&self) -> f64 {
        self.previous_real_time_step
    }

    /// The concrete simulation step of the previous frame (>= 0).
    pub fn previous_sim_time_step(&self) -> f64 {
        self.previous_sim_time_step
    }

    /// The smoothed estimate of how much waits overshoot their target.
    pub fn over_wait_estimate(&self) -> f64 {
        self.last_frame_over_wait
    }

    /// Resolves this frame's `(rdt, sdt, idt)` from the measured wall-clock
    /// time since the previous frame.
    ///
    /// * `rdt` — measured real elapsed time, clamped to zero (the first
    ///   frame has no predecessor to measure against).
    /// * `sdt` — the step policy resolved to concrete seconds, times
    ///   `sim_time_scale`.
    /// * `idt` — the wall-clock target duration, unconditionally: a
    ///   deterministic "ideal" step for collaborators that need reproducible
    ///   timing independent of actual frame rate.
    ///
    /// Advances both accumulators and records the previous steps.
    pub fn compute_simulation_step(&mut self, measured_real_elapsed: f64) -> (f64, f64, f64) {
        let rdt = measured_real_elapsed.max(0.0);

        let sdt = match self.sim_time_step {
            SimTimeStepPolicy::RealTime => rdt,
            SimTimeStepPolicy::MatchRealTimeTarget => self.wall_clock_target_duration,
            SimTimeStepPolicy::Fixed(v) => v,
        } * self.sim_time_scale;

        let idt = self.wall_clock_target_duration;

        self.previous_real_time_step = rdt;
        self.previous_sim_time_step = sdt;
        self.real_time += rdt;
        self.sim_time += sdt;

        (rdt, sdt, idt)
    }

    /// Folds an observed wait overage into the running estimate.
    ///
    /// A relative change beyond `snap_threshold` is treated as a regime
    /// change (e.g., vsync toggled) and adopted outright; otherwise the
    /// estimate moves toward the observation by `smoothing`. Naively
    /// adopting the raw overage every frame oscillates; pure smoothing
    /// lags step changes for many frames.
    pub fn update_over_wait(&mut self, observed: f64, smoothing: f64, snap_threshold: f64) {
        let denom = self.last_frame_over_wait.abs().max(observed.abs());
        if denom <= 0.0 {
            return;
        }
        if ((observed - self.last_frame_over_wait).abs() / denom) > snap_threshold {
            self.last_frame_over_wait = observed;
        } else {
            self.last_frame_over_wait = lerp(self.last_frame_over_wait, observed, smoothing);
        }
    }
}

/// The wait the pacer would like this frame: target minus time already
/// spent, never negative.
pub fn desired_wait(target_duration: f64, cumulative: f64) -> f64 {
    (target_duration - cumulative).max(0.0)
}

/// The wait actually requested after subtracting the overshoot estimate,
/// never negative.
pub fn compensated_wait(desired: f64, over_wait_estimate: f64) -> f64 {
    (desired - over_wait_estimate).max(0.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
