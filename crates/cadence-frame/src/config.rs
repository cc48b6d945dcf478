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

//! Scheduler configuration.

use crate::submit::SubmitMode;
use cadence_core::SimTimeStepPolicy;
use serde::{Deserialize, Serialize};

/// Frame rate used while the host window lacks focus and
/// [`FrameConfig::lower_rate_when_unfocused`] is set, in frames per second.
pub const BACKGROUND_FRAME_RATE: f64 = 4.0;

/// Configuration for the frame scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target wall-clock seconds per frame. Default 1/60.
    pub target_frame_duration: f64,
    /// How the simulation step is derived each frame.
    pub sim_time_step: SimTimeStepPolicy,
    /// Multiplier on the resolved simulation step; 0 pauses simulation.
    pub sim_time_scale: f64,
    /// Drop to [`BACKGROUND_FRAME_RATE`] while the window lacks focus.
    pub lower_rate_when_unfocused: bool,
    /// Placement of the presentation swap relative to the Graphics phase.
    pub submit_mode: SubmitMode,
    /// Terminate the run loop with a logged diagnostic and a failure exit
    /// code on whitelisted recoverable errors, instead of propagating.
    pub catch_common_errors: bool,
    /// Input/network/AI/simulation passes per rendered frame. Values below
    /// 1 are treated as 1.
    pub render_period: u32,
    /// Weight for folding an observed wait overage into the running
    /// estimate. Default 0.1.
    pub over_wait_smoothing: f64,
    /// Relative change in the wait overage beyond which the estimate is
    /// adopted outright instead of smoothed. Default 0.4.
    pub over_wait_snap_threshold: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_frame_duration: 1.0 / 60.0,
            sim_time_step: SimTimeStepPolicy::MatchRealTimeTarget,
            sim_time_scale: 1.0,
            lower_rate_when_unfocused: false,
            submit_mode: SubmitMode::default(),
            catch_common_errors: false,
            render_period: 1,
            over_wait_smoothing: 0.1,
            over_wait_snap_threshold: 0.4,
        }
    }
}
