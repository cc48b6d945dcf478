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

//! When the double-buffered presentation swap happens relative to the
//! Graphics phase.

use serde::{Deserialize, Serialize};

/// Placement of the presentation swap relative to the Graphics phase.
///
/// The swap is where the CPU stalls on the GPU (and on vsync), so its
/// placement trades latency against throughput. This is a pure decision
/// table; the scheduler consults the three predicates and otherwise never
/// touches the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmitMode {
    /// The scheduler never swaps; the application calls the presenter
    /// itself whenever it sees fit.
    Explicit,
    /// The render collaborator swaps mid-phase, as soon as its off-screen
    /// target is produced, absorbing the stall inside its own GPU work.
    #[default]
    MaximizeThroughput,
    /// The scheduler swaps the *previous* frame's image just before
    /// rendering, overlapping the stall with a frame of latency.
    Balance,
    /// The scheduler swaps immediately after rendering, presenting the
    /// freshest image at the cost of eating the full stall.
    MinimizeLatency,
}

impl SubmitMode {
    /// True if the scheduler swaps before invoking the Graphics phase.
    pub fn swaps_before_render(self) -> bool {
        self == SubmitMode::Balance
    }

    /// True if the scheduler swaps after the Graphics phase returns.
    pub fn swaps_after_render(self) -> bool {
        self == SubmitMode::MinimizeLatency
    }

    /// True if the render collaborator is expected to swap mid-phase.
    pub fn swaps_mid_render(self) -> bool {
        self == SubmitMode::MaximizeThroughput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_maximize_throughput() {
        assert_eq!(SubmitMode::default(), SubmitMode::MaximizeThroughput);
    }

    #[test]
    fn exactly_one_mode_per_predicate() {
        let all = [
            SubmitMode::Explicit,
            SubmitMode::MaximizeThroughput,
            SubmitMode::Balance,
            SubmitMode::MinimizeLatency,
        ];
        assert_eq!(all.iter().filter(|m| m.swaps_before_render()).count(), 1);
        assert_eq!(all.iter().filter(|m| m.swaps_after_render()).count(), 1);
        assert_eq!(all.iter().filter(|m| m.swaps_mid_render()).count(), 1);
        // Explicit matches none of them.
        let e = SubmitMode::Explicit;
        assert!(!e.swaps_before_render() && !e.swaps_after_render() && !e.swaps_mid_render());
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&SubmitMode::Balance).unwrap();
        let back: SubmitMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SubmitMode::Balance);
    }
}
