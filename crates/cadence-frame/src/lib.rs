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

//! # Cadence Frame
//!
//! The per-frame scheduling driver. [`FrameScheduler`] sequences the fixed
//! phase order (Input → AfterEvents → UserInput → Network → AI →
//! Simulation → Pose → Wait → Graphics), paces frames toward a wall-clock
//! target with overshoot compensation, and runs until stopped. Applications
//! plug in through [`FrameListener`] callbacks and through widgets
//! registered in the scheduler's `WidgetRegistry` (see `cadence-core`).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod listener;
pub mod scheduler;
pub mod submit;

pub use config::{FrameConfig, BACKGROUND_FRAME_RATE};
pub use error::{FrameError, Phase, PhaseError};
pub use listener::{FrameContext, FrameListener, NullListener, NullPresenter, Presenter};
pub use scheduler::{FrameScheduler, FrameStats};
pub use submit::SubmitMode;
