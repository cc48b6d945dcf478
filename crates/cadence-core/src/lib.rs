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

//! # Cadence Core
//!
//! Foundational crate for the Cadence frame-scheduling core: frame events,
//! widget capability traits and the reentrancy-safe [`WidgetRegistry`],
//! the dependency-ordered traversal [`DependencyOrder`], and frame timing
//! state. The frame driver itself lives in `cadence-frame`.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod graph;
pub mod platform;
pub mod time;
pub mod widget;

pub use error::ConfigError;
pub use event::{EventQueue, EventSender, FrameEvent};
pub use graph::DependencyOrder;
pub use time::{FrameTiming, SimTimeStepPolicy, Stopwatch};
pub use widget::{Widget, WidgetRef, WidgetRegistry};
