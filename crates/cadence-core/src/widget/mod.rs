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

//! Per-frame participants ("widgets") and their capability traits.
//!
//! A widget is anything that takes part in the frame: a GUI surface, a
//! debug overlay, a camera manipulator, a network replicator. Rather than
//! one monolithic base interface full of empty overrides, each capability
//! is its own trait, and [`Widget`] exposes an optional accessor per
//! capability so the registry can ask "does this support Simulate?" and
//! skip widgets that do not.
//!
//! Widgets are shared, single-threaded objects: [`WidgetRef`] is
//! `Rc<RefCell<dyn Widget>>`, and identity is pointer identity
//! (`Rc::ptr_eq`). Ownership is shared between the registry and the
//! application; the registry never needs to be the sole owner.
//!
//! Every callback receives the owning [`WidgetRegistry`] as an explicit
//! context argument. That is the widget's route back to its manager (to
//! fire an event, remove itself, take focus); widgets hold no stored
//! back-reference.

mod registry;

pub use registry::WidgetRegistry;

use crate::event::FrameEvent;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a widget. Identity is `Rc::ptr_eq`.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Capability: receive frame events during the Input phase.
pub trait HandleEvent {
    /// Handles one event. Returning `true` consumes it, halting delivery to
    /// widgets behind this one — except for motion-class events, which are
    /// broadcast regardless of the return value.
    fn on_event(&mut self, event: &FrameEvent, registry: &WidgetRegistry) -> bool;
}

/// Capability: advance state during the Simulation phase.
pub trait Simulate {
    /// Simulates one step. `rdt` is measured wall-clock seconds, `sdt` the
    /// policy-resolved simulation step, `idt` the fixed ideal step.
    fn on_simulation(&mut self, registry: &WidgetRegistry, rdt: f64, sdt: f64, idt: f64);
}

/// Capability: produce renderable state during the Pose phase.
pub trait Pose {
    /// Poses for this frame. Called in composition order (back first).
    fn on_pose(&mut self, registry: &WidgetRegistry);
}

/// Capability: service network traffic during the Network phase.
pub trait Network {
    /// Services network traffic for this frame.
    fn on_network(&mut self, registry: &WidgetRegistry);
}

/// Capability: run decision logic during the AI phase.
pub trait Ai {
    /// Runs AI logic for this frame.
    fn on_ai(&mut self, registry: &WidgetRegistry);
}

/// A per-frame participant.
///
/// Implementations store the depth assigned by the registry and override
/// the accessor for each capability they support.
pub trait Widget {
    /// The depth assigned by the registry. Smaller is frontmost: first for
    /// event delivery, last for 2D composition.
    fn depth(&self) -> f32;

    /// Stores a registry-assigned depth. Called by the registry after
    /// every structural mutation pass; not meant for application use.
    fn set_depth(&mut self, depth: f32);

    /// This widget's event-handling capability, if any.
    fn as_handle_event(&mut self) -> Option<&mut dyn HandleEvent> {
        None
    }

    /// This widget's simulation capability, if any.
    fn as_simulate(&mut self) -> Option<&mut dyn Simulate> {
        None
    }

    /// This widget's pose capability, if any.
    fn as_pose(&mut self) -> Option<&mut dyn Pose> {
        None
    }

    /// This widget's network capability, if any.
    fn as_network(&mut self) -> Option<&mut dyn Network> {
        None
    }

    /// This widget's AI capability, if any.
    fn as_ai(&mut self) -> Option<&mut dyn Ai> {
        None
    }
}
