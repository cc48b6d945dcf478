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

//! Frame events and the queue that feeds the Input phase.
//!
//! Window/OS event translation is an external collaborator: whatever layer
//! owns the platform window converts its native events into [`FrameEvent`]s
//! and posts them through an [`EventSender`]. The scheduler drains the queue
//! exactly once per frame, at the start of the Input phase, so an event
//! fired from inside a widget callback is always delivered on the *next*
//! frame, never the current one.

use flume::{Receiver, Sender, TryIter};

/// An event delivered to widgets during the Input phase.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A key was pressed.
    KeyDown {
        /// Platform-independent key name.
        key: String,
    },
    /// A key was released.
    KeyUp {
        /// Platform-independent key name.
        key: String,
    },
    /// A pointer button was pressed.
    PointerButtonDown {
        /// Pointer x position in window coordinates.
        x: f32,
        /// Pointer y position in window coordinates.
        y: f32,
        /// Button index (0 = primary).
        button: u8,
    },
    /// A pointer button was released.
    PointerButtonUp {
        /// Pointer x position in window coordinates.
        x: f32,
        /// Pointer y position in window coordinates.
        y: f32,
        /// Button index (0 = primary).
        button: u8,
    },
    /// The pointer moved. Motion-class: broadcast, never consumable.
    PointerMotion {
        /// Pointer x position in window coordinates.
        x: f32,
        /// Pointer y position in window coordinates.
        y: f32,
        /// Horizontal delta since the last motion event.
        dx: f32,
        /// Vertical delta since the last motion event.
        dy: f32,
    },
    /// An analog axis moved. Motion-class: broadcast, never consumable.
    AxisMotion {
        /// Axis index on the input device.
        axis: u8,
        /// Normalized axis value.
        value: f32,
    },
    /// The host window was resized.
    WindowResized {
        /// New client-area width in pixels.
        width: u32,
        /// New client-area height in pixels.
        height: u32,
    },
    /// The host window gained input focus.
    FocusGained,
    /// The host window lost input focus.
    FocusLost,
    /// The application was asked to quit.
    Quit,
}

impl FrameEvent {
    /// True for motion-class events (pointer/axis motion), which are always
    /// broadcast to every widget and can never be consumed.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            FrameEvent::PointerMotion { .. } | FrameEvent::AxisMotion { .. }
        )
    }
}

/// A cheap clonable handle for posting events onto the queue.
///
/// Widgets and collaborators hold one of these to fire events for delivery
/// on the next Input phase.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<FrameEvent>,
}

impl EventSender {
    /// Posts an event, logging an error if the queue side was dropped.
    pub fn post(&self, event: FrameEvent) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to post frame event: {e}. Queue likely dropped.");
        }
    }
}

/// The frame event queue (unbounded MPSC channel).
///
/// Owned by the scheduler; everything else interacts through [`EventSender`]
/// clones.
#[derive(Debug)]
pub struct EventQueue {
    sender: Sender<FrameEvent>,
    receiver: Receiver<FrameEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Posts an event directly onto the queue.
    pub fn post(&self, event: FrameEvent) {
        // The receiver lives as long as self, so this cannot fail.
        let _ = self.sender.send(event);
    }

    /// Returns a clonable posting handle.
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Drains every event currently queued, without blocking.
    pub fn drain(&self) -> TryIter<'_, FrameEvent> {
        self.receiver.try_iter()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_classification() {
        assert!(FrameEvent::PointerMotion {
            x: 0.0,
            y: 0.0,
            dx: 1.0,
            dy: 0.0
        }
        .is_motion());
        assert!(FrameEvent::AxisMotion {
            axis: 0,
            value: 0.5
        }
        .is_motion());
        assert!(!FrameEvent::KeyDown {
            key: "a".to_string()
        }
        .is_motion());
        assert!(!FrameEvent::PointerButtonDown {
            x: 0.0,
            y: 0.0,
            button: 0
        }
        .is_motion());
        assert!(!FrameEvent::Quit.is_motion());
    }

    #[test]
    fn post_and_drain_preserves_order() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        sender.post(FrameEvent::FocusGained);
        queue.post(FrameEvent::Quit);

        let drained: Vec<FrameEvent> = queue.drain().collect();
        assert_eq!(drained, vec![FrameEvent::FocusGained, FrameEvent::Quit]);
        assert_eq!(queue.drain().count(), 0, "drain should empty the queue");
    }

    #[test]
    fn events_posted_during_drain_wait_for_next_drain() {
        let queue = EventQueue::new();
        queue.post(FrameEvent::FocusLost);

        // Snapshot-collect first, the way the Input phase does.
        let first: Vec<FrameEvent> = queue.drain().collect();
        queue.post(FrameEvent::FocusGained);

        assert_eq!(first, vec![FrameEvent::FocusLost]);
        let second: Vec<FrameEvent> = queue.drain().collect();
        assert_eq!(second, vec![FrameEvent::FocusGained]);
    }
}
