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

//! The ordered, reentrancy-safe collection of per-frame participants.

use crate::event::{EventSender, FrameEvent};
use crate::widget::{Widget, WidgetRef};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A structural mutation requested while the registry was locked, replayed
/// in FIFO order at unlock.
enum DelayedOp {
    Add(WidgetRef),
    Remove(WidgetRef),
    SetFocus(WidgetRef),
    SetFocusAndMoveToFront(WidgetRef),
    ClearFocus,
    Defocus(WidgetRef),
    MoveToBack(WidgetRef),
}

/// An ordered, depth-ranked collection of widgets with reentrancy-safe
/// mutation.
///
/// Sequence position determines depth: index 0 is the front (smallest
/// depth, first to receive events, last to composite). Every dispatch
/// method brackets its iteration with a lock; while locked, structural
/// mutations are queued as [`DelayedOp`]s and replayed in arrival order at
/// unlock, so a widget can freely add, remove, or refocus widgets —
/// including itself — from inside its own callback. The current dispatch
/// pass always runs against the order captured at lock time.
///
/// All operations take `&self`: the registry is single-threaded and uses
/// interior mutability so it can be handed into widget callbacks as plain
/// shared context.
pub struct WidgetRegistry {
    widgets: RefCell<Vec<WidgetRef>>,
    focused: RefCell<Option<WidgetRef>>,
    locked: Cell<bool>,
    delayed: RefCell<Vec<DelayedOp>>,
    events: EventSender,
}

impl WidgetRegistry {
    /// Creates an empty registry that fires events through `events`.
    pub fn new(events: EventSender) -> Self {
        Self {
            widgets: RefCell::new(Vec::new()),
            focused: RefCell::new(None),
            locked: Cell::new(false),
            delayed: RefCell::new(Vec::new()),
            events,
        }
    }

    /// The number of widgets in the live sequence.
    pub fn len(&self) -> usize {
        self.widgets.borrow().len()
    }

    /// True if the live sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.borrow().is_empty()
    }

    /// The widget at sequence position `i` (0 = front), if any.
    pub fn get(&self, i: usize) -> Option<WidgetRef> {
        self.widgets.borrow().get(i).cloned()
    }

    /// A snapshot of the live sequence, front to back.
    pub fn widgets(&self) -> Vec<WidgetRef> {
        self.widgets.borrow().clone()
    }

    /// The currently focused widget, if any.
    pub fn focused_widget(&self) -> Option<WidgetRef> {
        self.focused.borrow().clone()
    }

    /// Posts an event for delivery on the next Input phase. Widgets call
    /// this from inside callbacks to synthesize events.
    pub fn fire_event(&self, event: FrameEvent) {
        self.events.post(event);
    }

    /// True if `widget` is in the live sequence or queued to be added.
    ///
    /// Accounts for delayed operations: a widget queued for removal is
    /// reported absent, one queued for addition present.
    pub fn contains(&self, widget: &WidgetRef) -> bool {
        let mut found = self.contains_live(widget);
        for op in self.delayed.borrow().iter() {
            match op {
                DelayedOp::Add(w) if Rc::ptr_eq(w, widget) => found = true,
                DelayedOp::Remove(w) if Rc::ptr_eq(w, widget) => found = false,
                _ => {}
            }
        }
        found
    }

    fn contains_live(&self, widget: &WidgetRef) -> bool {
        self.widgets.borrow().iter().any(|w| Rc::ptr_eq(w, widget))
    }

    /// Adds a widget at the back of the dispatch order. A no-op if already
    /// present; queued if the registry is locked.
    pub fn add(&self, widget: &WidgetRef) {
        if self.locked.get() {
            self.delayed
                .borrow_mut()
                .push(DelayedOp::Add(widget.clone()));
            return;
        }
        if !self.contains_live(widget) {
            self.widgets.borrow_mut().push(widget.clone());
            self.update_widget_depths();
        }
    }

    /// Removes a widget, clearing focus if it held it. A no-op if absent;
    /// queued if the registry is locked.
    pub fn remove(&self, widget: &WidgetRef) {
        if self.locked.get() {
            self.delayed
                .borrow_mut()
                .push(DelayedOp::Remove(widget.clone()));
            return;
        }
        let holds_focus = self
            .focused
            .borrow()
            .as_ref()
            .is_some_and(|f| Rc::ptr_eq(f, widget));
        if holds_focus {
            *self.focused.borrow_mut() = None;
        }
        let index = {
            let widgets = self.widgets.borrow();
            widgets.iter().position(|w| Rc::ptr_eq(w, widget))
        };
        if let Some(i) = index {
            self.widgets.borrow_mut().remove(i);
            self.update_widget_depths();
        }
    }

    /// Sets (or clears, with `None`) the focused widget.
    ///
    /// The target must already be present; focusing an absent widget is a
    /// programming fault. With `bring_to_front`, the widget is also
    /// repositioned to the front of the dispatch order. Focus itself is a
    /// single nullable reference, not derived from position.
    pub fn set_focused_widget(&self, widget: Option<&WidgetRef>, bring_to_front: bool) {
        if self.locked.get() {
            let op = match widget {
                Some(w) if bring_to_front => DelayedOp::SetFocusAndMoveToFront(w.clone()),
                Some(w) => DelayedOp::SetFocus(w.clone()),
                None => DelayedOp::ClearFocus,
            };
            self.delayed.borrow_mut().push(op);
            return;
        }
        match widget {
            Some(w) => {
                assert!(
                    self.contains_live(w),
                    "Tried to focus a widget that is not in the registry"
                );
                if bring_to_front {
                    let index = {
                        let widgets = self.widgets.borrow();
                        widgets.iter().position(|x| Rc::ptr_eq(x, w))
                    };
                    if let Some(i) = index {
                        if i != 0 {
                            let mut widgets = self.widgets.borrow_mut();
                            let moved = widgets.remove(i);
                            widgets.insert(0, moved);
                        }
                    }
                    self.update_widget_depths();
                }
                *self.focused.borrow_mut() = Some(w.clone());
            }
            None => {
                *self.focused.borrow_mut() = None;
            }
        }
    }

    /// Clears focus if (and only if) `widget` currently holds it. Queued if
    /// the registry is locked.
    pub fn defocus_widget(&self, widget: &WidgetRef) {
        if self.locked.get() {
            self.delayed
                .borrow_mut()
                .push(DelayedOp::Defocus(widget.clone()));
            return;
        }
        let holds_focus = self
            .focused
            .borrow()
            .as_ref()
            .is_some_and(|f| Rc::ptr_eq(f, widget));
        if holds_focus {
            self.set_focused_widget(None, false);
        }
    }

    /// Moves a widget to the back of the dispatch order (last for events,
    /// first for composition). A no-op if absent or already at the back;
    /// queued if the registry is locked.
    pub fn move_widget_to_back(&self, widget: &WidgetRef) {
        if self.locked.get() {
            self.delayed
                .borrow_mut()
                .push(DelayedOp::MoveToBack(widget.clone()));
            return;
        }
        let index = {
            let widgets = self.widgets.borrow();
            widgets.iter().position(|w| Rc::ptr_eq(w, widget))
        };
        if let Some(i) = index {
            let len = self.widgets.borrow().len();
            if i + 1 != len {
                let mut widgets = self.widgets.borrow_mut();
                let moved = widgets.remove(i);
                widgets.push(moved);
                drop(widgets);
                self.update_widget_depths();
            }
        }
    }

    /// Begins a dispatch lock. Nested locking is a programming fault: it
    /// means a widget callback invoked dispatch reentrantly, which would
    /// make delayed-operation replay ordering ambiguous.
    pub fn begin_lock(&self) {
        assert!(
            !self.locked.get(),
            "WidgetRegistry lock is not reentrant: dispatch was invoked from inside a widget callback"
        );
        self.locked.set(true);
    }

    /// Ends a dispatch lock, replaying queued mutations in arrival order.
    pub fn end_lock(&self) {
        assert!(self.locked.get(), "endLock without a matching beginLock");
        self.locked.set(false);

        let ops = std::mem::take(&mut *self.delayed.borrow_mut());
        for op in ops {
            match op {
                DelayedOp::Add(w) => self.add(&w),
                DelayedOp::Remove(w) => self.remove(&w),
                DelayedOp::SetFocus(w) => self.set_focused_widget(Some(&w), false),
                DelayedOp::SetFocusAndMoveToFront(w) => self.set_focused_widget(Some(&w), true),
                DelayedOp::ClearFocus => self.set_focused_widget(None, false),
                DelayedOp::Defocus(w) => self.defocus_widget(&w),
                DelayedOp::MoveToBack(w) => self.move_widget_to_back(&w),
            }
        }
    }

    /// Reassigns every widget's depth from its sequence position. Depths
    /// fall in (0, 1), front smallest.
    fn update_widget_depths(&self) {
        let widgets = self.widgets.borrow();
        let n = widgets.len();
        for (i, w) in widgets.iter().enumerate() {
            w.borrow_mut().set_depth((i as f32 + 1.0) / (n as f32 + 1.0));
        }
    }

    /// Delivers one event.
    ///
    /// Non-motion events go to the focused widget first, then the rest
    /// front to back (skipping the focused widget so it is not delivered
    /// twice); the first widget to return `true` consumes the event and
    /// halts delivery. Motion-class events are broadcast to every widget in
    /// depth order and can never be consumed.
    ///
    /// Returns `true` if the event was consumed.
    pub fn dispatch_event(&self, event: &FrameEvent) -> bool {
        self.begin_lock();
        let snapshot = self.widgets.borrow().clone();
        let focused = self.focused.borrow().clone();
        let motion = event.is_motion();
        let mut consumed = false;

        // The focused widget gets each non-motion event first.
        if !motion {
            if let Some(f) = &focused {
                consumed = deliver_event(f, event, self);
            }
        }

        if motion || !consumed {
            for w in &snapshot {
                if !motion {
                    if let Some(f) = &focused {
                        if Rc::ptr_eq(w, f) {
                            continue;
                        }
                    }
                }
                let hit = deliver_event(w, event, self);
                if hit && !motion {
                    consumed = true;
                    break;
                }
            }
        }

        self.end_lock();
        consumed
    }

    /// Runs the Simulation phase over every widget with the Simulate
    /// capability, front to back.
    pub fn dispatch_simulation(&self, rdt: f64, sdt: f64, idt: f64) {
        self.begin_lock();
        let snapshot = self.widgets.borrow().clone();
        for w in &snapshot {
            let mut guard = w.borrow_mut();
            if let Some(sim) = guard.as_simulate() {
                sim.on_simulation(self, rdt, sdt, idt);
            }
        }
        self.end_lock();
    }

    /// Runs the Network phase over every widget with the Network
    /// capability, front to back.
    pub fn dispatch_network(&self) {
        self.begin_lock();
        let snapshot = self.widgets.borrow().clone();
        for w in &snapshot {
            let mut guard = w.borrow_mut();
            if let Some(net) = guard.as_network() {
                net.on_network(self);
            }
        }
        self.end_lock();
    }

    /// Runs the AI phase over every widget with the AI capability, front
    /// to back.
    pub fn dispatch_ai(&self) {
        self.begin_lock();
        let snapshot = self.widgets.borrow().clone();
        for w in &snapshot {
            let mut guard = w.borrow_mut();
            if let Some(ai) = guard.as_ai() {
                ai.on_ai(self);
            }
        }
        self.end_lock();
    }

    /// Runs the Pose phase over every widget with the Pose capability, in
    /// composition order (back first, front last).
    ///
    /// If the registry is already locked this returns without dispatching:
    /// pose was requested reentrantly from an event callback fired during
    /// rendering, and posing again mid-pass would double-pose.
    pub fn dispatch_pose(&self) {
        if self.locked.get() {
            return;
        }
        self.begin_lock();
        let snapshot = self.widgets.borrow().clone();
        for w in snapshot.iter().rev() {
            let mut guard = w.borrow_mut();
            if let Some(pose) = guard.as_pose() {
                pose.on_pose(self);
            }
        }
        self.end_lock();
    }
}

fn deliver_event(widget: &WidgetRef, event: &FrameEvent, registry: &WidgetRegistry) -> bool {
    let mut guard = widget.borrow_mut();
    match guard.as_handle_event() {
        Some(handler) => handler.on_event(event, registry),
        None => false,
    }
}
