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

//! Host window abstraction.
//!
//! Any windowing backend (Winit, SDL, a terminal, ...) can implement this
//! trait; the scheduling core only ever asks one question of it.

/// The narrow view of the host window the frame pacer needs.
pub trait HostWindow {
    /// True if the window currently holds input focus. The pacer may drop
    /// to a background frame rate while unfocused.
    fn has_focus(&self) -> bool;
}

/// A windowless host that always reports focus. Used by tests and
/// headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessWindow;

impl HostWindow for HeadlessWindow {
    fn has_focus(&self) -> bool {
        true
    }
}
