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

//! Swap placement per submit mode, observed through a recording presenter.

use cadence_frame::{
    FrameConfig, FrameContext, FrameListener, FrameScheduler, PhaseError, Presenter, SubmitMode,
};
use std::cell::RefCell;
use std::rc::Rc;

struct RecordingPresenter {
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Presenter for RecordingPresenter {
    fn swap_buffers(&mut self) {
        self.log.borrow_mut().push("swap");
    }
}

struct DrawListener {
    log: Rc<RefCell<Vec<&'static str>>>,
    // MaximizeThroughput: the renderer swaps itself mid-phase.
    swap_in_graphics: bool,
}

impl FrameListener for DrawListener {
    fn on_graphics(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        self.log.borrow_mut().push("draw");
        if self.swap_in_graphics {
            ctx.presenter.swap_buffers();
        }
        Ok(())
    }
}

fn one_frame_log(mode: SubmitMode, swap_in_graphics: bool) -> Vec<&'static str> {
    let config = FrameConfig {
        target_frame_duration: 0.001,
        submit_mode: mode,
        ..FrameConfig::default()
    };
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = FrameScheduler::new(config)
        .with_presenter(Box::new(RecordingPresenter { log: log.clone() }));
    let mut listener = DrawListener {
        log: log.clone(),
        swap_in_graphics,
    };
    scheduler.one_frame(&mut listener).unwrap();
    let result = log.borrow().clone();
    result
}

#[test]
fn balance_swaps_before_rendering() {
    assert_eq!(one_frame_log(SubmitMode::Balance, false), vec!["swap", "draw"]);
}

#[test]
fn minimize_latency_swaps_after_rendering() {
    assert_eq!(
        one_frame_log(SubmitMode::MinimizeLatency, false),
        vec!["draw", "swap"]
    );
}

#[test]
fn explicit_never_swaps_on_its_own() {
    assert_eq!(one_frame_log(SubmitMode::Explicit, false), vec!["draw"]);
}

#[test]
fn maximize_throughput_leaves_the_swap_to_the_renderer() {
    // The scheduler itself never calls the presenter; the renderer reaches
    // it through the context.
    assert_eq!(
        one_frame_log(SubmitMode::MaximizeThroughput, false),
        vec!["draw"]
    );
    assert_eq!(
        one_frame_log(SubmitMode::MaximizeThroughput, true),
        vec!["draw", "swap"]
    );
}
