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

//! Run-loop error policy: the catch flag downgrades only whitelisted
//! recoverable errors, and configuration errors are always fatal.

use cadence_frame::{
    FrameConfig, FrameContext, FrameError, FrameListener, FrameScheduler, Phase, PhaseError,
};

enum FailureKind {
    Protocol,
    Other,
}

struct FailingListener {
    frames: u32,
    fail_on_frame: u32,
    kind: FailureKind,
}

impl FrameListener for FailingListener {
    fn on_network(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
        self.frames += 1;
        if self.frames >= self.fail_on_frame {
            return Err(match self.kind {
                FailureKind::Protocol => PhaseError::Protocol("unexpected packet".into()),
                FailureKind::Other => PhaseError::Other("wildly unexpected".into()),
            });
        }
        Ok(())
    }
}

fn fast_config(catch: bool) -> FrameConfig {
    FrameConfig {
        target_frame_duration: 0.001,
        catch_common_errors: catch,
        ..FrameConfig::default()
    }
}

#[test]
fn catch_flag_turns_recoverable_errors_into_a_failure_exit_code() {
    let mut scheduler = FrameScheduler::new(fast_config(true));
    let mut listener = FailingListener {
        frames: 0,
        fail_on_frame: 2,
        kind: FailureKind::Protocol,
    };
    let code = scheduler.run(&mut listener).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn recoverable_errors_propagate_with_the_flag_off() {
    let mut scheduler = FrameScheduler::new(fast_config(false));
    let mut listener = FailingListener {
        frames: 0,
        fail_on_frame: 2,
        kind: FailureKind::Protocol,
    };
    let err = scheduler.run(&mut listener).unwrap_err();
    match err {
        FrameError::Phase { phase, source } => {
            assert_eq!(phase, Phase::Network);
            assert!(source.is_recoverable());
        }
        other => panic!("Expected a phase error, got {other:?}"),
    }
}

#[test]
fn unclassified_errors_propagate_even_with_the_flag_on() {
    let mut scheduler = FrameScheduler::new(fast_config(true));
    let mut listener = FailingListener {
        frames: 0,
        fail_on_frame: 1,
        kind: FailureKind::Other,
    };
    let err = scheduler.run(&mut listener).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Phase {
            phase: Phase::Network,
            source: PhaseError::Other(_)
        }
    ));
}

#[test]
fn dependency_cycles_are_fatal_even_with_the_flag_on() {
    let mut scheduler = FrameScheduler::new(fast_config(true));
    scheduler.entities_mut().add_node("hunter");
    scheduler.entities_mut().add_node("prey");
    scheduler.entities_mut().set_order("hunter", "prey").unwrap();
    scheduler.entities_mut().set_order("prey", "hunter").unwrap();

    let err = scheduler
        .run(&mut cadence_frame::NullListener)
        .unwrap_err();
    assert!(matches!(err, FrameError::Config(_)));
}
