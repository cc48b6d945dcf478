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

// Cadence sandbox: a headless run of the frame scheduler with a bouncing
// ball widget, a pause-toggle widget, and a couple of ordered entities.

use anyhow::Result;
use cadence_core::widget::{HandleEvent, Pose, Simulate, Widget};
use cadence_core::{FrameEvent, WidgetRef, WidgetRegistry};
use cadence_frame::{FrameConfig, FrameContext, FrameListener, FrameScheduler, PhaseError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A point bouncing between two walls, advanced by the simulation step
/// whenever the shared pause flag is clear.
struct Ball {
    depth: f32,
    position: f64,
    velocity: f64,
    paused: Rc<Cell<bool>>,
}

impl Widget for Ball {
    fn depth(&self) -> f32 {
        self.depth
    }
    fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
    }
    fn as_simulate(&mut self) -> Option<&mut dyn Simulate> {
        Some(self)
    }
    fn as_pose(&mut self) -> Option<&mut dyn Pose> {
        Some(self)
    }
}

impl Simulate for Ball {
    fn on_simulation(&mut self, _registry: &WidgetRegistry, _rdt: f64, sdt: f64, _idt: f64) {
        if self.paused.get() {
            return;
        }
        self.position += self.velocity * sdt;
        if !(0.0..=1.0).contains(&self.position) {
            self.velocity = -self.velocity;
            self.position = self.position.clamp(0.0, 1.0);
        }
    }
}

impl Pose for Ball {
    fn on_pose(&mut self, _registry: &WidgetRegistry) {
        log::debug!("Ball posed at {:.3}", self.position);
    }
}

/// Toggles the simulation on the space key by firing a pause event the
/// listener picks up; consumes the key so nothing behind it reacts.
struct PauseKey {
    depth: f32,
}

impl Widget for PauseKey {
    fn depth(&self) -> f32 {
        self.depth
    }
    fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
    }
    fn as_handle_event(&mut self) -> Option<&mut dyn HandleEvent> {
        Some(self)
    }
}

impl HandleEvent for PauseKey {
    fn on_event(&mut self, event: &FrameEvent, registry: &WidgetRegistry) -> bool {
        if let FrameEvent::KeyDown { key } = event {
            if key == "space" {
                registry.fire_event(FrameEvent::FocusLost);
                return true;
            }
        }
        false
    }
}

struct SandboxApp {
    frames: u32,
    paused: Rc<Cell<bool>>,
}

impl FrameListener for SandboxApp {
    fn on_init(&mut self, ctx: &mut FrameContext) -> Result<(), PhaseError> {
        // The camera chases the player, so the player must step first.
        ctx.entities.add_node("player");
        ctx.entities.add_node("camera");
        ctx.entities
            .set_order("player", "camera")
            .map_err(|e| PhaseError::Other(Box::new(e)))?;
        log::info!("Sandbox initialized");
        Ok(())
    }

    fn on_event(&mut self, _ctx: &mut FrameContext, event: &FrameEvent) -> Result<bool, PhaseError> {
        if *event == FrameEvent::FocusLost {
            self.paused.set(!self.paused.get());
            log::info!("Paused: {}", self.paused.get());
            return Ok(true);
        }
        Ok(false)
    }

    fn on_simulation(
        &mut self,
        ctx: &mut FrameContext,
        _rdt: f64,
        sdt: f64,
        _idt: f64,
    ) -> Result<(), PhaseError> {
        self.frames += 1;
        if self.frames == 30 {
            // Exercise the event path: the key lands next frame.
            ctx.events.post(FrameEvent::KeyDown {
                key: "space".to_string(),
            });
        }
        if self.frames % 60 == 0 {
            log::info!("Frame {}: sdt = {:.4}s", self.frames, sdt);
        }
        if self.frames >= 180 {
            ctx.request_stop(0);
        }
        Ok(())
    }

    fn on_cleanup(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
        log::info!("Sandbox shutting down after {} frames", self.frames);
        Ok(())
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = FrameConfig {
        target_frame_duration: 1.0 / 60.0,
        ..FrameConfig::default()
    };
    let mut scheduler = FrameScheduler::new(config);

    let paused = Rc::new(Cell::new(false));
    let ball: WidgetRef = Rc::new(RefCell::new(Ball {
        depth: 0.0,
        position: 0.5,
        velocity: 0.7,
        paused: paused.clone(),
    }));
    let pause: WidgetRef = Rc::new(RefCell::new(PauseKey { depth: 0.0 }));
    scheduler.registry().add(&pause);
    scheduler.registry().add(&ball);

    let mut app = SandboxApp { frames: 0, paused };
    let code = scheduler.run(&mut app)?;
    log::info!(
        "Ran {:.2}s of simulation time in {:.2}s of real time",
        scheduler.sim_time(),
        scheduler.real_time()
    );
    std::process::exit(code);
}
