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

//! The frame scheduler: phase sequencing, pacing, and the run loop.

use crate::config::{FrameConfig, BACKGROUND_FRAME_RATE};
use crate::error::{FrameError, Phase, PhaseError};
use crate::listener::{FrameContext, FrameListener, NullPresenter, Presenter, StopRequest};
use cadence_core::platform::{HeadlessWindow, HostWindow};
use cadence_core::time::{compensated_wait, desired_wait};
use cadence_core::{
    DependencyOrder, EventQueue, EventSender, FrameEvent, FrameTiming, Stopwatch, WidgetRegistry,
};
use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock duration of each phase of the most recent frame.
///
/// For phases repeated by `render_period`, the value is the sum over the
/// frame's passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    /// Event drain and dispatch.
    pub input: Duration,
    /// Post-event settling.
    pub after_events: Duration,
    /// Polled user input.
    pub user_input: Duration,
    /// Network servicing.
    pub network: Duration,
    /// Decision logic.
    pub ai: Duration,
    /// State advancement, including the dependency-order refresh.
    pub simulation: Duration,
    /// Renderable-state production.
    pub pose: Duration,
    /// Frame pacing (the actual sleep).
    pub wait: Duration,
    /// Rendering and presentation.
    pub graphics: Duration,
}

fn at(phase: Phase) -> impl FnOnce(PhaseError) -> FrameError {
    move |source| FrameError::Phase { phase, source }
}

/// Sequences the fixed phase order once per frame and paces frames to a
/// wall-clock target.
///
/// Owns the widget registry, the simulation dependency order, the event
/// queue, and the timing state; the application plugs in behavior through
/// [`FrameListener`] callbacks and registered widgets.
pub struct FrameScheduler {
    config: FrameConfig,
    timing: FrameTiming,
    registry: WidgetRegistry,
    entities: DependencyOrder,
    events: EventQueue,
    presenter: Box<dyn Presenter>,
    window: Box<dyn HostWindow>,
    stop: StopRequest,
    stats: FrameStats,
    // (rdt, sdt, idt) of the most recent simulation pass, mirrored into
    // every FrameContext.
    step: (f64, f64, f64),
    last_tick: Instant,
    last_wait_end: Instant,
}

impl FrameScheduler {
    /// Creates a scheduler with a no-op presenter and a headless window.
    pub fn new(config: FrameConfig) -> Self {
        let events = EventQueue::new();
        let registry = WidgetRegistry::new(events.sender());
        let mut timing = FrameTiming::new(config.target_frame_duration);
        timing.sim_time_step = config.sim_time_step;
        timing.sim_time_scale = config.sim_time_scale;
        Self {
            config,
            timing,
            registry,
            entities: DependencyOrder::new(),
            events,
            presenter: Box::new(NullPresenter),
            window: Box::new(HeadlessWindow),
            stop: StopRequest::default(),
            stats: FrameStats::default(),
            step: (0.0, 0.0, 0.0),
            last_tick: Instant::now(),
            last_wait_end: Instant::now(),
        }
    }

    /// Replaces the presentation-swap collaborator.
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    /// Replaces the host-window collaborator.
    pub fn with_window(mut self, window: Box<dyn HostWindow>) -> Self {
        self.window = window;
        self
    }

    /// The widget registry. Interior-mutable; add and remove widgets
    /// through this shared reference.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The named entities advanced by the Simulation phase.
    pub fn entities(&self) -> &DependencyOrder {
        &self.entities
    }

    /// Mutable access to the entity dependency order, for registering
    /// nodes and ordering constraints.
    pub fn entities_mut(&mut self) -> &mut DependencyOrder {
        &mut self.entities
    }

    /// A handle for posting events onto the next frame's Input phase.
    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Posts an event for delivery on the next Input phase.
    pub fn post_event(&self, event: FrameEvent) {
        self.events.post(event);
    }

    /// The active configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// The timing state, for adjusting step policy or scale at runtime.
    pub fn timing_mut(&mut self) -> &mut FrameTiming {
        &mut self.timing
    }

    /// Phase durations of the most recent frame.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Accumulated wall-clock time across all frames, in seconds.
    pub fn real_time(&self) -> f64 {
        self.timing.real_time()
    }

    /// Accumulated simulation time across all frames, in seconds.
    pub fn sim_time(&self) -> f64 {
        self.timing.sim_time()
    }

    /// The concrete real-time step of the previous frame.
    pub fn previous_real_time_step(&self) -> f64 {
        self.timing.previous_real_time_step()
    }

    /// The concrete simulation step of the previous frame.
    pub fn previous_sim_time_step(&self) -> f64 {
        self.timing.previous_sim_time_step()
    }

    /// Requests that the run loop end with `exit_code` at the end of the
    /// current frame.
    pub fn request_stop(&mut self, exit_code: i32) {
        self.stop.requested = true;
        self.stop.exit_code = exit_code;
    }

    /// True once a stop has been requested this run.
    pub fn stop_requested(&self) -> bool {
        self.stop.requested
    }

    fn context(&mut self) -> FrameContext<'_> {
        FrameContext {
            registry: &self.registry,
            entities: &mut self.entities,
            presenter: self.presenter.as_mut(),
            events: self.events.sender(),
            submit_mode: self.config.submit_mode,
            rdt: self.step.0,
            sdt: self.step.1,
            idt: self.step.2,
            stop: &mut self.stop,
        }
    }

    /// Runs one complete frame: `render_period` passes of
    /// Input → AfterEvents → UserInput → Network → AI → Simulation, then
    /// Pose → Wait → Graphics.
    ///
    /// Stop requests raised during the frame take effect only after
    /// Graphics completes; the frame is never cut short mid-phase.
    pub fn one_frame<L: FrameListener + ?Sized>(
        &mut self,
        listener: &mut L,
    ) -> Result<(), FrameError> {
        let passes = self.config.render_period.max(1);
        let mut stats = FrameStats::default();

        for _ in 0..passes {
            // Input: drain once, then dispatch. Events fired during
            // dispatch land in the queue for the next frame.
            let watch = Stopwatch::new();
            let pending: Vec<FrameEvent> = self.events.drain().collect();
            for event in pending {
                let consumed = self.registry.dispatch_event(&event);
                if !consumed {
                    listener
                        .on_event(&mut self.context(), &event)
                        .map_err(at(Phase::Input))?;
                }
                if event == FrameEvent::Quit {
                    self.stop.requested = true;
                }
            }
            stats.input += watch.elapsed();

            let watch = Stopwatch::new();
            listener
                .on_after_events(&mut self.context())
                .map_err(at(Phase::AfterEvents))?;
            stats.after_events += watch.elapsed();

            let watch = Stopwatch::new();
            listener
                .on_user_input(&mut self.context())
                .map_err(at(Phase::UserInput))?;
            stats.user_input += watch.elapsed();

            let watch = Stopwatch::new();
            self.registry.dispatch_network();
            listener
                .on_network(&mut self.context())
                .map_err(at(Phase::Network))?;
            stats.network += watch.elapsed();

            let watch = Stopwatch::new();
            self.registry.dispatch_ai();
            listener.on_ai(&mut self.context()).map_err(at(Phase::Ai))?;
            stats.ai += watch.elapsed();

            // Simulation: the dependency order is refreshed first so a
            // cycle surfaces here, as a fatal configuration error, before
            // any entity advances.
            let watch = Stopwatch::new();
            self.entities.order()?;
            let measured = self.last_tick.elapsed().as_secs_f64();
            self.last_tick = Instant::now();
            let (rdt, sdt, idt) = self.timing.compute_simulation_step(measured);
            self.step = (rdt, sdt, idt);
            self.registry.dispatch_simulation(rdt, sdt, idt);
            listener
                .on_simulation(&mut self.context(), rdt, sdt, idt)
                .map_err(at(Phase::Simulation))?;
            stats.simulation += watch.elapsed();
        }

        let watch = Stopwatch::new();
        self.registry.dispatch_pose();
        listener
            .on_pose(&mut self.context())
            .map_err(at(Phase::Pose))?;
        stats.pose = watch.elapsed();

        let watch = Stopwatch::new();
        self.wait_for_next_frame();
        stats.wait = watch.elapsed();

        let watch = Stopwatch::new();
        if self.config.submit_mode.swaps_before_render() {
            self.presenter.swap_buffers();
        }
        listener
            .on_graphics(&mut self.context())
            .map_err(at(Phase::Graphics))?;
        if self.config.submit_mode.swaps_after_render() {
            self.presenter.swap_buffers();
        }
        stats.graphics = watch.elapsed();

        self.stats = stats;
        Ok(())
    }

    /// Sleeps out the remainder of the frame's time budget.
    ///
    /// The request is shortened by the running overshoot estimate, and the
    /// overshoot actually observed feeds back into that estimate.
    fn wait_for_next_frame(&mut self) {
        let target = if self.config.lower_rate_when_unfocused && !self.window.has_focus() {
            1.0 / BACKGROUND_FRAME_RATE
        } else {
            self.timing.wall_clock_target_duration
        };

        // Time already spent this frame, measured from the end of the
        // previous wait so the whole frame counts against the budget.
        let cumulative = self.last_wait_end.elapsed().as_secs_f64();
        let desired = desired_wait(target, cumulative);
        let requested = compensated_wait(desired, self.timing.over_wait_estimate());

        let watch = Stopwatch::new();
        if requested > 0.0 {
            thread::sleep(Duration::from_secs_f64(requested));
        }
        let overage = watch.elapsed_secs_f64() - requested;
        self.timing.update_over_wait(
            overage,
            self.config.over_wait_smoothing,
            self.config.over_wait_snap_threshold,
        );

        self.last_wait_end = Instant::now();
    }

    /// Runs frames until a stop is requested, returning the exit code.
    ///
    /// Calls `on_init` before the first frame and `on_cleanup` after the
    /// last. When `catch_common_errors` is enabled, a recoverable
    /// [`PhaseError`] ends the run with a logged diagnostic and exit code 1
    /// instead of propagating; configuration errors and unclassified
    /// errors always propagate.
    pub fn run<L: FrameListener + ?Sized>(&mut self, listener: &mut L) -> Result<i32, FrameError> {
        match self.run_loop(listener) {
            Ok(code) => Ok(code),
            Err(error) => {
                if self.config.catch_common_errors {
                    if let FrameError::Phase { phase, source } = &error {
                        if source.is_recoverable() {
                            log::error!("Caught in {phase} phase: {source}. Ending run loop.");
                            return Ok(1);
                        }
                    }
                }
                Err(error)
            }
        }
    }

    fn run_loop<L: FrameListener + ?Sized>(
        &mut self,
        listener: &mut L,
    ) -> Result<i32, FrameError> {
        self.stop = StopRequest::default();
        listener
            .on_init(&mut self.context())
            .map_err(at(Phase::Startup))?;
        log::info!(
            "Run loop started (target {:.1} fps)",
            1.0 / self.timing.wall_clock_target_duration
        );

        self.last_tick = Instant::now();
        self.last_wait_end = Instant::now();
        while !self.stop.requested {
            self.one_frame(listener)?;
        }

        listener
            .on_cleanup(&mut self.context())
            .map_err(at(Phase::Shutdown))?;
        log::info!("Run loop ended with exit code {}", self.stop.exit_code);
        Ok(self.stop.exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::NullListener;

    fn fast_config() -> FrameConfig {
        FrameConfig {
            target_frame_duration: 0.001,
            ..FrameConfig::default()
        }
    }

    struct CountingListener {
        frames: u32,
        stop_after: u32,
        exit_code: i32,
        init_calls: u32,
        cleanup_calls: u32,
    }

    impl CountingListener {
        fn new(stop_after: u32, exit_code: i32) -> Self {
            Self {
                frames: 0,
                stop_after,
                exit_code,
                init_calls: 0,
                cleanup_calls: 0,
            }
        }
    }

    impl FrameListener for CountingListener {
        fn on_init(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
            self.init_calls += 1;
            Ok(())
        }

        fn on_cleanup(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
            self.cleanup_calls += 1;
            Ok(())
        }

        fn on_simulation(
            &mut self,
            ctx: &mut FrameContext,
            _rdt: f64,
            _sdt: f64,
            _idt: f64,
        ) -> Result<(), PhaseError> {
            self.frames += 1;
            if self.frames >= self.stop_after {
                ctx.request_stop(self.exit_code);
            }
            Ok(())
        }
    }

    #[test]
    fn run_brackets_with_init_and_cleanup_and_returns_exit_code() {
        let mut scheduler = FrameScheduler::new(fast_config());
        let mut listener = CountingListener::new(3, 42);
        let code = scheduler.run(&mut listener).unwrap();
        assert_eq!(code, 42);
        assert_eq!(listener.init_calls, 1);
        assert_eq!(listener.cleanup_calls, 1);
        assert_eq!(listener.frames, 3);
    }

    #[test]
    fn quit_event_requests_stop() {
        let mut scheduler = FrameScheduler::new(fast_config());
        scheduler.post_event(FrameEvent::Quit);
        let code = scheduler.run(&mut NullListener).unwrap();
        assert_eq!(code, 0);
        assert!(scheduler.stop_requested());
    }

    #[test]
    fn stop_takes_effect_at_the_frame_boundary_only() {
        // A stop requested during Simulation must not skip Pose/Graphics.
        struct OrderListener {
            phases: Vec<&'static str>,
        }
        impl FrameListener for OrderListener {
            fn on_simulation(
                &mut self,
                ctx: &mut FrameContext,
                _rdt: f64,
                _sdt: f64,
                _idt: f64,
            ) -> Result<(), PhaseError> {
                self.phases.push("simulation");
                ctx.request_stop(0);
                Ok(())
            }
            fn on_pose(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
                self.phases.push("pose");
                Ok(())
            }
            fn on_graphics(&mut self, _ctx: &mut FrameContext) -> Result<(), PhaseError> {
                self.phases.push("graphics");
                Ok(())
            }
        }

        let mut scheduler = FrameScheduler::new(fast_config());
        let mut listener = OrderListener { phases: Vec::new() };
        scheduler.run(&mut listener).unwrap();
        assert_eq!(listener.phases, vec!["simulation", "pose", "graphics"]);
    }

    #[test]
    fn render_period_repeats_the_simulation_passes() {
        let config = FrameConfig {
            render_period: 3,
            ..fast_config()
        };
        let mut scheduler = FrameScheduler::new(config);
        let mut listener = CountingListener::new(3, 0);
        scheduler.run(&mut listener).unwrap();
        // All three passes belong to the single frame that ran.
        assert_eq!(listener.frames, 3);
        assert_eq!(listener.cleanup_calls, 1);
    }

    #[test]
    fn dependency_cycle_is_fatal_during_simulation() {
        let mut scheduler = FrameScheduler::new(fast_config());
        scheduler.entities_mut().add_node("a");
        scheduler.entities_mut().add_node("b");
        scheduler.entities_mut().set_order("a", "b").unwrap();
        scheduler.entities_mut().set_order("b", "a").unwrap();

        let err = scheduler.run(&mut NullListener).unwrap_err();
        assert!(matches!(err, FrameError::Config(_)));
    }
}
