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

//! Run-loop error taxonomy.

use cadence_core::ConfigError;
use std::error::Error;
use std::fmt;

/// The frame phase in which an error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The `on_init` bracket before the first frame.
    Startup,
    /// The `on_cleanup` bracket after the last frame.
    Shutdown,
    /// Event drain and dispatch.
    Input,
    /// Post-event settling.
    AfterEvents,
    /// Polled user input.
    UserInput,
    /// Network servicing.
    Network,
    /// Decision logic.
    Ai,
    /// State advancement.
    Simulation,
    /// Renderable-state production.
    Pose,
    /// Frame pacing.
    Wait,
    /// Rendering and presentation.
    Graphics,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Startup => "Startup",
            Phase::Shutdown => "Shutdown",
            Phase::Input => "Input",
            Phase::AfterEvents => "AfterEvents",
            Phase::UserInput => "UserInput",
            Phase::Network => "Network",
            Phase::Ai => "AI",
            Phase::Simulation => "Simulation",
            Phase::Pose => "Pose",
            Phase::Wait => "Wait",
            Phase::Graphics => "Graphics",
        };
        write!(f, "{name}")
    }
}

/// An error raised by a listener callback during a frame phase.
#[derive(Debug)]
pub enum PhaseError {
    /// An I/O operation failed (file, socket, pipe).
    Io(std::io::Error),
    /// An asset or data file could not be parsed.
    MalformedAsset(String),
    /// A peer violated an application protocol.
    Protocol(String),
    /// Any other failure. Never treated as recoverable.
    Other(Box<dyn Error + Send + Sync>),
}

impl PhaseError {
    /// True for the whitelisted error classes an application can plausibly
    /// survive losing a run over: I/O failures, malformed assets, and
    /// protocol violations. [`Other`](PhaseError::Other) is deliberately
    /// excluded so unclassified failures always propagate.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PhaseError::Io(_) | PhaseError::MalformedAsset(_) | PhaseError::Protocol(_)
        )
    }
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseError::Io(e) => write!(f, "I/O error: {e}"),
            PhaseError::MalformedAsset(what) => write!(f, "Malformed asset: {what}"),
            PhaseError::Protocol(what) => write!(f, "Protocol violation: {what}"),
            PhaseError::Other(e) => write!(f, "Error: {e}"),
        }
    }
}

impl Error for PhaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PhaseError::Io(e) => Some(e),
            PhaseError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PhaseError {
    fn from(e: std::io::Error) -> Self {
        PhaseError::Io(e)
    }
}

/// A fatal error surfacing from [`FrameScheduler::run`] or `one_frame`.
///
/// [`FrameScheduler::run`]: crate::FrameScheduler::run
#[derive(Debug)]
pub enum FrameError {
    /// A configuration fault (dependency cycle, bad constraint). Always
    /// fatal, never downgraded by the catch flag.
    Config(ConfigError),
    /// A listener callback failed during the named phase.
    Phase {
        /// The phase the callback belongs to.
        phase: Phase,
        /// The underlying failure.
        source: PhaseError,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Config(e) => write!(f, "Configuration error: {e}"),
            FrameError::Phase { phase, source } => {
                write!(f, "Error in {phase} phase: {source}")
            }
        }
    }
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FrameError::Config(e) => Some(e),
            FrameError::Phase { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for FrameError {
    fn from(e: ConfigError) -> Self {
        FrameError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(PhaseError::Io(io).is_recoverable());
        assert!(PhaseError::MalformedAsset("scene.json".into()).is_recoverable());
        assert!(PhaseError::Protocol("bad handshake".into()).is_recoverable());
        assert!(!PhaseError::Other("anything".into()).is_recoverable());
    }

    #[test]
    fn display_names_the_phase() {
        let e = FrameError::Phase {
            phase: Phase::Simulation,
            source: PhaseError::MalformedAsset("level1.dat".into()),
        };
        let msg = e.to_string();
        assert!(msg.contains("Simulation"), "got: {msg}");
        assert!(msg.contains("level1.dat"), "got: {msg}");
    }

    #[test]
    fn config_errors_convert_into_frame_errors() {
        let cfg = ConfigError::SelfDependency {
            name: "camera".into(),
        };
        let e: FrameError = cfg.into();
        assert!(matches!(e, FrameError::Config(_)));
    }
}
