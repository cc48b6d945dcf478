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

//! Configuration-fault error types.
//!
//! These represent programmer errors in how the scheduler was configured
//! (cyclic dependency constraints, clearing a constraint that was never
//! declared). They are always fatal: the run loop never downgrades them,
//! regardless of its recoverable-error policy.

use std::fmt;

/// A fatal configuration fault, reported with enough context to identify
/// the offending node or constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The dependency constraints form a cycle among the named nodes.
    DependencyCycle {
        /// The nodes that participate in (or are downstream of) the cycle.
        nodes: Vec<String>,
    },
    /// A constraint was declared from a node to itself.
    SelfDependency {
        /// The node named on both sides of the constraint.
        name: String,
    },
    /// The same `(before, after)` constraint was declared twice.
    DuplicateConstraint {
        /// The node required to run first.
        before: String,
        /// The node required to run later.
        after: String,
    },
    /// An attempt was made to clear a constraint that was never declared.
    UnknownConstraint {
        /// The node required to run first.
        before: String,
        /// The node required to run later.
        after: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DependencyCycle { nodes } => {
                write!(
                    f,
                    "Dependency cycle detected among nodes: {}",
                    nodes.join(", ")
                )
            }
            ConfigError::SelfDependency { name } => {
                write!(f, "Node '{name}' cannot be ordered before itself")
            }
            ConfigError::DuplicateConstraint { before, after } => {
                write!(
                    f,
                    "Constraint '{before}' before '{after}' was already declared"
                )
            }
            ConfigError::UnknownConstraint { before, after } => {
                write!(
                    f,
                    "Tried to clear constraint '{before}' before '{after}', which was never declared"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
