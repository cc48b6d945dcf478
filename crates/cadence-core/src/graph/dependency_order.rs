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

//! A stable total order over named nodes under "before" constraints.

use crate::error::ConfigError;
use crate::graph::topological_sort::topological_sort;

/// A dependency-ordered traversal over named simulation entities.
///
/// Nodes are plain string identifiers, deliberately decoupled from object
/// identity so a constraint can be declared before the entity it names is
/// created (e.g., while a scene is still being assembled). The traversal
/// order is recomputed lazily: any structural change marks the cached order
/// dirty, and the next [`order`](Self::order) call re-sorts. Frames with no
/// structural change between them pay nothing.
///
/// Ties are broken by node insertion order, so the result is deterministic
/// for a fixed insertion sequence.
#[derive(Debug, Default)]
pub struct DependencyOrder {
    /// Nodes in insertion order.
    nodes: Vec<String>,
    /// Declared `(before, after)` constraints, in declaration order.
    constraints: Vec<(String, String)>,
    cached: Vec<String>,
    dirty: bool,
}

impl DependencyOrder {
    /// Creates an empty traversal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node. Re-registering an existing name is a no-op.
    pub fn add_node(&mut self, name: &str) {
        if self.nodes.iter().any(|n| n == name) {
            return;
        }
        self.nodes.push(name.to_string());
        self.dirty = true;
    }

    /// Removes a node, silently dropping every constraint that names it.
    ///
    /// Constraints are commonly declared in anticipation of dynamically
    /// created and destroyed nodes, so pruning is not an error. Removing an
    /// unknown node is a no-op.
    pub fn remove_node(&mut self, name: &str) {
        let before = self.constraints.len();
        self.constraints.retain(|(a, b)| a != name && b != name);
        let dropped = before - self.constraints.len();
        if dropped > 0 {
            log::debug!("Dropped {dropped} constraint(s) naming removed node '{name}'");
        }
        self.nodes.retain(|n| n != name);
        self.dirty = true;
    }

    /// True if `name` is currently registered.
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// The number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Declares that `before` must appear ahead of `after` in the traversal
    /// (not necessarily immediately ahead).
    ///
    /// Either name may be unregistered; the constraint lies dormant until
    /// both nodes exist. A self-constraint or a duplicate declaration is a
    /// configuration fault.
    pub fn set_order(&mut self, before: &str, after: &str) -> Result<(), ConfigError> {
        if before == after {
            return Err(ConfigError::SelfDependency {
                name: before.to_string(),
            });
        }
        if self.constraints.iter().any(|(a, b)| a == before && b == after) {
            return Err(ConfigError::DuplicateConstraint {
                before: before.to_string(),
                after: after.to_string(),
            });
        }
        self.constraints
            .push((before.to_string(), after.to_string()));
        self.dirty = true;
        Ok(())
    }

    /// Removes a previously declared constraint.
    ///
    /// Clearing a constraint that was never declared is a fatal usage error.
    pub fn clear_order(&mut self, before: &str, after: &str) -> Result<(), ConfigError> {
        match self
            .constraints
            .iter()
            .position(|(a, b)| a == before && b == after)
        {
            Some(i) => {
                self.constraints.remove(i);
                self.dirty = true;
                Ok(())
            }
            None => Err(ConfigError::UnknownConstraint {
                before: before.to_string(),
                after: after.to_string(),
            }),
        }
    }

    /// Returns the current traversal order, re-sorting only if stale.
    ///
    /// Constraints whose endpoints are not both registered are ignored for
    /// the sort. A cycle among the active constraints is a fatal
    /// configuration error naming the offending nodes.
    pub fn order(&mut self) -> Result<&[String], ConfigError> {
        if self.dirty {
            let edges: Vec<(usize, usize)> = self
                .constraints
                .iter()
                .filter_map(|(before, after)| {
                    let b = self.nodes.iter().position(|n| n == before)?;
                    let a = self.nodes.iter().position(|n| n == after)?;
                    Some((b, a))
                })
                .collect();

            let sorted = topological_sort(0..self.nodes.len(), edges).map_err(|cycle| {
                ConfigError::DependencyCycle {
                    nodes: cycle
                        .remaining
                        .into_iter()
                        .map(|i| self.nodes[i].clone())
                        .collect(),
                }
            })?;

            self.cached = sorted.into_iter().map(|i| self.nodes[i].clone()).collect();
            self.dirty = false;
        }
        Ok(&self.cached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(order: &[String]) -> Vec<&str> {
        order.iter().map(String::as_str).collect()
    }

    #[test]
    fn unconstrained_order_is_insertion_order() {
        let mut dep = DependencyOrder::new();
        dep.add_node("player");
        dep.add_node("camera");
        dep.add_node("sky");
        assert_eq!(names(dep.order().unwrap()), ["player", "camera", "sky"]);
    }

    #[test]
    fn constraints_reorder_and_ties_stay_stable() {
        let mut dep = DependencyOrder::new();
        dep.add_node("camera");
        dep.add_node("player");
        dep.add_node("sky");
        // The camera follows the player, so the player must simulate first.
        dep.set_order("player", "camera").unwrap();
        assert_eq!(names(dep.order().unwrap()), ["player", "sky", "camera"]);
    }

    #[test]
    fn order_is_cached_until_dirtied() {
        let mut dep = DependencyOrder::new();
        dep.add_node("a");
        dep.add_node("b");
        let first = dep.order().unwrap().to_vec();
        assert_eq!(dep.order().unwrap(), first.as_slice());

        dep.set_order("b", "a").unwrap();
        assert_eq!(names(dep.order().unwrap()), ["b", "a"]);
    }

    #[test]
    fn constraint_may_precede_its_nodes() {
        let mut dep = DependencyOrder::new();
        dep.set_order("anchor", "follower").unwrap();
        dep.add_node("follower");
        // Only one endpoint exists: the constraint is dormant.
        assert_eq!(names(dep.order().unwrap()), ["follower"]);

        dep.add_node("anchor");
        assert_eq!(names(dep.order().unwrap()), ["anchor", "follower"]);
    }

    #[test]
    fn removal_prunes_constraints_silently() {
        let mut dep = DependencyOrder::new();
        dep.add_node("a");
        dep.add_node("b");
        dep.add_node("c");
        dep.set_order("c", "a").unwrap();
        dep.set_order("c", "b").unwrap();
        assert_eq!(names(dep.order().unwrap()), ["c", "a", "b"]);

        dep.remove_node("c");
        assert_eq!(names(dep.order().unwrap()), ["a", "b"]);
        // The pruned constraint is gone for good: re-adding "c" does not
        // resurrect it.
        dep.add_node("c");
        assert_eq!(names(dep.order().unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn cycle_is_a_configuration_error() {
        let mut dep = DependencyOrder::new();
        dep.add_node("a");
        dep.add_node("b");
        dep.set_order("a", "b").unwrap();
        dep.set_order("b", "a").unwrap();
        match dep.order() {
            Err(ConfigError::DependencyCycle { nodes }) => {
                assert!(nodes.contains(&"a".to_string()));
                assert!(nodes.contains(&"b".to_string()));
            }
            other => panic!("Expected DependencyCycle, got {other:?}"),
        }
    }

    #[test]
    fn clearing_unknown_constraint_fails() {
        let mut dep = DependencyOrder::new();
        dep.add_node("a");
        assert_eq!(
            dep.clear_order("a", "b"),
            Err(ConfigError::UnknownConstraint {
                before: "a".to_string(),
                after: "b".to_string(),
            })
        );
    }

    #[test]
    fn clearing_releases_the_constraint() {
        let mut dep = DependencyOrder::new();
        dep.add_node("a");
        dep.add_node("b");
        dep.set_order("b", "a").unwrap();
        assert_eq!(names(dep.order().unwrap()), ["b", "a"]);
        dep.clear_order("b", "a").unwrap();
        assert_eq!(names(dep.order().unwrap()), ["a", "b"]);
    }

    #[test]
    fn self_and_duplicate_constraints_are_faults() {
        let mut dep = DependencyOrder::new();
        assert!(matches!(
            dep.set_order("a", "a"),
            Err(ConfigError::SelfDependency { .. })
        ));
        dep.set_order("a", "b").unwrap();
        assert!(matches!(
            dep.set_order("a", "b"),
            Err(ConfigError::DuplicateConstraint { .. })
        ));
    }
}
