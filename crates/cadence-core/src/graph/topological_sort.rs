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

//! A generic implementation of Kahn's algorithm for topological sorting.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// An error indicating that a cycle was detected in the graph.
///
/// Carries every node that could not be retired: the members of the cycle
/// plus any node downstream of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<T> {
    /// The nodes left unordered when the sort stalled.
    pub remaining: Vec<T>,
}

/// Performs a topological sort on a generic directed graph.
///
/// The graph is defined by a collection of nodes and a set of directed edges
/// representing dependencies (from parent to child). Among the nodes ready
/// at any point, the smallest by `Ord` is retired first, so the result is
/// deterministic: callers that pass insertion indices get an order that
/// breaks ties by insertion order.
///
/// # Returns
///
/// * `Ok(Vec<T>)`: the nodes in a valid topological order.
/// * `Err(CycleError)`: the graph contains one or more cycles; the error
///   lists the nodes that could not be ordered.
pub fn topological_sort<T>(
    nodes: impl IntoIterator<Item = T>,
    edges: impl IntoIterator<Item = (T, T)>,
) -> Result<Vec<T>, CycleError<T>>
where
    T: Copy + Eq + Ord + Hash,
{
    let node_list: Vec<T> = nodes.into_iter().collect();
    if node_list.is_empty() {
        return Ok(Vec::new());
    }

    let mut adjacency_list: HashMap<T, Vec<T>> = HashMap::new();
    let mut in_degree: HashMap<T, usize> = node_list.iter().map(|id| (*id, 0)).collect();

    // 1. Build adjacency list and in-degree counts from edges.
    for (parent, child) in edges {
        adjacency_list.entry(parent).or_default().push(child);
        if let Some(degree) = in_degree.get_mut(&child) {
            *degree += 1;
        }
    }

    // 2. Seed the ready set with all root nodes (in-degree of 0).
    let mut ready: BinaryHeap<Reverse<T>> = BinaryHeap::new();
    for &node in &node_list {
        if in_degree.get(&node).copied().unwrap_or(0) == 0 {
            ready.push(Reverse(node));
        }
    }

    // 3. Retire the smallest ready node until none remain.
    let mut sorted_list = Vec::with_capacity(node_list.len());
    while let Some(Reverse(parent_node)) = ready.pop() {
        sorted_list.push(parent_node);
        if let Some(children) = adjacency_list.get(&parent_node) {
            for &child_node in children {
                if let Some(degree) = in_degree.get_mut(&child_node) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(Reverse(child_node));
                    }
                }
            }
        }
    }

    // 4. Anything still holding an in-degree is part of (or behind) a cycle.
    if sorted_list.len() != node_list.len() {
        let remaining = node_list
            .into_iter()
            .filter(|n| in_degree.get(n).copied().unwrap_or(0) > 0)
            .collect();
        Err(CycleError { remaining })
    } else {
        Ok(sorted_list)
    }
}
