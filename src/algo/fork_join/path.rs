/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{SearchState, SolveError};
use std::ops::Deref;

/// A path from the start of a search to a goal.
///
/// The path is never empty: the first node is the origin of the search and
/// the last one is the goal. Consecutive nodes are linked by the predecessor
/// mapping of the search that produced the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Box<[usize]>);

impl Path {
    /// Returns the origin of the path.
    pub fn origin(&self) -> usize {
        self.0[0]
    }

    /// Returns the goal of the path.
    pub fn goal(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Returns the nodes of the path, from the origin to the goal.
    pub fn nodes(&self) -> &[usize] {
        &self.0
    }

    /// Returns the nodes of the path as a boxed slice, consuming the path.
    pub fn into_inner(self) -> Box<[usize]> {
        self.0
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Path> for Vec<usize> {
    fn from(path: Path) -> Self {
        path.0.into_vec()
    }
}

/// Reconstructs the path from `origin` to `goal` by following the
/// predecessor mapping of `state` backwards from `goal`.
///
/// A node without a predecessor met before reaching `origin` makes the
/// reconstruction fail with [`SolveError::BrokenChain`]. The same error is
/// returned if the walk takes more steps than there are nodes, which can only
/// happen if the mapping contains a cycle.
pub fn reconstruct(state: &SearchState, origin: usize, goal: usize) -> Result<Path, SolveError> {
    for node in [origin, goal] {
        if node >= state.num_nodes() {
            return Err(SolveError::NodeOutOfBounds {
                node,
                num_nodes: state.num_nodes(),
            });
        }
    }

    let mut nodes = vec![goal];
    let mut curr = goal;

    while curr != origin {
        // The origin is not in nodes yet, so without cycles nodes.len() < n
        if nodes.len() >= state.num_nodes() {
            return Err(SolveError::BrokenChain {
                origin,
                goal,
                node: curr,
            });
        }
        curr = state
            .predecessor(curr)
            .ok_or(SolveError::BrokenChain {
                origin,
                goal,
                node: curr,
            })?;
        nodes.push(curr);
    }

    nodes.reverse();
    Ok(Path(nodes.into_boxed_slice()))
}
