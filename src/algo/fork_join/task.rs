/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{reconstruct, Path, SearchState, SolveError};
use crate::algo::maze::Maze;
use rayon::prelude::*;
use std::collections::HashSet;

/// A branch of a fork/join search.
///
/// A task performs an iterative depth-first visit from its seed, sharing the
/// visited set and the predecessor mapping with all other tasks of the same
/// search. At fork points the unvisited part of its frontier is handed to
/// child tasks, which run in parallel on the current thread pool.
pub(crate) struct SearchTask<'a, M> {
    maze: &'a M,
    state: &'a SearchState,
    origin: usize,
    seed: usize,
    // Number of forks between the root and this task
    depth: usize,
    fork_after: usize,
    max_depth: usize,
}

impl<'a, M: Maze + Sync> SearchTask<'a, M> {
    /// Creates the root task of a search.
    pub(crate) fn root(
        maze: &'a M,
        state: &'a SearchState,
        fork_after: usize,
        max_depth: usize,
    ) -> Self {
        let origin = maze.start();
        Self {
            maze,
            state,
            origin,
            seed: origin,
            depth: 0,
            fork_after,
            max_depth,
        }
    }

    fn child(&self, seed: usize) -> Self {
        Self {
            maze: self.maze,
            state: self.state,
            origin: self.origin,
            seed,
            depth: self.depth + 1,
            fork_after: self.fork_after,
            max_depth: self.max_depth,
        }
    }

    fn notify_visit(&self, node: usize) {
        if let Err(err) = self.maze.on_visit(node) {
            log::warn!("Visit notification for node {} failed: {:#}", node, err);
        }
    }

    /// Runs the task.
    ///
    /// Returns the path from the origin of the search to a goal, or `None` if
    /// this task found no goal (possibly because another task found one
    /// first).
    pub(crate) fn search(self) -> Result<Option<Path>, SolveError> {
        let state = self.state;
        let num_nodes = state.num_nodes();
        state.task_started();

        let mut frontier = vec![self.seed];
        let mut neighbors = Vec::new();
        // Nodes claimed by this task
        let mut claimed = 0;

        while !state.is_goal_found() {
            let Some(curr) = frontier.pop() else {
                return Ok(None);
            };

            // Goals are recognized even if reached redundantly
            if self.maze.has_goal(curr) {
                state.mark_goal_found();
                self.notify_visit(curr);
                return reconstruct(state, self.origin, curr).map(Some);
            }

            if !state.try_claim(curr) {
                continue;
            }
            claimed += 1;
            let first_claim = state.num_claimed() == 1;

            self.notify_visit(curr);

            neighbors.clear();
            neighbors.extend(self.maze.neighbors(curr));

            for &succ in &neighbors {
                if succ >= num_nodes {
                    return Err(SolveError::NodeOutOfBounds {
                        node: succ,
                        num_nodes,
                    });
                }
                if !state.is_claimed(succ) {
                    state.record_predecessor(succ, curr);
                }
                frontier.push(succ);
            }

            let junction = neighbors.len() > 2 || (neighbors.len() == 2 && first_claim);
            if !junction || claimed < self.fork_after || self.depth >= self.max_depth {
                continue;
            }

            if let Some(path) = self.fork(curr, &mut frontier)? {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Hands every distinct unclaimed node of the frontier to a child task,
    /// and joins the children in spawn order.
    ///
    /// The spawned nodes are removed from the frontier. Children return paths
    /// rooted at the origin of the search, as the predecessor mapping is
    /// shared, so the first successful child provides the result as is.
    fn fork(&self, curr: usize, frontier: &mut Vec<usize>) -> Result<Option<Path>, SolveError> {
        let mut seeds = Vec::with_capacity(frontier.len());
        let mut seen = HashSet::with_capacity(frontier.len());
        frontier.retain(|&node| {
            if self.state.is_claimed(node) {
                return true;
            }
            if seen.insert(node) {
                seeds.push(node);
            }
            false
        });

        if seeds.is_empty() {
            return Ok(None);
        }

        self.state.fork_point();
        log::debug!(
            "Forking {} tasks at node {} (seed {}, depth {})",
            seeds.len(),
            curr,
            self.seed,
            self.depth
        );

        seeds
            .into_par_iter()
            .map(|seed| self.child(seed))
            .find_map_first(|task| task.search().transpose())
            .transpose()
    }
}
