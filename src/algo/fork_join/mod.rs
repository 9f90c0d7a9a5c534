/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Parallel fork/join depth-first search of a [`Maze`].
//!
//! The search starts with a single task performing an iterative depth-first
//! visit from the start of the maze. When a task claims a node that is a
//! junction, that is, a node with more than two neighbors, or the start node
//! when it has exactly two neighbors, it forks: every unclaimed node on its
//! frontier becomes the seed of a new task. Children run in parallel on the
//! current [rayon](rayon) thread pool and are joined in spawn order.
//!
//! All tasks of a search share a [`SearchState`]: a visited set, used to
//! arbitrate which task explores a node, a predecessor mapping, recording the
//! node from which each node was first discovered, and a goal flag, which
//! stops every task as soon as a goal has been found.
//!
//! # Examples
//!
//! ```
//! use dsi_progress_logger::prelude::*;
//! use maze_solver::prelude::*;
//! use maze_solver::threads;
//! use webgraph::prelude::VecGraph;
//!
//! // A diamond: two ways from 0 to 3
//! let graph = VecGraph::from_arcs([(0, 1), (0, 2), (1, 3), (2, 3)]);
//! let maze = GraphMaze::new(&graph, 0, |node| node == 3);
//!
//! let search = ForkJoin::new(&maze).run(&threads![], no_logging![]).unwrap();
//! let path = search.path.unwrap();
//! assert_eq!(path.origin(), 0);
//! assert_eq!(path.goal(), 3);
//! assert_eq!(path.len(), 3);
//! ```

mod path;
pub use path::*;

mod state;
pub use state::*;

mod task;
use task::SearchTask;

use crate::algo::maze::Maze;
use dsi_progress_logger::ProgressLog;
use rayon::ThreadPool;

/// Errors that can happen during a search.
///
/// Note that not finding a goal is not an error.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The predecessor mapping does not lead from the goal back to the
    /// origin.
    #[error("Broken predecessor chain from goal {goal} to origin {origin}: node {node} has no predecessor")]
    BrokenChain {
        origin: usize,
        goal: usize,
        node: usize,
    },
    /// The maze returned a node that is not smaller than its number of
    /// nodes.
    #[error("Node {node} is out of bounds (the maze has {num_nodes} nodes)")]
    NodeOutOfBounds { node: usize, num_nodes: usize },
}

/// Statistics about a completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// The number of claimed nodes.
    pub claimed: usize,
    /// The number of tasks that have been run, including the root task.
    pub tasks: usize,
    /// The number of fork points.
    pub forks: usize,
    /// Whether the goal flag was raised.
    pub goal_found: bool,
}

/// The outcome of a search.
#[derive(Debug, Clone)]
pub struct Search {
    /// The path from the start to a goal, if one was found.
    pub path: Option<Path>,
    /// Statistics about the search.
    pub stats: Stats,
}

/// A parallel fork/join depth-first search.
///
/// The search is configured with builder-style methods and started with
/// [`solve`](ForkJoin::solve) or [`run`](ForkJoin::run). Each call builds a
/// fresh [`SearchState`], so the same instance can be used for any number of
/// independent searches.
pub struct ForkJoin<'a, M> {
    maze: &'a M,
    fork_after: usize,
    max_depth: usize,
}

impl<'a, M: Maze + Sync> ForkJoin<'a, M> {
    /// The default maximum fork depth.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Creates a search on the given maze.
    pub fn new(maze: &'a M) -> Self {
        Self {
            maze,
            fork_after: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the fork threshold.
    ///
    /// A task forks at a junction only if it has claimed at least
    /// `fork_after` nodes itself. The default, zero, makes tasks fork at
    /// every junction.
    pub fn fork_after(mut self, fork_after: usize) -> Self {
        self.fork_after = fork_after;
        self
    }

    /// Sets the maximum fork depth.
    ///
    /// Tasks that are `max_depth` forks away from the root task do not fork
    /// anymore, and search sequentially what remains of their branch.
    ///
    /// Tasks waiting for their children keep their stack frames, so this
    /// value also bounds the stack usage of the thread pool workers.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Searches for a path from the start of the maze to a goal.
    ///
    /// Returns `Ok(None)` if no goal is reachable from the start.
    ///
    /// # Arguments
    /// * `thread_pool`: the thread pool the tasks will run on.
    /// * `pl`: a progress logger.
    pub fn solve(
        &self,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Result<Option<Path>, SolveError> {
        self.run(thread_pool, pl).map(|search| search.path)
    }

    /// Searches for a path from the start of the maze to a goal, returning
    /// also statistics about the search.
    ///
    /// See [`solve`](ForkJoin::solve).
    pub fn run(
        &self,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Result<Search, SolveError> {
        let num_nodes = self.maze.num_nodes();
        if num_nodes == 0 {
            return Ok(Search {
                path: None,
                stats: Stats::default(),
            });
        }

        let start = self.maze.start();
        if start >= num_nodes {
            return Err(SolveError::NodeOutOfBounds {
                node: start,
                num_nodes,
            });
        }

        pl.item_name("node");
        pl.expected_updates(Some(num_nodes));
        pl.start(format!("Searching for a goal from node {}...", start));

        let state = SearchState::new(num_nodes);
        let root = SearchTask::root(self.maze, &state, self.fork_after, self.max_depth);
        let path = thread_pool.install(|| root.search())?;

        let stats = Stats {
            claimed: state.num_claimed(),
            tasks: state.num_tasks(),
            forks: state.num_forks(),
            goal_found: state.is_goal_found(),
        };

        pl.update_with_count(stats.claimed);
        pl.done();

        match &path {
            Some(path) => pl.info(format_args!(
                "Found goal {} at distance {} using {} tasks and {} fork points",
                path.goal(),
                path.len() - 1,
                stats.tasks,
                stats.forks
            )),
            None => pl.info(format_args!(
                "No goal reachable from node {} ({} nodes claimed)",
                start, stats.claimed
            )),
        }

        Ok(Search { path, stats })
    }
}
