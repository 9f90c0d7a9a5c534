/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Mazes, that is, graphs with a start node and a set of goal nodes.

use anyhow::Result;
use std::sync::atomic::Ordering;
use sux::bits::AtomicBitVec;
use webgraph::traits::RandomAccessGraph;

/// A maze to be searched.
///
/// Nodes are identified by the integers in `0..num_nodes()`. The search
/// starts from [`start`](Maze::start) and ends as soon as a node for which
/// [`has_goal`](Maze::has_goal) returns true is reached.
///
/// Implementations must be usable from several threads at the same time, as
/// parallel searches query the maze concurrently.
pub trait Maze {
    /// Returns the number of nodes of the maze.
    fn num_nodes(&self) -> usize;

    /// Returns the node the search starts from.
    fn start(&self) -> usize;

    /// Returns the neighbors of `node`, in the order in which they
    /// should be pushed on the frontier.
    fn neighbors(&self, node: usize) -> impl IntoIterator<Item = usize>;

    /// Returns whether `node` is a goal.
    fn has_goal(&self, node: usize) -> bool;

    /// Notifies the maze that `node` has been visited.
    ///
    /// Errors are logged by the search and otherwise ignored.
    fn on_visit(&self, _node: usize) -> Result<()> {
        Ok(())
    }
}

/// A [`Maze`] built on a [random-access graph](RandomAccessGraph), a start
/// node and a goal predicate.
///
/// Visit notifications are recorded, and can be inspected after the search
/// using [`was_visited`](GraphMaze::was_visited).
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::prelude::*;
/// use maze_solver::prelude::*;
/// use maze_solver::threads;
/// use webgraph::prelude::VecGraph;
///
/// let graph = VecGraph::from_arcs([(0, 1), (1, 2), (2, 3)]);
/// let maze = GraphMaze::new(&graph, 0, |node| node == 3);
///
/// let path = ForkJoin::new(&maze)
///     .solve(&threads![2], no_logging![])
///     .unwrap()
///     .unwrap();
/// assert_eq!(path.nodes(), &[0, 1, 2, 3]);
/// assert!(maze.was_visited(2));
/// ```
pub struct GraphMaze<G, F> {
    graph: G,
    start: usize,
    goal: F,
    visited: AtomicBitVec,
}

impl<G: RandomAccessGraph, F: Fn(usize) -> bool> GraphMaze<G, F> {
    /// Creates a maze.
    ///
    /// # Arguments
    /// * `graph`: the graph; nodes are mapped to cells and arcs to passages.
    /// * `start`: the node the search starts from.
    /// * `goal`: the goal predicate.
    pub fn new(graph: G, start: usize, goal: F) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            start,
            goal,
            visited: AtomicBitVec::new(num_nodes),
        }
    }

    /// Returns whether a visit of `node` has been notified.
    pub fn was_visited(&self, node: usize) -> bool {
        self.visited.get(node, Ordering::Relaxed)
    }

    /// Returns the number of nodes whose visit has been notified.
    pub fn num_visited(&self) -> usize {
        (0..self.graph.num_nodes())
            .filter(|&node| self.was_visited(node))
            .count()
    }

    /// Forgets all visit notifications.
    pub fn reset(&mut self) {
        self.visited = AtomicBitVec::new(self.graph.num_nodes());
    }
}

impl<G: RandomAccessGraph, F: Fn(usize) -> bool> Maze for GraphMaze<G, F> {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    #[inline(always)]
    fn start(&self) -> usize {
        self.start
    }

    #[inline(always)]
    fn neighbors(&self, node: usize) -> impl IntoIterator<Item = usize> {
        self.graph.successors(node)
    }

    #[inline(always)]
    fn has_goal(&self, node: usize) -> bool {
        (self.goal)(node)
    }

    fn on_visit(&self, node: usize) -> Result<()> {
        self.visited.set(node, true, Ordering::Relaxed);
        Ok(())
    }
}
