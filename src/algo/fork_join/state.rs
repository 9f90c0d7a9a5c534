/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use sux::bits::AtomicBitVec;

/// Marker for a node whose predecessor has not been recorded yet.
const NO_PRED: usize = usize::MAX;

/// The state shared by all tasks of a single fork/join search.
///
/// The state is made of a visited set, a predecessor mapping and a goal flag,
/// plus a few counters used for statistics. Every operation is a single
/// atomic instruction: no operation ever blocks.
///
/// A fresh state must be built for each search, as neither the visited set
/// nor the goal flag can be reset.
///
/// # Memory orderings
///
/// Claims and predecessor updates use acquire/release orderings. A node is
/// claimed by a task only after the task has either recorded its predecessor
/// or observed the predecessor recorded by another task, so a task walking
/// the predecessor mapping backwards from a node it discovered sees all the
/// entries it needs.
pub struct SearchState {
    visited: AtomicBitVec,
    pred: Box<[AtomicUsize]>,
    goal_found: AtomicBool,
    num_claimed: AtomicUsize,
    num_tasks: AtomicUsize,
    num_forks: AtomicUsize,
}

impl SearchState {
    /// Creates the state for a search on a maze with `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            visited: AtomicBitVec::new(num_nodes),
            pred: (0..num_nodes).map(|_| AtomicUsize::new(NO_PRED)).collect(),
            goal_found: AtomicBool::new(false),
            num_claimed: AtomicUsize::new(0),
            num_tasks: AtomicUsize::new(0),
            num_forks: AtomicUsize::new(0),
        }
    }

    /// Returns the number of nodes the state was built for.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.pred.len()
    }

    /// Atomically marks `node` as visited.
    ///
    /// Returns true only for the caller that actually changed the state of
    /// the node; every other call, concurrent or later, returns false.
    #[inline(always)]
    pub fn try_claim(&self, node: usize) -> bool {
        if self.visited.swap(node, true, Ordering::AcqRel) {
            return false;
        }
        self.num_claimed.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Returns whether `node` has already been claimed.
    #[inline(always)]
    pub fn is_claimed(&self, node: usize) -> bool {
        self.visited.get(node, Ordering::Acquire)
    }

    /// Returns the number of claimed nodes.
    pub fn num_claimed(&self) -> usize {
        self.num_claimed.load(Ordering::Relaxed)
    }

    /// Records `from` as the predecessor of `node`, unless a predecessor has
    /// already been recorded.
    ///
    /// Returns whether this call set the predecessor.
    #[inline(always)]
    pub fn record_predecessor(&self, node: usize, from: usize) -> bool {
        self.pred[node]
            .compare_exchange(NO_PRED, from, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns the predecessor of `node`, if it has been recorded.
    #[inline(always)]
    pub fn predecessor(&self, node: usize) -> Option<usize> {
        match self.pred[node].load(Ordering::Acquire) {
            NO_PRED => None,
            pred => Some(pred),
        }
    }

    /// Raises the goal flag.
    ///
    /// Returns true only for the first caller.
    pub fn mark_goal_found(&self) -> bool {
        !self.goal_found.swap(true, Ordering::AcqRel)
    }

    /// Returns whether some task has found a goal.
    #[inline(always)]
    pub fn is_goal_found(&self) -> bool {
        self.goal_found.load(Ordering::Acquire)
    }

    pub(crate) fn task_started(&self) {
        self.num_tasks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fork_point(&self) {
        self.num_forks.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of tasks run so far, including the root task.
    pub fn num_tasks(&self) -> usize {
        self.num_tasks.load(Ordering::Relaxed)
    }

    /// Returns the number of fork points met so far.
    pub fn num_forks(&self) -> usize {
        self.num_forks.load(Ordering::Relaxed)
    }
}
