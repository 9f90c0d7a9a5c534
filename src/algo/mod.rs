/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Module containing all search algorithms on mazes.

pub mod fork_join;

pub mod maze;

/// Traits used to interact with the implemented algorithms.
pub mod traits {
    use super::*;

    pub use maze::Maze;
}
