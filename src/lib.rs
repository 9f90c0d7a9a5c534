/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod utils;

/// Module exposing all traits in a single level.
pub mod traits {
    use super::*;
    pub use algo::traits::*;
}

/// Use `use maze_solver::prelude::*;` to import common utilities, modules and
/// all traits.
pub mod prelude {
    use super::*;
    pub use algo::fork_join;
    pub use algo::fork_join::{ForkJoin, Path, Search, SolveError, Stats};
    pub use algo::maze::GraphMaze;
    pub use traits::*;
}
