/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{ensure, Context, Result};
use dsi_progress_logger::prelude::*;
use maze_solver::prelude::*;
use maze_solver::threads;
use webgraph::prelude::BvGraph;

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let mut args = std::env::args().skip(1);
    let basename = args
        .next()
        .context("Usage: maze-solver BASENAME START GOAL...")?;
    let start: usize = args
        .next()
        .context("No start node provided")?
        .parse()
        .context("Expected an integer start node")?;
    let goals = args
        .map(|arg| arg.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .context("Expected integer goal nodes")?;
    ensure!(!goals.is_empty(), "No goal node provided");

    let graph = BvGraph::with_basename(&basename)
        .load()
        .with_context(|| format!("Cannot load graph {}", basename))?;
    let maze = GraphMaze::new(&graph, start, |node| goals.contains(&node));

    let mut main_pl = progress_logger![display_memory = true];
    let path = ForkJoin::new(&maze)
        .solve(&threads![], &mut main_pl)
        .with_context(|| format!("Search from node {} failed", start))?;

    match path {
        Some(path) => {
            let nodes = path
                .iter()
                .map(|node| node.to_string())
                .collect::<Vec<_>>();
            println!("{}", nodes.join(" "));
        }
        None => main_pl.info(format_args!("No goal is reachable from node {}", start)),
    }

    Ok(())
}
