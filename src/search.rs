//! Where could one extra obstacle trap the guard in a loop?
//!
//! Only cells on the unobstructed route can change anything, and the guard's
//! own starting cell is off limits.

use clap::ValueEnum;
use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::grid::{Grid, Overlay, Position};
use crate::guard::{detect_loop, walk_path, walk_route, AgentState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Re-run the whole patrol from the start for every candidate.
    #[default]
    Restart,
    /// Re-run from the state just before the guard would first enter the candidate.
    Resume,
    /// Like `Restart`, spread across threads.
    Parallel,
}

/// Cells on the baseline route where a new obstacle makes the guard loop,
/// in row-major order.
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn loop_inducing_positions(grid: &Grid, start: AgentState, strategy: Strategy) -> Result<Vec<Position>> {
    let found = match strategy {
        Strategy::Restart => restart(grid, start, candidates(grid, start)?)?,
        Strategy::Resume => resume(grid, start)?,
        Strategy::Parallel => parallel(grid, start, candidates(grid, start)?)?,
    };
    debug!(found = found.len(), "obstruction search done");
    Ok(found)
}

pub fn count_loop_inducing_positions(grid: &Grid, start: AgentState) -> Result<usize> {
    Ok(loop_inducing_positions(grid, start, Strategy::default())?.len())
}

fn candidates(grid: &Grid, start: AgentState) -> Result<Vec<Position>> {
    let candidates = walk_path(grid, start)?.into_iter()
        .filter(|&pos| pos != start.position)
        .sorted_unstable()
        .collect::<Vec<_>>();
    debug!(candidates = candidates.len(), "baseline walked");
    Ok(candidates)
}

fn restart(grid: &Grid, start: AgentState, candidates: Vec<Position>) -> Result<Vec<Position>> {
    let mut scratch = grid.clone();
    let mut found = vec![];
    for pos in candidates {
        let hypothesis = scratch.toggled(pos)?;
        if detect_loop(&hypothesis, start) {found.push(pos)}
    }
    Ok(found)
}

/// Up to the first time the guard faces a free cell, her route does not
/// depend on whether that cell is blocked, so the loop check can pick up from
/// there instead of replaying the prefix.
fn resume(grid: &Grid, start: AgentState) -> Result<Vec<Position>> {
    let route = walk_route(grid, start)?;
    let mut scratch = grid.clone();
    let mut tried = FxHashSet::default();
    tried.insert(start.position);
    let mut found = vec![];
    for (before, after) in route.iter().tuple_windows() {
        if before.position == after.position || !tried.insert(after.position) {continue}
        let hypothesis = scratch.toggled(after.position)?;
        if detect_loop(&hypothesis, *before) {found.push(after.position)}
    }
    found.sort_unstable();
    Ok(found)
}

fn parallel(grid: &Grid, start: AgentState, candidates: Vec<Position>) -> Result<Vec<Position>> {
    let mut found = candidates.into_par_iter()
        .map(|pos| -> Result<Option<Position>> {Ok(detect_loop(&Overlay::new(grid, pos)?, start).then_some(pos))})
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    found.sort_unstable();
    Ok(found)
}
