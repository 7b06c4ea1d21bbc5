//! The guard's patrol protocol: turn right when blocked, otherwise step forward.
//!
//! Two modes share the same [`tick`]. [`walk_path`] traces the guard until she
//! leaves the map and only records positions. [`detect_loop`] records every
//! `(position, orientation)` state and stops at the first repeat, which makes it
//! the only mode that is safe on a grid that might trap her.

use std::fmt;

use bitvec::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::error::{PatrolError, Result};
use crate::grid::{Position, Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {Up, Right, Down, Left}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Orientation::Up, Orientation::Right, Orientation::Down, Orientation::Left];

    pub fn turn_right(self) -> Self {
        match self {
            Orientation::Up => Orientation::Right, Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left, Orientation::Left => Orientation::Up,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Orientation::Up => (-1, 0), Orientation::Right => (0, 1),
            Orientation::Down => (1, 0), Orientation::Left => (0, -1),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Orientation::Up => '^', Orientation::Right => '>',
            Orientation::Down => 'v', Orientation::Left => '<',
        }
    }

    pub fn from_glyph(glyph: char) -> Result<Self> {
        Ok(match glyph {
            '^' => Orientation::Up, '>' => Orientation::Right,
            'v' => Orientation::Down, '<' => Orientation::Left,
            other => return Err(PatrolError::InvalidOrientation(other)),
        })
    }
}

impl TryFrom<char> for Orientation {
    type Error = PatrolError;
    fn try_from(glyph: char) -> Result<Self> {Orientation::from_glyph(glyph)}
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {write!(f, "{}", self.glyph())}
}

/// Where the guard stands and which way she faces. Two equal states always
/// lead to the same future, so a repeated state means a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentState {
    pub position: Position,
    pub orientation: Orientation,
}

impl AgentState {
    pub fn new(x: usize, y: usize, orientation: Orientation) -> Self {
        AgentState {position: Position::new(x, y), orientation}
    }

    fn index(self, cols: usize) -> usize {
        (self.position.x * cols + self.position.y) * 4 + self.orientation as usize
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {write!(f, "{}{}", self.position, self.orientation)}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Exited,
    Turned(AgentState),
    Moved(AgentState),
}

impl Tick {
    pub fn state(self) -> Option<AgentState> {
        match self {
            Tick::Exited => None,
            Tick::Turned(state) | Tick::Moved(state) => Some(state),
        }
    }
}

/// Either turn or move, never both.
pub fn tick<T: Terrain + ?Sized>(terrain: &T, state: AgentState) -> Tick {
    let Some(next) = terrain.step(state.position, state.orientation) else {return Tick::Exited};
    if terrain.blocked(next) {
        Tick::Turned(AgentState {orientation: state.orientation.turn_right(), ..state})
    } else {
        Tick::Moved(AgentState {position: next, ..state})
    }
}

/// Number of distinct states on the terrain. A walk that has not exited after
/// this many ticks has repeated a state.
pub fn state_space<T: Terrain + ?Sized>(terrain: &T) -> usize {
    let (rows, cols) = terrain.dimensions();
    4 * rows * cols
}

fn check_start<T: Terrain + ?Sized>(terrain: &T, start: AgentState) -> Result<()> {
    if terrain.contains(start.position) {return Ok(())}
    let (rows, cols) = terrain.dimensions();
    Err(PatrolError::OutOfRange {x: start.position.x, y: start.position.y, rows, cols})
}

/// Mode A: every position the guard stands on before leaving the map,
/// including `start`.
///
/// Fails with [`PatrolError::NonTerminating`] if the guard is still on the map
/// after [`state_space`] ticks; use [`detect_loop`] on grids that may trap her.
pub fn walk_path<T: Terrain + ?Sized>(terrain: &T, start: AgentState) -> Result<FxHashSet<Position>> {
    check_start(terrain, start)?;
    let bound = state_space(terrain);
    let mut positions = FxHashSet::default();
    positions.insert(start.position);
    let mut state = start;
    for ticks in 1 ..= bound {
        match tick(terrain, state) {
            Tick::Exited => {
                debug!(ticks, visited = positions.len(), "guard left the map");
                return Ok(positions);
            }
            Tick::Turned(next) => state = next,
            Tick::Moved(next) => {
                positions.insert(next.position);
                state = next;
            }
        }
    }
    Err(PatrolError::NonTerminating {ticks: bound})
}

/// Like [`walk_path`], but keeps every state in order, starting with `start`
/// and ending with the state from which the guard steps off the map.
pub fn walk_route<T: Terrain + ?Sized>(terrain: &T, start: AgentState) -> Result<Vec<AgentState>> {
    check_start(terrain, start)?;
    let bound = state_space(terrain);
    let mut route = vec![start];
    for _ in 0 .. bound {
        let Some(next) = tick(terrain, route[route.len() - 1]).state() else {return Ok(route)};
        route.push(next);
    }
    Err(PatrolError::NonTerminating {ticks: bound})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited {ticks: usize},
    /// `state` is the first state seen twice.
    Looped {state: AgentState, ticks: usize},
}

impl Outcome {
    pub fn is_loop(self) -> bool {matches!(self, Outcome::Looped {..})}

    pub fn ticks(self) -> usize {
        match self {Outcome::Exited {ticks} | Outcome::Looped {ticks, ..} => ticks}
    }
}

/// Mode B, with details. Every post-tick state (turns included) is checked
/// against the states recorded so far, seeded with `start`. A guard starting
/// off the map has already exited.
pub fn simulate<T: Terrain + ?Sized>(terrain: &T, start: AgentState) -> Outcome {
    if !terrain.contains(start.position) {return Outcome::Exited {ticks: 0}}
    let (_, cols) = terrain.dimensions();
    let mut seen = bitvec![0; state_space(terrain)];
    seen.set(start.index(cols), true);
    let mut state = start;
    let mut ticks = 0;
    loop {
        ticks += 1;
        state = match tick(terrain, state) {
            Tick::Exited => return Outcome::Exited {ticks},
            Tick::Turned(next) | Tick::Moved(next) => next,
        };
        if seen.replace(state.index(cols), true) {
            trace!(%state, ticks, "state repeated");
            return Outcome::Looped {state, ticks};
        }
    }
}

/// Mode B: does the guard starting at `start` patrol forever?
pub fn detect_loop<T: Terrain + ?Sized>(terrain: &T, start: AgentState) -> bool {
    simulate(terrain, start).is_loop()
}
