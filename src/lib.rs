//! A lab guard patrols a grid, turning right whenever something blocks her.
//!
//! [`guard`] traces her route and detects loops, [`search`] finds the cells
//! where one extra obstacle would keep her patrolling forever.

pub mod error;
pub mod grid;
pub mod guard;
pub mod logging;
pub mod parse;
pub mod search;

pub use error::PatrolError;
pub use grid::{Grid, Overlay, Position, Terrain, Toggled};
pub use guard::{detect_loop, simulate, tick, walk_path, walk_route, AgentState, Orientation, Outcome, Tick};
pub use parse::{load_map, parse_map, PatrolMap};
pub use search::{count_loop_inducing_positions, loop_inducing_positions, Strategy};
