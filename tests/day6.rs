use std::io::Write;

use rustc_hash::FxHashSet;

use patrol::guard::state_space;
use patrol::*;

const EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

fn example() -> PatrolMap {
    parse_map(EXAMPLE).unwrap()
}

#[test]
fn example_start() {
    let map = example();
    assert_eq!(map.start, AgentState::new(6, 4, Orientation::Up));
    assert_eq!((map.grid.rows(), map.grid.cols()), (10, 10));
    assert_eq!(map.grid.obstacle_count(), 8);
}

#[test]
fn example_visits_41_cells() {
    let map = example();
    assert_eq!(walk_path(&map.grid, map.start).unwrap().len(), 41);
}

#[test]
fn example_has_6_traps() {
    let map = example();
    assert_eq!(count_loop_inducing_positions(&map.grid, map.start), Ok(6));
    let expected = [(6, 3), (7, 6), (7, 7), (8, 1), (8, 3), (9, 7)].map(Position::from).to_vec();
    for strategy in [Strategy::Restart, Strategy::Resume, Strategy::Parallel] {
        assert_eq!(loop_inducing_positions(&map.grid, map.start, strategy).unwrap(), expected, "{:?}", strategy);
    }
}

#[test]
fn runs_are_deterministic() {
    let map = example();
    let first = walk_path(&map.grid, map.start).unwrap();
    let trapped = map.grid.with_obstacle_toggled(Position::new(6, 3)).unwrap();
    for _ in 0 .. 3 {
        assert_eq!(walk_path(&map.grid, map.start).unwrap(), first);
        assert_eq!(simulate(&trapped, map.start), simulate(&trapped, map.start));
        assert!(detect_loop(&trapped, map.start));
        assert!(!detect_loop(&map.grid, map.start));
    }
}

#[test]
fn every_hypothesis_halts_within_state_space() {
    let map = example();
    let bound = state_space(&map.grid);
    for x in 0 .. map.grid.rows() {
        for y in 0 .. map.grid.cols() {
            let pos = Position::new(x, y);
            if pos == map.start.position {continue}
            let overlay = Overlay::new(&map.grid, pos).unwrap();
            assert!(simulate(&overlay, map.start).ticks() <= bound, "{}", pos);
        }
    }
}

#[test]
fn visited_set_only_grows() {
    let map = example();
    let route = walk_route(&map.grid, map.start).unwrap();
    let mut seen = FxHashSet::default();
    let mut last = 0;
    for state in &route {
        seen.insert(state.position);
        assert!(seen.len() >= last);
        last = seen.len();
    }
    assert_eq!(seen, walk_path(&map.grid, map.start).unwrap());
    assert!(seen.len() <= map.grid.rows() * map.grid.cols());
}

#[test]
fn overlay_and_toggle_agree() {
    let map = example();
    let mut scratch = map.grid.clone();
    for pos in [(6, 3), (1, 4), (9, 7)].map(Position::from) {
        let copied = map.grid.with_obstacle_toggled(pos).unwrap();
        let overlay = Overlay::new(&map.grid, pos).unwrap();
        let toggled = scratch.toggled(pos).unwrap();
        assert_eq!(simulate(&copied, map.start), simulate(&overlay, map.start));
        assert_eq!(simulate(&copied, map.start), simulate(&toggled, map.start));
    }
    assert_eq!(scratch, map.grid);
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();
    assert_eq!(load_map(file.path()).unwrap(), example());
}

#[test]
fn load_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("day6.in");
    let err = load_map(&missing).unwrap_err();
    assert!(err.to_string().contains("day6.in"));

    let bad = dir.path().join("bad.in");
    std::fs::write(&bad, "...\n.?.\n").unwrap();
    let err = load_map(&bad).unwrap_err();
    assert_eq!(err.downcast_ref::<PatrolError>(), Some(&PatrolError::InvalidOrientation('?')));
}
