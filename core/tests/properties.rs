use std::collections::{HashSet, VecDeque};

use maze_core::{CellTag, Direction, GridCoordinate, Maze, MazeConfig, MazeParams};
use proptest::prelude::*;

fn params() -> impl Strategy<Value = MazeParams> {
    (3usize..=20, 3usize..=20, 1u8..=10, "[a-zA-Z0-9]{3,16}").prop_map(
        |(height, width, challenge, seed)| MazeParams::new(height, width, challenge, "Prop", seed),
    )
}

fn build(params: &MazeParams) -> Maze {
    Maze::build(&MazeConfig::default(), params).expect("valid parameters")
}

/// Serialized form minus the generation timestamp.
fn fingerprint(maze: &Maze) -> serde_json::Value {
    let mut value = serde_json::to_value(maze).unwrap();
    value.as_object_mut().unwrap().remove("lastUpdated");
    value
}

/// Neighbors reachable from `pos` through real (mirrored) exits.
fn passages(maze: &Maze, pos: GridCoordinate) -> Vec<GridCoordinate> {
    let cell = maze.cell(pos).unwrap();
    cell.open_directions()
        .into_iter()
        .map(|dir| dir.step(pos))
        .filter(|next| maze.grid().contains(*next))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn identical_inputs_give_identical_mazes(params in params()) {
        let a = build(&params);
        let b = build(&params);
        prop_assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn every_cell_is_reachable(params in params()) {
        let maze = build(&params);
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([maze.start_cell()]);
        seen.insert(maze.start_cell());
        while let Some(pos) = queue.pop_front() {
            for next in passages(&maze, pos) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        prop_assert_eq!(seen.len(), params.height * params.width);
    }

    #[test]
    fn exits_are_symmetric(params in params()) {
        let maze = build(&params);
        for cell in maze.grid().cells() {
            for dir in cell.open_directions() {
                let next = dir.step(cell.pos());
                if maze.grid().contains(next) {
                    let neighbor = maze.cell(next).unwrap();
                    prop_assert!(neighbor.is_open(dir.opposite()));
                } else {
                    // only the two doors go through the boundary
                    let door = (cell.has_tag(CellTag::START) && dir == Direction::NORTH)
                        || (cell.has_tag(CellTag::FINISH) && dir == Direction::SOUTH);
                    prop_assert!(door, "stray boundary exit {} at {}", dir, cell.pos());
                }
            }
        }
    }

    #[test]
    fn path_is_a_connected_chain(params in params()) {
        let maze = build(&params);
        let on_path: HashSet<GridCoordinate> = maze
            .grid()
            .cells()
            .filter(|c| c.has_tag(CellTag::PATH))
            .map(|c| c.pos())
            .collect();
        prop_assert_eq!(on_path.len(), maze.shortest_path_length());
        prop_assert!(on_path.contains(&maze.start_cell()));
        prop_assert!(on_path.contains(&maze.finish_cell()));

        // walk the chain from START; a perfect maze gives exactly one way on
        let mut walked = vec![maze.start_cell()];
        let mut prev: Option<GridCoordinate> = None;
        let mut pos = maze.start_cell();
        while pos != maze.finish_cell() {
            let onward: Vec<_> = passages(&maze, pos)
                .into_iter()
                .filter(|next| on_path.contains(next) && Some(*next) != prev)
                .collect();
            prop_assert_eq!(onward.len(), 1);
            prev = Some(pos);
            pos = onward[0];
            walked.push(pos);
        }
        prop_assert_eq!(walked.len(), on_path.len());
    }

    #[test]
    fn traps_follow_placement_rules(params in params()) {
        let config = MazeConfig::default();
        let maze = build(&params);
        let trapped: Vec<_> = maze.grid().cells().filter(|c| !c.trap().is_none()).collect();
        prop_assert_eq!(trapped.len(), maze.trap_count());
        if params.challenge < config.traps_min_challenge {
            prop_assert_eq!(maze.trap_count(), 0);
        }

        for cell in trapped {
            prop_assert!(!cell.tags().intersects(CellTag::START | CellTag::FINISH));
            let exits = cell.exits();
            prop_assert!(
                exits.contains(Direction::NORTH | Direction::SOUTH)
                    || exits.contains(Direction::EAST | Direction::WEST)
            );
            if cell.has_tag(CellTag::PATH) {
                prop_assert!(params.challenge >= config.traps_on_path_min_challenge);
            }
            for next in passages(&maze, cell.pos()) {
                prop_assert!(maze.cell(next).unwrap().trap().is_none());
            }
        }
    }

    #[test]
    fn serialization_round_trips(params in params()) {
        let maze = build(&params);
        let json = maze.to_json().unwrap();
        let restored = Maze::from_json(&json).unwrap();
        prop_assert_eq!(restored.to_json().unwrap(), json);
    }
}

#[test]
fn low_challenge_has_no_traps() {
    let maze = build(&MazeParams::new(20, 20, 1, "Calm", "no-traps-here"));
    assert_eq!(maze.trap_count(), 0);
}

#[test]
fn largest_maze_generates() {
    let config = MazeConfig::default();
    let maze = build(&MazeParams::new(
        config.max_height,
        config.max_width,
        10,
        "Biggest",
        "upper-bound",
    ));
    assert!(maze
        .grid()
        .cells()
        .all(|c| c.has_tag(CellTag::CARVED)));
    assert!(maze.shortest_path_length() >= config.max_height);
}
