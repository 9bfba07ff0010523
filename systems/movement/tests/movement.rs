use maze_scout_core::{CellCoord, CellState, Heading, MoveOutcome, Oracle, SessionToken};
use maze_scout_system_movement::MoveExecutor;
use maze_scout_world::scaffolding::FixtureMaze;
use maze_scout_world::{PositionTracker, WorldModel};

fn token() -> SessionToken {
    SessionToken::new("fixture")
}

fn level_state(maze: &FixtureMaze) -> (WorldModel, PositionTracker) {
    let status = maze.status(&token()).expect("fixture status");
    let size = status.maze_size.expect("fixture reports a maze size");
    let location = status.location.expect("fixture reports a location");
    (WorldModel::new(size, location), PositionTracker::new(location))
}

#[test]
fn successful_move_advances_and_marks_the_target_open() {
    let maze = FixtureMaze::single_level(&["S.."]);
    let (mut world, mut tracker) = level_state(&maze);
    let session = token();
    let mut executor = MoveExecutor::new(&maze, &session, &mut world, &mut tracker);

    let outcome = executor.attempt(Heading::Right).expect("move resolves");

    assert_eq!(outcome, MoveOutcome::Success);
    assert_eq!(executor.position(), CellCoord::new(1, 0));
    assert_eq!(world.state(CellCoord::new(1, 0)), Some(CellState::Open));
}

#[test]
fn recorded_wall_is_served_without_another_round_trip() {
    let maze = FixtureMaze::single_level(&["S#"]);
    let (mut world, mut tracker) = level_state(&maze);
    let session = token();
    let mut executor = MoveExecutor::new(&maze, &session, &mut world, &mut tracker);

    assert_eq!(
        executor.attempt(Heading::Right).expect("move resolves"),
        MoveOutcome::Wall
    );
    assert_eq!(maze.move_calls(), 1);
    assert_eq!(executor.position(), CellCoord::new(0, 0));

    // Second approach toward the same wall resolves from the cache.
    assert_eq!(
        executor.attempt(Heading::Right).expect("move resolves"),
        MoveOutcome::Wall
    );
    assert_eq!(maze.move_calls(), 1);
    assert_eq!(world.state(CellCoord::new(1, 0)), Some(CellState::Wall));
}

#[test]
fn grid_edges_resolve_locally_without_mutation() {
    let maze = FixtureMaze::single_level(&["S."]);
    let (mut world, mut tracker) = level_state(&maze);
    let session = token();
    let mut executor = MoveExecutor::new(&maze, &session, &mut world, &mut tracker);

    assert_eq!(
        executor.attempt(Heading::Up).expect("move resolves"),
        MoveOutcome::OutOfBounds
    );
    assert_eq!(
        executor.attempt(Heading::Down).expect("move resolves"),
        MoveOutcome::OutOfBounds
    );
    assert_eq!(
        executor.attempt(Heading::Left).expect("move resolves"),
        MoveOutcome::OutOfBounds
    );

    assert_eq!(maze.move_calls(), 0);
    assert_eq!(executor.position(), CellCoord::new(0, 0));
    assert_eq!(world.state(CellCoord::new(0, 0)), Some(CellState::Open));
    assert_eq!(world.state(CellCoord::new(1, 0)), Some(CellState::Fog));
}

#[test]
fn goal_move_marks_the_target_and_advances() {
    let maze = FixtureMaze::single_level(&["SG"]);
    let (mut world, mut tracker) = level_state(&maze);
    let session = token();
    let mut executor = MoveExecutor::new(&maze, &session, &mut world, &mut tracker);

    let outcome = executor.attempt(Heading::Right).expect("move resolves");

    assert_eq!(outcome, MoveOutcome::Goal);
    assert_eq!(executor.position(), CellCoord::new(1, 0));
    assert_eq!(world.state(CellCoord::new(1, 0)), Some(CellState::Goal));
}

#[test]
fn open_cells_still_cost_a_round_trip() {
    // Only immutable facts short-circuit the oracle: re-entering a known open
    // cell changes remote state, so it must be played out remotely.
    let maze = FixtureMaze::single_level(&["S.."]);
    let (mut world, mut tracker) = level_state(&maze);
    let session = token();
    let mut executor = MoveExecutor::new(&maze, &session, &mut world, &mut tracker);

    assert_eq!(
        executor.attempt(Heading::Right).expect("move resolves"),
        MoveOutcome::Success
    );
    assert_eq!(
        executor.attempt(Heading::Left).expect("move resolves"),
        MoveOutcome::Success
    );
    assert_eq!(
        executor.attempt(Heading::Right).expect("move resolves"),
        MoveOutcome::Success
    );
    assert_eq!(maze.move_calls(), 3);
}
