//! In-memory maze fixtures implementing the oracle contract.
//!
//! Downstream crates enable the `oracle_scaffolding` feature in their dev
//! dependencies to drive the exploration systems against known mazes without
//! a network. The fixture counts every request it serves so tests can assert
//! exactly how many round trips an operation cost.

use std::cell::RefCell;

use maze_scout_core::{
    CellCoord, CellState, GameState, GridSize, Heading, MoveOutcome, Oracle, OracleError,
    SessionToken, StatusReport,
};

/// Ground-truth description of a single fixture level.
#[derive(Clone, Debug)]
pub struct FixtureLevel {
    size: GridSize,
    start: CellCoord,
    cells: Vec<CellState>,
}

impl FixtureLevel {
    /// Parses a level from rows of `S` (start), `.` (open), `#` (wall) and
    /// `G` (goal) characters.
    ///
    /// Panics on ragged rows, unknown characters or a missing/duplicate
    /// start marker; fixtures are authored by hand in tests and a malformed
    /// grid is a bug in the test itself.
    #[must_use]
    pub fn parse(rows: &[&str]) -> Self {
        let height = u32::try_from(rows.len()).expect("fixture height fits u32");
        assert!(height > 0, "fixture level needs at least one row");
        let width = u32::try_from(rows[0].len()).expect("fixture width fits u32");
        assert!(width > 0, "fixture level needs at least one column");

        let mut cells = Vec::with_capacity(rows.len() * rows[0].len());
        let mut start = None;
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                rows[0].len(),
                "fixture rows must all share one width"
            );
            for (x, glyph) in row.chars().enumerate() {
                let state = match glyph {
                    '.' => CellState::Open,
                    '#' => CellState::Wall,
                    'G' => CellState::Goal,
                    'S' => {
                        let cell = CellCoord::new(
                            u32::try_from(x).expect("fixture x fits u32"),
                            u32::try_from(y).expect("fixture y fits u32"),
                        );
                        assert!(start.is_none(), "fixture level has two start markers");
                        start = Some(cell);
                        CellState::Open
                    }
                    other => panic!("unknown fixture glyph {other:?}"),
                };
                cells.push(state);
            }
        }

        Self {
            size: GridSize::new(width, height),
            start: start.expect("fixture level is missing a start marker"),
            cells,
        }
    }

    /// Dimensions of the level.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Cell the agent occupies when the level begins.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    fn state(&self, cell: CellCoord) -> CellState {
        let x = usize::try_from(cell.x()).expect("fixture x fits usize");
        let y = usize::try_from(cell.y()).expect("fixture y fits usize");
        let width = usize::try_from(self.size.width()).expect("fixture width fits usize");
        self.cells[y * width + x]
    }
}

#[derive(Debug)]
struct FixtureCursor {
    level: usize,
    position: CellCoord,
    levels_completed: u32,
    game_state: GameState,
    move_calls: u32,
    status_calls: u32,
}

/// In-memory multi-level maze serving the [`Oracle`] contract.
///
/// Stepping onto a goal advances the session to the next level, or marks the
/// game finished after the last one, mirroring the remote service. Interior
/// mutability keeps the trait surface identical to a real remote client: the
/// caller holds an immutable handle while the ground truth mutates behind it.
#[derive(Debug)]
pub struct FixtureMaze {
    levels: Vec<FixtureLevel>,
    cursor: RefCell<FixtureCursor>,
}

impl FixtureMaze {
    /// Creates a fixture session over the provided levels.
    #[must_use]
    pub fn new(levels: Vec<FixtureLevel>) -> Self {
        let first = levels.first().expect("fixture maze needs at least one level");
        let cursor = FixtureCursor {
            level: 0,
            position: first.start(),
            levels_completed: 0,
            game_state: GameState::Playing,
            move_calls: 0,
            status_calls: 0,
        };
        Self {
            levels,
            cursor: RefCell::new(cursor),
        }
    }

    /// Creates a fixture session holding a single parsed level.
    #[must_use]
    pub fn single_level(rows: &[&str]) -> Self {
        Self::new(vec![FixtureLevel::parse(rows)])
    }

    /// Number of move requests served so far.
    #[must_use]
    pub fn move_calls(&self) -> u32 {
        self.cursor.borrow().move_calls
    }

    /// Number of status requests served so far.
    #[must_use]
    pub fn status_calls(&self) -> u32 {
        self.cursor.borrow().status_calls
    }

    /// Ground-truth position of the agent.
    #[must_use]
    pub fn position(&self) -> CellCoord {
        self.cursor.borrow().position
    }

    /// Forces the session into the provided lifecycle state.
    pub fn set_game_state(&self, state: GameState) {
        self.cursor.borrow_mut().game_state = state;
    }
}

impl Oracle for FixtureMaze {
    fn status(&self, _session: &SessionToken) -> Result<StatusReport, OracleError> {
        let mut cursor = self.cursor.borrow_mut();
        cursor.status_calls += 1;
        let level = &self.levels[cursor.level];
        Ok(StatusReport {
            game_state: cursor.game_state,
            location: Some(cursor.position),
            maze_size: Some(level.size()),
            levels_completed: cursor.levels_completed,
            total_levels: u32::try_from(self.levels.len()).expect("level count fits u32"),
        })
    }

    fn attempt_move(
        &self,
        _session: &SessionToken,
        heading: Heading,
    ) -> Result<MoveOutcome, OracleError> {
        let mut cursor = self.cursor.borrow_mut();
        cursor.move_calls += 1;

        if cursor.game_state != GameState::Playing {
            return Err(OracleError::Transport {
                reason: "move submitted outside of play".to_owned(),
            });
        }

        let level = &self.levels[cursor.level];
        let Some(target) = cursor.position.step(heading) else {
            return Ok(MoveOutcome::OutOfBounds);
        };
        if !level.size().contains(target) {
            return Ok(MoveOutcome::OutOfBounds);
        }

        match level.state(target) {
            CellState::Wall => Ok(MoveOutcome::Wall),
            CellState::Goal => {
                cursor.levels_completed += 1;
                if let Some(next) = self.levels.get(cursor.level + 1) {
                    cursor.level += 1;
                    cursor.position = next.start();
                } else {
                    cursor.game_state = GameState::Finished;
                    cursor.position = target;
                }
                Ok(MoveOutcome::Goal)
            }
            CellState::Fog | CellState::Open => {
                cursor.position = target;
                Ok(MoveOutcome::Success)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FixtureLevel, FixtureMaze};
    use maze_scout_core::{
        CellCoord, GameState, GridSize, Heading, MoveOutcome, Oracle, SessionToken,
    };

    fn token() -> SessionToken {
        SessionToken::new("fixture")
    }

    #[test]
    fn parse_reads_dimensions_start_and_walls() {
        let level = FixtureLevel::parse(&[
            "S#", //
            ".G",
        ]);

        assert_eq!(level.size(), GridSize::new(2, 2));
        assert_eq!(level.start(), CellCoord::new(0, 0));
    }

    #[test]
    fn moves_walk_the_grid_and_count_requests() {
        let maze = FixtureMaze::single_level(&[
            "S#", //
            ".G",
        ]);

        assert_eq!(
            maze.attempt_move(&token(), Heading::Right).expect("move"),
            MoveOutcome::Wall
        );
        assert_eq!(
            maze.attempt_move(&token(), Heading::Up).expect("move"),
            MoveOutcome::OutOfBounds
        );
        assert_eq!(
            maze.attempt_move(&token(), Heading::Down).expect("move"),
            MoveOutcome::Success
        );
        assert_eq!(maze.position(), CellCoord::new(0, 1));
        assert_eq!(maze.move_calls(), 3);
    }

    #[test]
    fn reaching_the_goal_advances_the_session() {
        let maze = FixtureMaze::new(vec![
            FixtureLevel::parse(&["SG"]),
            FixtureLevel::parse(&["GS"]),
        ]);

        assert_eq!(
            maze.attempt_move(&token(), Heading::Right).expect("move"),
            MoveOutcome::Goal
        );
        let status = maze.status(&token()).expect("status");
        assert_eq!(status.levels_completed, 1);
        assert_eq!(status.game_state, GameState::Playing);
        assert_eq!(status.location, Some(CellCoord::new(1, 0)));

        assert_eq!(
            maze.attempt_move(&token(), Heading::Left).expect("move"),
            MoveOutcome::Goal
        );
        let status = maze.status(&token()).expect("status");
        assert_eq!(status.levels_completed, 2);
        assert_eq!(status.game_state, GameState::Finished);
    }
}
