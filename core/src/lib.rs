#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Scout crates.
//!
//! This crate defines the vocabulary that connects the local world model, the
//! systems that drive blind exploration, and the adapters that talk to the
//! remote maze service. The service is the sole holder of ground truth: the
//! agent only ever learns about the maze through the [`Oracle`] trait defined
//! here, one probed step at a time.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Scout.";

/// Location of a single maze cell expressed as x and y coordinates.
///
/// The x axis increases rightward and the y axis increases downward, so
/// [`Heading::Up`] decreases y and [`Heading::Right`] increases x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Translates the coordinate one cell along the provided heading.
    ///
    /// Returns `None` when the translation leaves the coordinate space, which
    /// callers treat as an out-of-bounds move that never needs a remote call.
    #[must_use]
    pub fn step(self, heading: Heading) -> Option<CellCoord> {
        match heading {
            Heading::Up => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Heading::Down => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Heading::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
            Heading::Right => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of a maze level measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cell columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cell rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the provided coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.width && cell.y() < self.height
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width.checked_mul(height).unwrap_or(usize::MAX)
    }
}

/// Cardinal headings the agent may probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Heading {
    /// Movement toward decreasing y coordinates.
    Up,
    /// Movement toward increasing y coordinates.
    Down,
    /// Movement toward decreasing x coordinates.
    Left,
    /// Movement toward increasing x coordinates.
    Right,
}

impl Heading {
    /// Heading reached by a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Heading {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Heading reached by a quarter turn counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Heading {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    /// Heading pointing in the exact opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Knowledge the agent holds about a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Nothing is known about the cell yet.
    Fog,
    /// The cell was entered successfully at least once.
    Open,
    /// The service rejected a move into the cell.
    Wall,
    /// The cell holds the level goal.
    Goal,
}

/// Outcome of a single attempted step, as reported by the maze service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveOutcome {
    /// The agent advanced into the target cell.
    Success,
    /// The target cell is a wall; the agent did not move.
    Wall,
    /// The target cell lies outside the maze; the agent did not move.
    OutOfBounds,
    /// The agent stepped onto the level goal.
    #[serde(rename = "END")]
    Goal,
}

/// Lifecycle state of the remote game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// A level is active and accepting moves.
    Playing,
    /// Every level was completed.
    Finished,
    /// The session ended without completing every level.
    GameOver,
    /// No game is associated with the session.
    None,
}

/// Opaque session credential issued by the maze service.
///
/// The token is threaded explicitly through every oracle call rather than
/// being baked into ambient client state, so one client value can serve any
/// number of sessions without hidden coupling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string issued by the service.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for embedding into requests.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Consolidated snapshot of the remote session state.
///
/// Fields that change together are fetched together, so callers never mix
/// values read at two different moments of a mutating remote game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReport {
    /// Lifecycle state of the session.
    pub game_state: GameState,
    /// Agent location reported by the service, absent outside of play.
    pub location: Option<CellCoord>,
    /// Dimensions of the current level, absent outside of play.
    pub maze_size: Option<GridSize>,
    /// Number of levels completed so far.
    pub levels_completed: u32,
    /// Total number of levels in the session.
    pub total_levels: u32,
}

/// Ground-truth holder for the maze, reached over some transport.
///
/// Implementations serve one request at a time. A status read is
/// side-effect-free and may be repeated; a move attempt mutates remote state
/// and must never be reissued blindly after a transport failure.
pub trait Oracle {
    /// Fetches the consolidated session status.
    fn status(&self, session: &SessionToken) -> Result<StatusReport, OracleError>;

    /// Attempts to move one step along the provided heading.
    fn attempt_move(
        &self,
        session: &SessionToken,
        heading: Heading,
    ) -> Result<MoveOutcome, OracleError>;
}

/// Errors surfaced while talking to the maze service.
///
/// Both variants are fatal for the current run: the client trusts the service
/// as ground truth and has no partial-failure recovery path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The service rejected the provided identity.
    #[error("identity rejected by the maze service: {reason}")]
    Auth {
        /// Service-provided rejection detail.
        reason: String,
    },
    /// A status or move request failed or returned a non-success response.
    #[error("maze service request failed: {reason}")]
    Transport {
        /// Transport or decoding failure detail.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, GameState, GridSize, Heading, MoveOutcome};

    const ALL_HEADINGS: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    #[test]
    fn clockwise_four_times_is_identity() {
        for heading in ALL_HEADINGS {
            assert_eq!(
                heading.clockwise().clockwise().clockwise().clockwise(),
                heading
            );
        }
    }

    #[test]
    fn counter_clockwise_inverts_clockwise() {
        for heading in ALL_HEADINGS {
            assert_eq!(heading.clockwise().counter_clockwise(), heading);
            assert_eq!(heading.counter_clockwise().clockwise(), heading);
        }
    }

    #[test]
    fn opposite_twice_is_identity() {
        for heading in ALL_HEADINGS {
            assert_ne!(heading.opposite(), heading);
            assert_eq!(heading.opposite().opposite(), heading);
        }
    }

    #[test]
    fn step_translates_along_each_heading() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(origin.step(Heading::Up), Some(CellCoord::new(3, 2)));
        assert_eq!(origin.step(Heading::Down), Some(CellCoord::new(3, 4)));
        assert_eq!(origin.step(Heading::Left), Some(CellCoord::new(2, 3)));
        assert_eq!(origin.step(Heading::Right), Some(CellCoord::new(4, 3)));
    }

    #[test]
    fn step_refuses_to_leave_the_coordinate_space() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Heading::Up), None);
        assert_eq!(corner.step(Heading::Left), None);
    }

    #[test]
    fn grid_contains_excludes_cells_on_the_far_edges() {
        let size = GridSize::new(3, 2);
        assert!(size.contains(CellCoord::new(0, 0)));
        assert!(size.contains(CellCoord::new(2, 1)));
        assert!(!size.contains(CellCoord::new(3, 0)));
        assert!(!size.contains(CellCoord::new(0, 2)));
        assert_eq!(size.cell_count(), 6);
    }

    #[test]
    fn headings_serialize_to_wire_strings() {
        let encode = |heading: Heading| serde_json::to_string(&heading).expect("heading encodes");
        assert_eq!(encode(Heading::Up), "\"UP\"");
        assert_eq!(encode(Heading::Down), "\"DOWN\"");
        assert_eq!(encode(Heading::Left), "\"LEFT\"");
        assert_eq!(encode(Heading::Right), "\"RIGHT\"");
    }

    #[test]
    fn move_outcomes_deserialize_from_wire_strings() {
        let decode =
            |raw: &str| -> MoveOutcome { serde_json::from_str(raw).expect("move outcome decodes") };
        assert_eq!(decode("\"SUCCESS\""), MoveOutcome::Success);
        assert_eq!(decode("\"WALL\""), MoveOutcome::Wall);
        assert_eq!(decode("\"OUT_OF_BOUNDS\""), MoveOutcome::OutOfBounds);
        assert_eq!(decode("\"END\""), MoveOutcome::Goal);
    }

    #[test]
    fn game_states_deserialize_from_wire_strings() {
        let decode =
            |raw: &str| -> GameState { serde_json::from_str(raw).expect("game state decodes") };
        assert_eq!(decode("\"PLAYING\""), GameState::Playing);
        assert_eq!(decode("\"FINISHED\""), GameState::Finished);
        assert_eq!(decode("\"GAME_OVER\""), GameState::GameOver);
        assert_eq!(decode("\"NONE\""), GameState::None);
    }
}
