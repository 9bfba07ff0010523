#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Local world model maintained while blindly exploring a maze level.
//!
//! The model is the agent's only persistent memory within a level: a dense
//! grid of [`CellState`] values that starts as all fog and fills in from
//! confirmed move outcomes, plus the tracker holding the agent's believed
//! position. Both are rebuilt from scratch at every level boundary; nothing
//! crosses levels except the session token held by the caller.

#[cfg(feature = "oracle_scaffolding")]
pub mod scaffolding;

use maze_scout_core::{CellCoord, CellState, GridSize};

/// Dense cache of discovered cell states for one maze level.
///
/// Cells are stored in row-major order (`y * width + x`), the single indexing
/// convention used throughout the workspace. The model is owned exclusively
/// by the level-solve call and handed to the systems by mutable borrow, so no
/// other party can mutate it mid-level.
#[derive(Clone, Debug)]
pub struct WorldModel {
    size: GridSize,
    cells: Vec<CellState>,
}

impl WorldModel {
    /// Creates an all-fog model with the start cell marked open.
    ///
    /// The start cell is the one place the agent is known to stand, which is
    /// also why the believed position can never point at a wall.
    #[must_use]
    pub fn new(size: GridSize, start: CellCoord) -> Self {
        let mut model = Self {
            size,
            cells: vec![CellState::Fog; size.cell_count()],
        };
        model.record(start, CellState::Open);
        model
    }

    /// Dimensions of the level the model covers.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether the provided coordinate lies inside the level.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        self.size.contains(cell)
    }

    /// State cached for the provided cell, if it lies within the level.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Records a confirmed state for the provided cell.
    ///
    /// Coordinates outside the level are ignored; no cell exists there to
    /// remember anything about.
    pub fn record(&mut self, cell: CellCoord, state: CellState) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = state;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }

        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let width = usize::try_from(self.size.width()).ok()?;
        y.checked_mul(width)?.checked_add(x)
    }
}

/// The agent's believed position, advanced only on confirmed moves.
///
/// The tracker is updated in lock-step with oracle responses: a `Success` or
/// `Goal` outcome advances it, everything else leaves it untouched. Any
/// divergence from the service-reported location is a tracking defect, never
/// a recoverable condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionTracker {
    current: CellCoord,
}

impl PositionTracker {
    /// Creates a tracker anchored at the level's start coordinate.
    #[must_use]
    pub const fn new(start: CellCoord) -> Self {
        Self { current: start }
    }

    /// Coordinate the agent believes it occupies.
    #[must_use]
    pub const fn current(&self) -> CellCoord {
        self.current
    }

    /// Advances the believed position after a confirmed move.
    pub fn advance(&mut self, to: CellCoord) {
        self.current = to;
    }
}
