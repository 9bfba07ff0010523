#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that drives maze levels to completion.
//!
//! One controller owns a full run: it fetches the consolidated status once
//! per decision point, rebuilds the per-level world state from scratch, hands
//! the level to the navigator, and loops until the service reports the game
//! finished or lost. Nothing survives a level boundary except the session
//! token.

use maze_scout_core::{
    CellCoord, GameState, Heading, Oracle, OracleError, SessionToken, StatusReport,
};
use maze_scout_system_movement::MoveExecutor;
use maze_scout_system_navigation::{NavigateError, Navigator};
use maze_scout_world::{PositionTracker, WorldModel};
use thiserror::Error;
use tracing::info;

/// Heading used for net progress when the caller has no preference.
pub const DEFAULT_PREFERRED_HEADING: Heading = Heading::Down;

/// Errors surfaced while driving a run to completion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The believed position diverged from the service-reported state: the
    /// navigator saw the goal but the completed-level count never advanced.
    /// This indicates a tracking defect and is never recoverable.
    #[error("believed position {believed} diverged from the service-reported position {reported}")]
    Desync {
        /// Position the tracker ended the level on.
        believed: CellCoord,
        /// Position the service reported afterwards.
        reported: CellCoord,
    },
    /// Navigation failed before the goal was reached.
    #[error(transparent)]
    Navigate(#[from] NavigateError),
    /// A status request failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Final accounting for a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of levels completed when the run ended.
    pub levels_completed: u32,
    /// Total number of levels in the session.
    pub total_levels: u32,
    /// Lifecycle state the session ended in.
    pub game_state: GameState,
}

/// Drives one session across levels until the game ends.
#[derive(Debug)]
pub struct SessionController<'a, O: Oracle> {
    oracle: &'a O,
    session: SessionToken,
    preferred: Heading,
}

impl<'a, O: Oracle> SessionController<'a, O> {
    /// Creates a controller for the provided authenticated session.
    #[must_use]
    pub fn new(oracle: &'a O, session: SessionToken, preferred: Heading) -> Self {
        Self {
            oracle,
            session,
            preferred,
        }
    }

    /// Solves levels until the session leaves play or runs out of levels.
    ///
    /// Each loop iteration spends exactly one status fetch, which serves both
    /// as the completion check for the level just solved and as the start
    /// data for the next one, so no two reads of mutating remote state can
    /// disagree within a decision point.
    pub fn run(&self) -> Result<RunSummary, SessionError> {
        let mut solved: Option<(u32, CellCoord)> = None;

        loop {
            let status = self.oracle.status(&self.session)?;
            if status.game_state != GameState::Playing {
                return Ok(summary(&status));
            }
            if status.total_levels > 0 && status.levels_completed >= status.total_levels {
                return Ok(summary(&status));
            }
            if let Some((completed, believed)) = solved {
                if status.levels_completed == completed {
                    let reported = require(status.location, "current_location")?;
                    return Err(SessionError::Desync { believed, reported });
                }
            }

            let size = require(status.maze_size, "maze_size")?;
            let start = require(status.location, "current_location")?;
            info!(
                level = status.levels_completed.saturating_add(1),
                total = status.total_levels,
                width = size.width(),
                height = size.height(),
                start = %start,
                "starting level"
            );

            let mut world = WorldModel::new(size, start);
            let mut tracker = PositionTracker::new(start);
            let mut navigator = Navigator::new(self.preferred);
            let goal = {
                let mut executor =
                    MoveExecutor::new(self.oracle, &self.session, &mut world, &mut tracker);
                navigator.run(&mut executor)?;
                executor.position()
            };
            info!(
                goal = %goal,
                wall_phases = navigator.wall_phases(),
                "level goal reached"
            );
            solved = Some((status.levels_completed, goal));
        }
    }
}

fn summary(status: &StatusReport) -> RunSummary {
    RunSummary {
        levels_completed: status.levels_completed,
        total_levels: status.total_levels,
        game_state: status.game_state,
    }
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, OracleError> {
    field.ok_or_else(|| OracleError::Transport {
        reason: format!("status response is missing the {name} field"),
    })
}
