#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Blind wall-following navigator built on Pledge's algorithm.
//!
//! The navigator reaches the level goal using only step-local sensing. It
//! travels along a fixed preferred heading until blocked, then hugs the
//! obstacle with its right hand while a signed bearing counter tracks net
//! rotation. Once the counter returns to zero with the preferred heading
//! restored, the obstacle has been fully circumnavigated and straight-line
//! travel resumes, which is what rules out circling a closed obstacle
//! forever in a finite maze with a reachable goal.

use maze_scout_core::{CellCoord, Heading, MoveOutcome, Oracle, OracleError};
use maze_scout_system_movement::MoveExecutor;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced while navigating toward the goal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigateError {
    /// Every heading out of the current cell is blocked; the start is
    /// enclosed and no amount of wall-following can make progress.
    #[error("no passable heading out of {position} after a full rotation")]
    Stuck {
        /// Cell the navigator was confined to.
        position: CellCoord,
    },
    /// The underlying oracle call failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Wall-following navigator state for one level.
#[derive(Clone, Debug)]
pub struct Navigator {
    preferred: Heading,
    heading: Heading,
    bearing: i32,
    wall_phases: u32,
}

impl Navigator {
    /// Creates a navigator that makes net progress along `preferred`.
    #[must_use]
    pub const fn new(preferred: Heading) -> Self {
        Self {
            preferred,
            heading: preferred,
            bearing: 0,
            wall_phases: 0,
        }
    }

    /// Heading the navigator makes net progress along.
    #[must_use]
    pub const fn preferred(&self) -> Heading {
        self.preferred
    }

    /// Net clockwise quarter turns accumulated since hugging began.
    #[must_use]
    pub const fn bearing(&self) -> i32 {
        self.bearing
    }

    /// Number of times the wall-following phase was entered.
    #[must_use]
    pub const fn wall_phases(&self) -> u32 {
        self.wall_phases
    }

    /// Drives the executor until the goal is reached.
    ///
    /// Alternates between straight-line travel along the preferred heading
    /// and wall-following around whatever blocks it. Returns `Ok(())` once a
    /// move reports the goal, [`NavigateError::Stuck`] when every heading out
    /// of a cell is rejected, and propagates any oracle failure as-is.
    pub fn run<O: Oracle>(
        &mut self,
        executor: &mut MoveExecutor<'_, O>,
    ) -> Result<(), NavigateError> {
        loop {
            match executor.attempt(self.preferred)? {
                MoveOutcome::Goal => return Ok(()),
                MoveOutcome::Success => {}
                MoveOutcome::Wall | MoveOutcome::OutOfBounds => {
                    // The counter-clockwise turn taken to start hugging the
                    // obstacle counts as -1.
                    self.heading = self.preferred.counter_clockwise();
                    self.bearing = -1;
                    self.wall_phases = self.wall_phases.saturating_add(1);
                    debug!(
                        phase = self.wall_phases,
                        position = %executor.position(),
                        "preferred heading blocked, following the wall"
                    );
                    if self.follow_wall(executor)? {
                        return Ok(());
                    }
                    debug!(position = %executor.position(), "realigned with preferred heading");
                }
            }
        }
    }

    /// Hugs the current obstacle until the bearing closes or the goal shows.
    ///
    /// Returns `Ok(true)` when a move reached the goal and `Ok(false)` when
    /// the bearing returned to zero with the preferred heading restored.
    fn follow_wall<O: Oracle>(
        &mut self,
        executor: &mut MoveExecutor<'_, O>,
    ) -> Result<bool, NavigateError> {
        // Headings known blocked out of the current cell. The failed
        // preferred-heading attempt that triggered entry counts as the first;
        // four means a full rotation found no way out.
        let mut blocked: u32 = 1;

        loop {
            match executor.attempt(self.heading)? {
                MoveOutcome::Goal => return Ok(true),
                MoveOutcome::Wall | MoveOutcome::OutOfBounds => {
                    blocked += 1;
                    if blocked >= 4 {
                        return Err(NavigateError::Stuck {
                            position: executor.position(),
                        });
                    }
                    self.heading = self.heading.counter_clockwise();
                    self.bearing -= 1;
                }
                MoveOutcome::Success => {
                    blocked = 0;
                    // Greedy probe back toward the preferred heading; only a
                    // move that actually happens earns the +1.
                    match executor.attempt(self.heading.clockwise())? {
                        MoveOutcome::Goal => return Ok(true),
                        MoveOutcome::Success => {
                            self.heading = self.heading.clockwise();
                            self.bearing += 1;
                        }
                        MoveOutcome::Wall | MoveOutcome::OutOfBounds => {
                            blocked = 1;
                        }
                    }
                    if self.bearing == 0 && self.heading == self.preferred {
                        return Ok(false);
                    }
                }
            }
        }
    }
}
