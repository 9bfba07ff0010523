#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Move execution that resolves each probe locally when possible.
//!
//! Every attempted step goes through [`MoveExecutor::attempt`], which answers
//! from the world model whenever the outcome is already known and otherwise
//! spends one oracle round trip. The short-circuits are observably equivalent
//! to asking the service, because wall and out-of-bounds facts about a fixed
//! cell never change within a level.

use maze_scout_core::{
    CellCoord, CellState, Heading, MoveOutcome, Oracle, OracleError, SessionToken,
};
use maze_scout_world::{PositionTracker, WorldModel};

/// Resolves requested headings against the cache or the oracle.
///
/// The executor borrows the level's world model and tracker exclusively for
/// the duration of the solve; every mutation of either happens here, in
/// lock-step with a confirmed oracle outcome.
#[derive(Debug)]
pub struct MoveExecutor<'a, O: Oracle> {
    oracle: &'a O,
    session: &'a SessionToken,
    world: &'a mut WorldModel,
    tracker: &'a mut PositionTracker,
}

impl<'a, O: Oracle> MoveExecutor<'a, O> {
    /// Creates an executor over the provided level state.
    #[must_use]
    pub fn new(
        oracle: &'a O,
        session: &'a SessionToken,
        world: &'a mut WorldModel,
        tracker: &'a mut PositionTracker,
    ) -> Self {
        Self {
            oracle,
            session,
            world,
            tracker,
        }
    }

    /// Coordinate the agent believes it occupies.
    #[must_use]
    pub fn position(&self) -> CellCoord {
        self.tracker.current()
    }

    /// Attempts to move one step along the provided heading.
    ///
    /// Resolution order: a target outside the known grid bounds is
    /// `OutOfBounds` without a remote call; a target already recorded as a
    /// wall is `Wall` without a remote call; anything else costs one oracle
    /// move. Confirmed outcomes update the model and tracker: `Success` and
    /// `Goal` advance the believed position and mark the target, `Wall`
    /// records the wall in place, `OutOfBounds` mutates nothing.
    pub fn attempt(&mut self, heading: Heading) -> Result<MoveOutcome, OracleError> {
        let Some(target) = self.tracker.current().step(heading) else {
            return Ok(MoveOutcome::OutOfBounds);
        };
        if !self.world.contains(target) {
            return Ok(MoveOutcome::OutOfBounds);
        }
        if self.world.state(target) == Some(CellState::Wall) {
            return Ok(MoveOutcome::Wall);
        }

        let outcome = self.oracle.attempt_move(self.session, heading)?;
        match outcome {
            MoveOutcome::Success => {
                self.world.record(target, CellState::Open);
                self.tracker.advance(target);
            }
            MoveOutcome::Wall => {
                self.world.record(target, CellState::Wall);
            }
            MoveOutcome::Goal => {
                self.world.record(target, CellState::Goal);
                self.tracker.advance(target);
            }
            MoveOutcome::OutOfBounds => {}
        }
        Ok(outcome)
    }
}
