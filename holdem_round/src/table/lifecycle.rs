//! Restart timer driving the gap between two rounds.
//!
//! The table holds exactly one [`RestartTimer`]. Arming it overwrites
//! whatever was pending, so a sit and an end of deal racing each other
//! never produce two round starts.

use std::future;
use tokio::time::{Duration, Instant, sleep_until};

/// Step the timer performs when it fires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestartPhase {
    /// Seat waiting players and drop broke ones.
    Settling,
    /// Check the start condition, re-arming itself until it holds.
    AwaitingPlayers,
    /// Start the round.
    Debouncing,
}

#[derive(Debug, Default)]
pub struct RestartTimer {
    pending: Option<(RestartPhase, Instant)>,
}

impl RestartTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, phase: RestartPhase, after: Duration) {
        if let Some((previous, _)) = self.pending {
            log::debug!("replacing pending {previous:?} restart with {phase:?}");
        }
        self.pending = Some((phase, Instant::now() + after));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Option<RestartPhase> {
        self.pending.map(|(phase, _)| phase)
    }

    /// Resolves once the pending deadline passes. Never resolves while
    /// nothing is armed, so it can sit in a `select!` unconditionally.
    pub async fn elapsed(&self) -> RestartPhase {
        match self.pending {
            Some((phase, deadline)) => {
                sleep_until(deadline).await;
                phase
            }
            None => future::pending().await,
        }
    }

    /// Disarm and return the phase that fired.
    pub fn fire(&mut self) -> Option<RestartPhase> {
        self.pending.take().map(|(phase, _)| phase)
    }
}
