//! Per-round card and stage state shared by the table and by replicas.
//!
//! [`Round`] does not decide anything: it deals from a deck in a fixed
//! order and moves along [`Stage::next`] when told to. The table actor
//! owns the decisions; a [`Replica`](super::replica::Replica) feeds the
//! same calls from broadcast events, so both sides hold identical cards.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{
    constants::{NUM_COMMUNITY_CARDS, NUM_POCKET_CARDS},
    entities::{Card, Deck, DeckError},
    stage::Stage,
};

#[derive(Debug, Error, PartialEq)]
pub enum RoundError {
    #[error("a round is already active")]
    AlreadyActive,
    #[error("no round is active")]
    NotActive,
    #[error("no stage follows {0}")]
    NoNextStage(Stage),
    #[error("showdown produced no winner")]
    EmptyWinnerSet,
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Stage reached by [`Round::advance`] and the community cards it
/// revealed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StageAdvance {
    pub stage: Stage,
    pub revealed: Vec<Card>,
}

#[derive(Clone, Debug, Default)]
pub struct Round {
    id: Option<Uuid>,
    stage: Stage,
    reserved: Vec<Card>,
    board: Vec<Card>,
}

impl Round {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal pocket cards for `num_players` players (two consecutive cards
    /// each, in dealing order), then set aside the five community cards.
    /// The stage stays `Empty` until the first [`Round::advance`].
    pub fn start(
        &mut self,
        id: Uuid,
        deck: &mut Deck,
        num_players: usize,
    ) -> Result<Vec<[Card; NUM_POCKET_CARDS]>, RoundError> {
        if self.is_active() {
            return Err(RoundError::AlreadyActive);
        }
        let mut pockets = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            pockets.push([deck.deal_card()?, deck.deal_card()?]);
        }
        self.reserved = deck.deal_cards(NUM_COMMUNITY_CARDS)?;
        self.board.clear();
        self.stage = Stage::Empty;
        self.id = Some(id);
        Ok(pockets)
    }

    pub fn advance(&mut self) -> Result<StageAdvance, RoundError> {
        if !self.is_active() {
            return Err(RoundError::NotActive);
        }
        let next = self.stage.next().ok_or(RoundError::NoNextStage(self.stage))?;
        let shown = self.board.len();
        let revealed = self.reserved[shown..next.num_community_cards()].to_vec();
        self.board.extend_from_slice(&revealed);
        self.stage = next;
        Ok(StageAdvance {
            stage: next,
            revealed,
        })
    }

    pub fn end(&mut self) {
        self.id = None;
        self.stage = Stage::Empty;
        self.reserved.clear();
        self.board.clear();
    }

    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }
}
