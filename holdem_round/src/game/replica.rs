//! Passive copy of a table's round, rebuilt from broadcast events.
//!
//! A replica can only [`apply`](Replica::apply) what the table already
//! decided. It re-deals the broadcast deck through the same [`Round`]
//! the table uses, so pocket and community cards are checked against the
//! authority instead of being trusted.

use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use super::{
    constants::NUM_POCKET_CARDS,
    entities::{Card, Deck, DeckError, PlayerId, Usd, Username, WinnerRecord},
    events::RoundEvent,
    round::{Round, RoundError},
    stage::Stage,
};

#[derive(Debug, Error, PartialEq)]
pub enum ReplicaError {
    #[error("bad deck: {0}")]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error("expected {expected:?}, received {received}")]
    OutOfOrder {
        expected: Option<Stage>,
        received: Stage,
    },
    #[error("desync: {0}")]
    Desync(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplicaSeat {
    pub name: Username,
    pub stack: Usd,
    pub cards: Option<[Card; NUM_POCKET_CARDS]>,
}

#[derive(Debug, Default)]
pub struct Replica {
    round: Round,
    players: HashMap<PlayerId, ReplicaSeat>,
    dealt: HashMap<PlayerId, [Card; NUM_POCKET_CARDS]>,
    stages: Vec<Stage>,
    last_winners: Vec<WinnerRecord>,
    rounds_seen: usize,
}

impl Replica {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &RoundEvent) -> Result<(), ReplicaError> {
        match event {
            RoundEvent::PlayerSeated {
                player,
                name,
                stack,
                ..
            } => {
                self.players.insert(*player, ReplicaSeat {
                    name: name.clone(),
                    stack: *stack,
                    cards: None,
                });
            }
            RoundEvent::PlayerWaitlisted { .. } | RoundEvent::ActionRequested { .. } => {}
            RoundEvent::PlayerLeft { player } | RoundEvent::PlayerRemoved { player } => {
                self.players.remove(player);
            }
            RoundEvent::RoundStarted {
                round,
                deck,
                dealing_order,
                ..
            } => self.start(*round, deck, dealing_order)?,
            RoundEvent::PocketCardsAssigned { player, cards } => {
                if self.dealt.get(player) != Some(cards) {
                    return Err(ReplicaError::Desync(format!(
                        "pocket cards for player {player} don't match the deck"
                    )));
                }
                if let Some(seat) = self.players.get_mut(player) {
                    seat.cards = Some(*cards);
                }
            }
            RoundEvent::BlindPosted { player, stack, .. }
            | RoundEvent::BetPlaced { player, stack, .. } => {
                if let Some(seat) = self.players.get_mut(player) {
                    seat.stack = *stack;
                }
            }
            RoundEvent::StageAdvanced { stage, revealed } => {
                let expected = self.round.stage().next();
                if expected != Some(*stage) {
                    return Err(ReplicaError::OutOfOrder {
                        expected,
                        received: *stage,
                    });
                }
                let advance = self.round.advance()?;
                if &advance.revealed != revealed {
                    return Err(ReplicaError::Desync(format!(
                        "{stage} revealed different cards"
                    )));
                }
                self.stages.push(advance.stage);
            }
            RoundEvent::StageEnded { stage } => {
                if *stage != self.round.stage() {
                    return Err(ReplicaError::OutOfOrder {
                        expected: Some(self.round.stage()),
                        received: *stage,
                    });
                }
            }
            RoundEvent::RoundEnded {
                round,
                winners,
                refunds,
            } => {
                if self.round.id() != Some(*round) {
                    return Err(ReplicaError::Desync(format!("round {round} was never started")));
                }
                let credits = winners
                    .iter()
                    .map(|record| (record.player, record.amount))
                    .chain(refunds.iter().copied());
                for (player, amount) in credits {
                    if let Some(seat) = self.players.get_mut(&player) {
                        seat.stack += amount;
                    }
                }
                for seat in self.players.values_mut() {
                    seat.cards = None;
                }
                self.round.end();
                self.dealt.clear();
                self.stages.push(Stage::Empty);
                self.last_winners = winners.clone();
                self.rounds_seen += 1;
            }
        }
        Ok(())
    }

    fn start(&mut self, id: Uuid, codes: &[u8], dealing_order: &[PlayerId]) -> Result<(), ReplicaError> {
        let mut deck = Deck::from_codes(codes)?;
        let pockets = self.round.start(id, &mut deck, dealing_order.len())?;
        self.dealt = dealing_order.iter().copied().zip(pockets).collect();
        self.stages.clear();
        Ok(())
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.round.stage()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.round.is_active()
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        self.round.board()
    }

    /// Stages observed since the last round started, ending with `Empty`
    /// once the round is over.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&ReplicaSeat> {
        self.players.get(&id)
    }

    /// Pocket cards the replica dealt itself from the broadcast deck.
    #[must_use]
    pub fn dealt_cards(&self, id: PlayerId) -> Option<[Card; NUM_POCKET_CARDS]> {
        self.dealt.get(&id).copied()
    }

    #[must_use]
    pub fn last_winners(&self) -> &[WinnerRecord] {
        &self.last_winners
    }

    #[must_use]
    pub fn rounds_seen(&self) -> usize {
        self.rounds_seen
    }
}
