//! Scripted players that sit at a table and act through its handle.

use holdem_round::{
    RoundEvent, TableHandle,
    constants::NUM_POCKET_CARDS,
    entities::{Action, ActionChoices, Card, PlayerId, Usd},
    table::TableResponse,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

/// Pocket strength for a pair, before the value bonus
const STRENGTH_POCKET_PAIR: f64 = 0.6;

/// Extra strength for suited pocket cards
const STRENGTH_SUITED: f64 = 0.1;

/// Above this a bot will sometimes raise
const RAISE_THRESHOLD: f64 = 0.7;

pub struct ScriptedBot {
    id: PlayerId,
    name: String,
    buy_in: Usd,
    delay: Duration,
    rng: StdRng,
    pocket: Option<[Card; NUM_POCKET_CARDS]>,
}

impl ScriptedBot {
    pub fn new(id: PlayerId, buy_in: Usd, delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            id,
            name: format!("bot{id}"),
            buy_in,
            delay,
            rng,
            pocket: None,
        }
    }

    /// Rough pre-flop strength in `[0, 1]` from the pocket cards alone.
    fn strength(&self) -> f64 {
        let Some([Card(a, suit_a), Card(b, suit_b)]) = self.pocket else {
            return 0.0;
        };
        let high = f64::from(a.max(b)) / 14.0;
        let mut strength = if a == b {
            STRENGTH_POCKET_PAIR + 0.4 * high
        } else {
            0.5 * high
        };
        if suit_a == suit_b {
            strength += STRENGTH_SUITED;
        }
        strength.min(1.0)
    }

    /// Pick an action out of the offered choices.
    pub fn decide(&mut self, choices: &ActionChoices) -> Action {
        let strength = self.strength();
        let raise = Action::Raise(None);

        if strength > RAISE_THRESHOLD && choices.contains(&raise) && self.rng.random_bool(0.4) {
            return raise;
        }
        if choices.contains(&Action::Check) {
            return Action::Check;
        }
        if choices.contains(&Action::Call) && self.rng.random_bool(strength.clamp(0.4, 0.95)) {
            return Action::Call;
        }
        if choices.contains(&Action::AllIn) && strength > RAISE_THRESHOLD {
            return Action::AllIn;
        }
        Action::Fold
    }

    /// Sit down and play until the table closes or the bot goes broke.
    pub async fn run(mut self, handle: TableHandle) {
        let Ok(mut events) = handle.subscribe(self.id).await else {
            return;
        };
        match handle.sit(self.id, &self.name, self.buy_in).await {
            Ok(TableResponse::Success | TableResponse::SuccessWithMessage(_)) => {}
            Ok(response) => {
                warn!(bot = self.id, "Could not sit: {:?}", response);
                return;
            }
            Err(_) => return,
        }

        while let Some(event) = events.recv().await {
            match event {
                RoundEvent::PocketCardsAssigned { player, cards } if player == self.id => {
                    self.pocket = Some(cards);
                }
                RoundEvent::ActionRequested {
                    player, choices, ..
                } if player == self.id => {
                    sleep(self.delay).await;
                    if !self.act(&handle, &choices).await {
                        break;
                    }
                }
                RoundEvent::RoundEnded { .. } => self.pocket = None,
                RoundEvent::PlayerRemoved { player } if player == self.id => {
                    info!(bot = self.id, "Out of chips");
                    break;
                }
                _ => {}
            }
        }
        let _ = handle.unsubscribe(self.id).await;
    }

    /// Returns `false` once the table stopped answering.
    async fn act(&mut self, handle: &TableHandle, choices: &ActionChoices) -> bool {
        let action = self.decide(choices);
        let Ok(response) = handle.take_action(self.id, action.clone()).await else {
            return false;
        };
        if let TableResponse::InvalidAction(reason) = response {
            debug!(bot = self.id, "{} rejected: {}", action, reason);
            let fallback = if choices.contains(&Action::Check) {
                Action::Check
            } else {
                Action::Fold
            };
            return handle.take_action(self.id, fallback).await.is_ok();
        }
        true
    }
}
