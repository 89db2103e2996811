//! No-limit bet validation and the stage-level bet predicates the table
//! loop consults.

use thiserror::Error;

use super::entities::{
    Action, ActionChoice, ActionChoices, Bet, BetAction, Blinds, Player, Usd,
};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum BetError {
    #[error("cannot {0:?} right now")]
    Illegal(Action),
    #[error("raise must be at least ${min}, got ${by}")]
    RaiseTooSmall { min: Usd, by: Usd },
    #[error("need ${required} but only ${available} left")]
    InsufficientChips { required: Usd, available: Usd },
}

/// Validates and applies bet actions for one table.
#[derive(Clone, Debug)]
pub struct Betting {
    blinds: Blinds,
}

impl Betting {
    #[must_use]
    pub fn new(blinds: Blinds) -> Self {
        Self { blinds }
    }

    #[must_use]
    pub fn blinds(&self) -> &Blinds {
        &self.blinds
    }

    fn owed(player: &Player, max_bet: Usd) -> Usd {
        max_bet.saturating_sub(player.bet)
    }

    /// Actions on offer for `player` facing `max_bet`.
    #[must_use]
    pub fn action_choices(&self, player: &Player, max_bet: Usd) -> ActionChoices {
        let owed = Self::owed(player, max_bet);
        let mut choices = vec![ActionChoice::Fold];
        if owed == 0 {
            choices.push(ActionChoice::Check);
        } else {
            choices.push(ActionChoice::Call(owed.min(player.stack)));
        }
        if player.stack > owed {
            choices.push(ActionChoice::Raise(owed + self.blinds.big));
        }
        if player.stack > 0 {
            choices.push(ActionChoice::AllIn);
        }
        choices.into()
    }

    /// Resolve `action` into the bet it would produce without touching
    /// the player.
    pub fn validate(&self, player: &Player, max_bet: Usd, action: &Action) -> Result<Bet, BetError> {
        let owed = Self::owed(player, max_bet);
        let stack = player.stack;
        let bet = match action {
            Action::Fold => Bet {
                action: BetAction::Fold,
                amount: 0,
            },
            Action::Check if owed == 0 => Bet {
                action: BetAction::Check,
                amount: 0,
            },
            Action::Call if owed > 0 && stack > 0 => {
                let amount = owed.min(stack);
                let action = if amount == stack {
                    BetAction::AllIn
                } else {
                    BetAction::Call
                };
                Bet { action, amount }
            }
            Action::AllIn if stack > 0 => Bet {
                action: BetAction::AllIn,
                amount: stack,
            },
            Action::Raise(by) => {
                let by = by.unwrap_or(self.blinds.big);
                let required = owed + by;
                if required > stack {
                    return Err(BetError::InsufficientChips {
                        required,
                        available: stack,
                    });
                }
                if required == stack {
                    Bet {
                        action: BetAction::AllIn,
                        amount: stack,
                    }
                } else if by < self.blinds.big {
                    return Err(BetError::RaiseTooSmall {
                        min: self.blinds.big,
                        by,
                    });
                } else {
                    Bet {
                        action: BetAction::Raise,
                        amount: required,
                    }
                }
            }
            action => return Err(BetError::Illegal(action.clone())),
        };
        Ok(bet)
    }

    /// Validate and move chips from the player's stack into their
    /// current-stage bet.
    pub fn apply(&self, player: &mut Player, max_bet: Usd, action: &Action) -> Result<Bet, BetError> {
        let bet = self.validate(player, max_bet, action)?;
        commit(player, &bet);
        Ok(bet)
    }

    /// Post a forced blind. A short stack posts what it has and is all-in.
    pub fn post_blind(&self, player: &mut Player, blind: Usd) -> Bet {
        let amount = blind.min(player.stack);
        let action = if amount == player.stack {
            BetAction::AllIn
        } else {
            BetAction::None
        };
        let bet = Bet { action, amount };
        commit(player, &bet);
        bet
    }
}

fn commit(player: &mut Player, bet: &Bet) {
    player.stack -= bet.amount;
    player.bet += bet.amount;
    player.bet_action = bet.action;
}

fn players(seats: &[Option<Player>]) -> impl Iterator<Item = &Player> {
    seats.iter().flatten()
}

/// Largest current-stage bet at the table.
#[must_use]
pub fn max_bet(seats: &[Option<Player>]) -> Usd {
    players(seats).map(|p| p.bet).max().unwrap_or_default()
}

#[must_use]
pub fn num_non_folded(seats: &[Option<Player>]) -> usize {
    players(seats).filter(|p| !p.is_folded()).count()
}

fn max_all_in_bet(seats: &[Option<Player>]) -> Usd {
    players(seats)
        .filter(|p| p.is_all_in())
        .map(|p| p.bet)
        .max()
        .unwrap_or_default()
}

/// Every player still making decisions has the same bet, and that bet
/// covers every all-in.
#[must_use]
pub fn are_bets_equal(seats: &[Option<Player>]) -> bool {
    let mut live = players(seats).filter(|p| p.can_act()).map(|p| p.bet);
    let Some(first) = live.next() else {
        return true;
    };
    live.all(|bet| bet == first) && first >= max_all_in_bet(seats)
}

/// Nobody is left to bet against: at most one player can still act and
/// they already cover every all-in.
#[must_use]
pub fn is_all_in(seats: &[Option<Player>]) -> bool {
    let live: Vec<&Player> = players(seats).filter(|p| p.can_act()).collect();
    match live.as_slice() {
        [] => true,
        [player] => player.bet >= max_all_in_bet(seats),
        _ => false,
    }
}

/// Clear current-stage bets before a new betting stage. Folds and
/// all-ins carry over.
pub fn start_stage(seats: &mut [Option<Player>]) {
    for player in seats.iter_mut().flatten() {
        player.bet = 0;
        if player.can_act() {
            player.bet_action = BetAction::None;
        }
    }
}
