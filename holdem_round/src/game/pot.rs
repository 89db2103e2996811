use serde::{Deserialize, Serialize};

use super::entities::{PlayerId, Usd};

/// Chips moved out of the pot when a round ends.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Settlement {
    /// Winnings per winner, in the order the winners were given.
    pub payouts: Vec<(PlayerId, Usd)>,
    /// Uncalled chips handed back to the players who put them in.
    pub refunds: Vec<(PlayerId, Usd)>,
}

impl Settlement {
    #[must_use]
    pub fn total(&self) -> Usd {
        self.payouts
            .iter()
            .chain(self.refunds.iter())
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// Records what each player put into the pot during a round and splits
/// it when the round ends.
pub trait PotLedger: Send {
    fn contribute(&mut self, player: PlayerId, amount: Usd);

    fn size(&self) -> Usd;

    fn contribution(&self, player: PlayerId) -> Usd;

    /// Split the pot between `winners` (in showdown order) and empty it.
    /// Only players in `seated` can receive refunds. An empty winner set
    /// voids the round and refunds everything refundable.
    fn settle(&mut self, winners: &[PlayerId], seated: &[PlayerId]) -> Settlement;

    fn clear(&mut self);
}

/// Default ledger with a layered split: a winner only takes a share of
/// the chips matched by their own contribution, odd chips go to the
/// earliest winner of each layer, and chips nobody could win go back to
/// whoever put them in.
#[derive(Clone, Debug, Default)]
pub struct Pot {
    contributions: Vec<(PlayerId, Usd)>,
}

impl Pot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PotLedger for Pot {
    fn contribute(&mut self, player: PlayerId, amount: Usd) {
        if amount == 0 {
            return;
        }
        match self.contributions.iter_mut().find(|(id, _)| *id == player) {
            Some((_, total)) => *total += amount,
            None => self.contributions.push((player, amount)),
        }
    }

    fn size(&self) -> Usd {
        self.contributions.iter().map(|(_, amount)| amount).sum()
    }

    fn contribution(&self, player: PlayerId) -> Usd {
        self.contributions
            .iter()
            .find(|(id, _)| *id == player)
            .map(|(_, amount)| *amount)
            .unwrap_or_default()
    }

    fn settle(&mut self, winners: &[PlayerId], seated: &[PlayerId]) -> Settlement {
        let mut payouts: Vec<(PlayerId, Usd)> = winners.iter().map(|id| (*id, 0)).collect();
        let mut levels: Vec<Usd> = winners.iter().map(|id| self.contribution(*id)).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut previous = 0;
        for (i, &level) in levels.iter().enumerate() {
            let mut layer: Usd = self
                .contributions
                .iter()
                .map(|(_, amount)| (*amount).min(level) - (*amount).min(previous))
                .sum();
            // Chips above the top layer from players who already left
            // can't be refunded, so they ride on the last layer.
            if i == levels.len() - 1 {
                layer += self
                    .contributions
                    .iter()
                    .filter(|(id, _)| !seated.contains(id))
                    .map(|(_, amount)| amount.saturating_sub(level))
                    .sum::<Usd>();
            }
            let eligible: Vec<usize> = winners
                .iter()
                .enumerate()
                .filter(|(_, id)| self.contribution(**id) >= level)
                .map(|(idx, _)| idx)
                .collect();
            let share = layer / eligible.len() as Usd;
            let odd = layer % eligible.len() as Usd;
            for (n, idx) in eligible.into_iter().enumerate() {
                payouts[idx].1 += share + if n == 0 { odd } else { 0 };
            }
            previous = level;
        }

        let refunds = self
            .contributions
            .iter()
            .filter(|(id, _)| seated.contains(id))
            .map(|(id, amount)| (*id, amount.saturating_sub(previous)))
            .filter(|(_, amount)| *amount > 0)
            .collect();

        self.clear();
        Settlement { payouts, refunds }
    }

    fn clear(&mut self) {
        self.contributions.clear();
    }
}
