use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{
    constants::NUM_POCKET_CARDS,
    entities::{ActionChoices, Bet, Card, PlayerId, SeatIndex, Usd, Username, WinnerRecord},
    stage::Stage,
};

/// An authoritative transition, pushed to every subscriber in the order
/// the table made it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum RoundEvent {
    PlayerSeated {
        player: PlayerId,
        name: Username,
        seat: SeatIndex,
        stack: Usd,
    },
    PlayerWaitlisted {
        player: PlayerId,
        name: Username,
    },
    PlayerLeft {
        player: PlayerId,
    },
    /// Removed between rounds for having no chips.
    PlayerRemoved {
        player: PlayerId,
    },
    RoundStarted {
        round: Uuid,
        button: SeatIndex,
        /// Card codes of the shuffled deck, in pull order.
        deck: Vec<u8>,
        dealing_order: Vec<PlayerId>,
    },
    PocketCardsAssigned {
        player: PlayerId,
        cards: [Card; NUM_POCKET_CARDS],
    },
    BlindPosted {
        player: PlayerId,
        bet: Bet,
        stack: Usd,
    },
    ActionRequested {
        player: PlayerId,
        choices: ActionChoices,
        timeout_secs: u64,
    },
    BetPlaced {
        player: PlayerId,
        bet: Bet,
        stack: Usd,
    },
    StageAdvanced {
        stage: Stage,
        revealed: Vec<Card>,
    },
    StageEnded {
        stage: Stage,
    },
    /// `refunds` returns uncalled or voided contributions to players
    /// who are still seated.
    RoundEnded {
        round: Uuid,
        winners: Vec<WinnerRecord>,
        refunds: Vec<(PlayerId, Usd)>,
    },
}

impl fmt::Display for RoundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerSeated {
                player, name, seat, ..
            } => write!(f, "{name} ({player}) sat at seat {seat}"),
            Self::PlayerWaitlisted { player, name } => {
                write!(f, "{name} ({player}) joined the waitlist")
            }
            Self::PlayerLeft { player } => write!(f, "player {player} left"),
            Self::PlayerRemoved { player } => write!(f, "player {player} removed"),
            Self::RoundStarted {
                round,
                button,
                dealing_order,
                ..
            } => write!(
                f,
                "round {round} started, button at seat {button}, {} players",
                dealing_order.len()
            ),
            Self::PocketCardsAssigned { player, .. } => write!(f, "player {player} dealt in"),
            Self::BlindPosted { player, bet, .. } | Self::BetPlaced { player, bet, .. } => {
                write!(f, "player {player}: {bet}")
            }
            Self::ActionRequested {
                player, choices, ..
            } => write!(f, "player {player} to act: {choices}"),
            Self::StageAdvanced { stage, revealed } => {
                let cards = revealed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "{stage} [{cards}]")
            }
            Self::StageEnded { stage } => write!(f, "end of {stage}"),
            Self::RoundEnded {
                round,
                winners,
                refunds,
            } => {
                let winners = winners
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "round {round} ended: {winners}")?;
                for (player, amount) in refunds {
                    write!(f, ", player {player} refunded ${amount}")?;
                }
                Ok(())
            }
        }
    }
}
