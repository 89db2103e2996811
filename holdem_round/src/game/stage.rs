use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a round. `Empty` is both the value before the first deal and
/// the value after the deal ends.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Stage {
    #[default]
    Empty,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// The stage that follows this one. Showdown has no successor; the
    /// round returns to `Empty` through the end of the deal instead.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Empty => Some(Self::Preflop),
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => Some(Self::Showdown),
            Self::Showdown => None,
        }
    }

    /// Community cards visible once this stage has begun.
    #[must_use]
    pub const fn num_community_cards(self) -> usize {
        match self {
            Self::Empty | Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River | Self::Showdown => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Empty => "empty",
            Self::Preflop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}
