//! # Hold'em Round
//!
//! An authoritative Texas hold'em round engine. Each table is one async
//! actor that deals, runs the betting loop stage by stage, settles the
//! pot and broadcasts every transition so passive observers can replay
//! the round exactly.
//!
//! ## Stages
//!
//! A round moves through a fixed transition table:
//!
//! - **Empty**: no round in progress, before the deal and after it
//! - **Preflop**: pocket cards dealt, blinds posted, first betting loop
//! - **Flop / Turn / River**: three, one and one community cards revealed,
//!   each followed by a betting loop
//! - **Showdown**: hands compared, pot paid
//!
//! A fold or leave that leaves one player holding cards ends the deal
//! immediately, skipping whatever stages remain.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, stages, betting rules, pot split, hand ranking and
//!   the [`Replica`](game::replica::Replica) observers use
//! - [`table`]: the table actor, its handle, configuration and manager
//! - [`net`]: length-prefixed bincode framing for events
//!
//! ## Example
//!
//! ```
//! use holdem_round::game::{Round, Stage, entities::Deck};
//!
//! let mut round = Round::new();
//! let mut deck = Deck::default();
//! let pockets = round.start(uuid::Uuid::nil(), &mut deck, 2).unwrap();
//! assert_eq!(pockets.len(), 2);
//! assert_eq!(round.advance().unwrap().stage, Stage::Preflop);
//! ```

/// Wire framing for round events.
pub mod net;
pub use net::{errors::SerializationError, frame};

/// Core game logic, entities, and round collaborators.
pub mod game;
pub use game::{
    Replica, ReplicaError, RoundError, RoundEvent, Stage,
    constants::{self, MAX_PLAYERS},
    entities::{self, DEFAULT_BUY_IN, DEFAULT_MIN_BIG_BLIND, DEFAULT_MIN_SMALL_BLIND},
    functional,
};

/// Table actors and their management.
pub mod table;
pub use table::{TableActor, TableConfig, TableError, TableHandle, TableManager};
