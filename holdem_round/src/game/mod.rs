//! Hold'em round engine - cards, stages and the collaborators the table
//! drives a round with.
//!
//! - [`stage`] and [`round`]: explicit stage transitions and dealing
//! - [`betting`], [`pot`], [`seats`], [`sequencer`]: bet rules, pot split,
//!   occupancy and turn order
//! - [`functional`] and [`showdown`]: hand ranking and winner selection
//! - [`events`] and [`replica`]: broadcast transitions and their replay

pub mod betting;
pub mod constants;
pub mod entities;
pub mod events;
pub mod functional;
pub mod pot;
pub mod replica;
pub mod round;
pub mod seats;
pub mod sequencer;
pub mod showdown;
pub mod stage;

pub use betting::{BetError, Betting};
pub use events::RoundEvent;
pub use functional::{HandEvaluator, SubHandEvaluator};
pub use pot::{Pot, PotLedger, Settlement};
pub use replica::{Replica, ReplicaError};
pub use round::{Round, RoundError, StageAdvance};
pub use seats::{Departure, SeatError, SeatProvider, Seating, Seats};
pub use sequencer::{ButtonSequencer, TurnSequencer};
pub use showdown::{ShowdownResult, resolve_showdown};
pub use stage::Stage;
