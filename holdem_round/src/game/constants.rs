//! Table and deck limits shared across the engine.

/// Hard limit on seats at one table. 23 players would exhaust a 52 card
/// deck (2 pocket cards each plus 5 community cards), so stay well below.
pub const MAX_PLAYERS: usize = 10;

/// Usernames longer than this are truncated.
pub const MAX_USER_INPUT_LENGTH: usize = 32;

pub const DECK_SIZE: usize = 52;
pub const NUM_POCKET_CARDS: usize = 2;
pub const NUM_COMMUNITY_CARDS: usize = 5;

/// Seven cards (two pocket, five community) feed every showdown comparison.
pub const NUM_SHOWDOWN_CARDS: usize = NUM_POCKET_CARDS + NUM_COMMUNITY_CARDS;

/// Number of cards that make up a ranked hand.
pub const HAND_SIZE: usize = 5;
