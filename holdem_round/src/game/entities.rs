use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::{HashSet, VecDeque},
    fmt::{self},
    hash::{Hash, Hasher},
    mem::discriminant,
};
use thiserror::Error;

use super::constants::{self, DECK_SIZE};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];

    const fn index(self) -> u8 {
        match self {
            Self::Club => 0,
            Self::Spade => 1,
            Self::Diamond => 2,
            Self::Heart => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

pub const MIN_VALUE: Value = 2;
pub const ACE: Value = 14;

/// A card is a tuple of a uInt8 value (two=2u8 ... ace=14u8) and a suit.
///
/// Values outside `2..=14` are not cards. Build cards from untrusted
/// input with [`Card::new`] or [`Card::from_code`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Checked constructor, `None` unless `value` is in `2..=14`.
    #[must_use]
    pub const fn new(value: Value, suit: Suit) -> Option<Self> {
        if value < MIN_VALUE || value > ACE {
            return None;
        }
        Some(Self(value, suit))
    }

    /// One byte wire code for the card: `(value - 2) * 4 + suit`.
    /// Only meaningful for values in `2..=14`.
    #[must_use]
    pub const fn code(&self) -> u8 {
        (self.0 - MIN_VALUE) * 4 + self.1.index()
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        if usize::from(code) >= DECK_SIZE {
            return None;
        }
        Self::new(code / 4 + MIN_VALUE, Suit::ALL[usize::from(code % 4)])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            ACE => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// A ranked hand. Ordering compares the rank first and then the
/// tie-break values (highest group first), which gives the total
/// order used at showdown.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SubHand {
    pub rank: Rank,
    pub values: Vec<Value>,
}

impl fmt::Display for SubHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(|value| match *value {
                ACE => "A".to_string(),
                11 => "J".to_string(),
                12 => "Q".to_string(),
                13 => "K".to_string(),
                v => v.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} ({values})", self.rank)
    }
}

#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum DeckError {
    #[error("deck must contain {DECK_SIZE} cards, got {0}")]
    InvalidSize(usize),
    #[error("invalid card code {0}")]
    InvalidCode(u8),
    #[error("duplicate card code {0}")]
    DuplicateCard(u8),
    #[error("deck exhausted")]
    Exhausted,
}

/// An ordered card source. The authority shuffles one per round and
/// broadcasts its codes; observers rebuild the same deck with
/// [`Deck::from_codes`] and pull cards in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
    pub deck_idx: usize,
}

impl Deck {
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn from_codes(codes: &[u8]) -> Result<Self, DeckError> {
        if codes.len() != DECK_SIZE {
            return Err(DeckError::InvalidSize(codes.len()));
        }
        let mut seen = [false; DECK_SIZE];
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &code in codes {
            let card = Card::from_code(code).ok_or(DeckError::InvalidCode(code))?;
            let slot = &mut seen[usize::from(code)];
            if *slot {
                return Err(DeckError::DuplicateCard(code));
            }
            *slot = true;
            cards.push(card);
        }
        Ok(Self { cards, deck_idx: 0 })
    }

    /// Codes of the whole deck in dealing order, including cards that
    /// were already dealt.
    #[must_use]
    pub fn codes(&self) -> Vec<u8> {
        self.cards.iter().map(Card::code).collect()
    }

    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        let card = *self.cards.get(self.deck_idx).ok_or(DeckError::Exhausted)?;
        self.deck_idx += 1;
        Ok(card)
    }

    pub fn deal_cards(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.remaining() < n {
            return Err(DeckError::Exhausted);
        }
        (0..n).map(|_| self.deal_card()).collect()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = (MIN_VALUE..=ACE)
            .flat_map(|value| Suit::ALL.into_iter().map(move |suit| Card(value, suit)))
            .collect();
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. All bets and player stacks are represented
/// as whole chips.
pub type Usd = u32;

/// Stable identity of a participant, assigned by whoever owns the
/// connection.
pub type PlayerId = u64;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        username.truncate(constants::MAX_USER_INPUT_LENGTH / 2);
        Self(username)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub(crate) fn deserialize_username<'de, D>(deserializer: D) -> Result<Username, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Username::new(&s))
}

pub const DEFAULT_BUY_IN: Usd = 1000;
pub const DEFAULT_MIN_BIG_BLIND: Usd = 20;
pub const DEFAULT_MIN_SMALL_BLIND: Usd = DEFAULT_MIN_BIG_BLIND / 2;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Usd,
    pub big: Usd,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = format!("${}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// What a player asks to do on their turn.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    AllIn,
    Call,
    Check,
    Fold,
    /// Raise the current bet by the given amount. `None` raises by
    /// the minimum (the big blind).
    Raise(Option<Usd>),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "all-ins",
            Self::Call => "calls",
            Self::Check => "checks",
            Self::Fold => "folds",
            Self::Raise(Some(amount)) => &format!("raises by ${amount}"),
            Self::Raise(None) => "raises",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    AllIn,
    Call(Usd),
    Check,
    Fold,
    Raise(Usd),
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "all-in".to_string(),
            Self::Call(amount) => format!("call (== ${amount})"),
            Self::Check => "check".to_string(),
            Self::Fold => "fold".to_string(),
            Self::Raise(amount) => format!("raise (>= ${amount})"),
        };
        write!(f, "{repr}")
    }
}

// Only the variant matters when checking whether an action is on offer.
// The amounts are validated when the action is applied.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl From<ActionChoice> for Action {
    fn from(value: ActionChoice) -> Self {
        match value {
            ActionChoice::AllIn => Self::AllIn,
            ActionChoice::Call(_) => Self::Call,
            ActionChoice::Check => Self::Check,
            ActionChoice::Fold => Self::Fold,
            ActionChoice::Raise(amount) => Self::Raise(Some(amount)),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    pub fn contains(&self, action: &Action) -> bool {
        let action_choice: ActionChoice = match action {
            Action::AllIn => ActionChoice::AllIn,
            Action::Call => ActionChoice::Call(0),
            Action::Check => ActionChoice::Check,
            Action::Fold => ActionChoice::Fold,
            Action::Raise(_) => ActionChoice::Raise(0),
        };
        self.0.contains(&action_choice)
    }

    /// Amount the player owes to stay in, if calling is on offer.
    #[must_use]
    pub fn call_amount(&self) -> Option<Usd> {
        self.0.iter().find_map(|choice| match choice {
            ActionChoice::Call(amount) => Some(*amount),
            _ => None,
        })
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_options = self.0.len();
        let repr = self
            .0
            .iter()
            .enumerate()
            .map(|(i, action_choice)| {
                let repr = action_choice.to_string();
                match i {
                    0 if num_options == 1 => repr,
                    0 if num_options == 2 => format!("{repr} "),
                    0 if num_options >= 3 => format!("{repr}, "),
                    i if i == num_options - 1 && num_options != 1 => format!("or {repr}"),
                    _ => format!("{repr}, "),
                }
            })
            .collect::<String>();
        write!(f, "{repr}")
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect::<HashSet<_>>())
    }
}

/// Tag of the last bet action a player took in the current stage.
/// `Fold` and `AllIn` stick for the rest of the round.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BetAction {
    #[default]
    None,
    Call,
    Raise,
    Check,
    Fold,
    AllIn,
}

impl fmt::Display for BetAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::None => "waiting",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::Check => "check",
            Self::Fold => "folded",
            Self::AllIn => "all-in",
        };
        write!(f, "{repr:7}")
    }
}

/// The result of applying an action: which tag it resolved to and how
/// many chips moved from the stack into the pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Bet {
    pub action: BetAction,
    pub amount: Usd,
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let amount = self.amount;
        let repr = match self.action {
            BetAction::None => format!("blind of ${amount}"),
            BetAction::Call => format!("call of ${amount}"),
            BetAction::Raise => format!("raise of ${amount}"),
            BetAction::Check => "check".to_string(),
            BetAction::Fold => "fold".to_string(),
            BetAction::AllIn => format!("all-in of ${amount}"),
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: Username,
    pub stack: Usd,
    /// Chips put in during the current stage.
    pub bet: Usd,
    pub bet_action: BetAction,
    pub cards: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: Username, stack: Usd) -> Self {
        Self {
            id,
            name,
            stack,
            bet: 0,
            bet_action: BetAction::None,
            cards: Vec::with_capacity(constants::NUM_POCKET_CARDS),
        }
    }

    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.bet_action == BetAction::Fold
    }

    #[must_use]
    pub fn is_all_in(&self) -> bool {
        self.bet_action == BetAction::AllIn
    }

    /// Whether the player still makes decisions this round.
    #[must_use]
    pub fn can_act(&self) -> bool {
        !self.is_folded() && !self.is_all_in()
    }

    pub fn reset(&mut self) {
        self.bet = 0;
        self.bet_action = BetAction::None;
        self.cards.clear();
    }
}

/// One winner of a finished round.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WinnerRecord {
    pub player: PlayerId,
    #[serde(deserialize_with = "deserialize_username")]
    pub name: Username,
    pub amount: Usd,
    /// Winning hand, absent when everyone else folded or left.
    pub hand: Option<String>,
}

impl fmt::Display for WinnerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hand {
            Some(hand) => write!(f, "{} won ${} with {hand}", self.name, self.amount),
            None => write!(f, "{} won ${}", self.name, self.amount),
        }
    }
}

/// Players waiting for a seat, in arrival order.
pub type Waitlist = VecDeque<Player>;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_card_codes_cover_the_deck() {
        let deck = Deck::default();
        let codes = deck.codes();
        assert_eq!(codes.len(), DECK_SIZE);
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(usize::from(*code), i);
        }
    }

    #[test]
    fn test_card_from_code() {
        assert_eq!(Card::from_code(0), Some(Card(2, Suit::Club)));
        assert_eq!(Card::from_code(51), Some(Card(ACE, Suit::Heart)));
        assert_eq!(Card::from_code(52), None);
        let card = Card(12, Suit::Diamond);
        assert_eq!(Card::from_code(card.code()), Some(card));
    }

    #[test]
    fn test_card_new_rejects_out_of_range_values() {
        assert_eq!(Card::new(1, Suit::Club), None);
        assert_eq!(Card::new(0, Suit::Heart), None);
        assert_eq!(Card::new(15, Suit::Spade), None);
        assert_eq!(Card::new(MIN_VALUE, Suit::Club).map(|c| c.code()), Some(0));
        assert_eq!(Card::new(ACE, Suit::Heart).map(|c| c.code()), Some(51));
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card(ACE, Suit::Spade).to_string(), " A/♠");
        assert_eq!(Card(10, Suit::Heart).to_string(), "10/♥");
    }

    #[test]
    fn test_deck_deal_cards() {
        let mut deck = Deck::default();
        let cards = deck.deal_cards(5).unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(deck.deck_idx, 5);
        assert_eq!(deck.remaining(), DECK_SIZE - 5);
    }

    #[test]
    fn test_deck_exhausted() {
        let mut deck = Deck::default();
        deck.deal_cards(DECK_SIZE).unwrap();
        assert_eq!(deck.deal_card(), Err(DeckError::Exhausted));
        assert_eq!(deck.deal_cards(1), Err(DeckError::Exhausted));
    }

    #[test]
    fn test_shuffled_deck_rebuilds_from_codes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::shuffled(&mut rng);
        let mut replay = Deck::from_codes(&deck.codes()).unwrap();
        assert_eq!(deck.deal_cards(9).unwrap(), replay.deal_cards(9).unwrap());
    }

    #[test]
    fn test_deck_from_codes_rejects_bad_input() {
        assert_eq!(Deck::from_codes(&[0, 1]), Err(DeckError::InvalidSize(2)));

        let mut codes = Deck::default().codes();
        codes[3] = 60;
        assert_eq!(Deck::from_codes(&codes), Err(DeckError::InvalidCode(60)));

        let mut codes = Deck::default().codes();
        codes[3] = 4;
        assert_eq!(Deck::from_codes(&codes), Err(DeckError::DuplicateCard(4)));
    }

    #[test]
    fn test_username_sanitizes_whitespace() {
        let username = Username::new("big slick");
        assert_eq!(username.as_str(), "big_slick");
    }

    #[test]
    fn test_username_truncates() {
        let username = Username::new(&"x".repeat(100));
        assert_eq!(username.as_str().len(), constants::MAX_USER_INPUT_LENGTH / 2);
    }

    #[test]
    fn test_action_choices_contains_ignores_amounts() {
        let choices = ActionChoices::from([ActionChoice::Call(20), ActionChoice::Fold]);
        assert!(choices.contains(&Action::Call));
        assert!(choices.contains(&Action::Fold));
        assert!(!choices.contains(&Action::Check));
        assert_eq!(choices.call_amount(), Some(20));
    }

    #[test]
    fn test_player_can_act() {
        let mut player = Player::new(1, "alice".into(), 100);
        assert!(player.can_act());
        player.bet_action = BetAction::AllIn;
        assert!(!player.can_act());
        player.bet_action = BetAction::Fold;
        assert!(!player.can_act());
        player.reset();
        assert!(player.can_act());
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::HighCard < Rank::OnePair);
        assert!(Rank::Flush < Rank::FullHouse);
        assert!(Rank::FourOfAKind < Rank::StraightFlush);
    }

    #[test]
    fn test_subhand_comparison() {
        let pair_aces = SubHand {
            rank: Rank::OnePair,
            values: vec![14, 13, 12, 11],
        };
        let pair_kings = SubHand {
            rank: Rank::OnePair,
            values: vec![13, 14, 12, 11],
        };
        let two_pair = SubHand {
            rank: Rank::TwoPair,
            values: vec![5, 4, 3],
        };
        assert!(pair_aces > pair_kings);
        assert!(two_pair > pair_aces);
    }

    #[test]
    fn test_winner_record_display() {
        let record = WinnerRecord {
            player: 3,
            name: "carol".into(),
            amount: 40,
            hand: Some("flush (A K 9 7 2)".to_string()),
        };
        assert_eq!(record.to_string(), "carol won $40 with flush (A K 9 7 2)");
    }
}
