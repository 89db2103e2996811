use std::cmp::Ordering;

use super::{
    constants::NUM_SHOWDOWN_CARDS,
    entities::{Card, Player, SeatIndex, SubHand},
    functional::HandEvaluator,
    round::RoundError,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ShowdownResult {
    /// Winning seats in showdown order.
    pub winners: Vec<SeatIndex>,
    pub hand: SubHand,
}

/// Compare every hand in `order` and keep the best. The first candidate
/// seeds the winner set, a better hand replaces it and an equal hand
/// joins it. Seats that emptied since `order` was computed are skipped.
pub fn resolve_showdown(
    order: &[SeatIndex],
    seats: &[Option<Player>],
    board: &[Card],
    evaluator: &dyn HandEvaluator,
) -> Result<ShowdownResult, RoundError> {
    let mut best: Option<(Vec<SeatIndex>, SubHand)> = None;
    for &idx in order {
        let Some(player) = seats.get(idx).and_then(Option::as_ref) else {
            continue;
        };
        let mut cards = Vec::with_capacity(NUM_SHOWDOWN_CARDS);
        cards.extend_from_slice(&player.cards);
        cards.extend_from_slice(board);
        let hand = evaluator.best_hand(&cards);
        log::debug!("seat {idx} ({}) shows {hand}", player.name);

        best = match best.take() {
            None => Some((vec![idx], hand)),
            Some((mut winners, current)) => match hand.cmp(&current) {
                Ordering::Greater => Some((vec![idx], hand)),
                Ordering::Equal => {
                    winners.push(idx);
                    Some((winners, current))
                }
                Ordering::Less => Some((winners, current)),
            },
        };
    }

    match best {
        Some((winners, hand)) if !winners.is_empty() => Ok(ShowdownResult { winners, hand }),
        _ => Err(RoundError::EmptyWinnerSet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        entities::{Rank, Suit},
        functional::SubHandEvaluator,
    };

    fn player(id: u64, cards: [Card; 2]) -> Option<Player> {
        let mut player = Player::new(id, "p".into(), 100);
        player.cards = cards.to_vec();
        Some(player)
    }

    fn board() -> Vec<Card> {
        vec![
            Card(2, Suit::Club),
            Card(7, Suit::Diamond),
            Card(9, Suit::Heart),
            Card(12, Suit::Spade),
            Card(4, Suit::Heart),
        ]
    }

    #[test]
    fn test_best_hand_wins() {
        let seats = vec![
            player(1, [Card(14, Suit::Spade), Card(3, Suit::Club)]),
            player(2, [Card(12, Suit::Heart), Card(12, Suit::Club)]),
        ];
        let result = resolve_showdown(&[0, 1], &seats, &board(), &SubHandEvaluator).unwrap();
        assert_eq!(result.winners, vec![1]);
        assert_eq!(result.hand.rank, Rank::ThreeOfAKind);
    }

    #[test]
    fn test_board_plays_for_a_tie() {
        let seats = vec![
            player(1, [Card(3, Suit::Spade), Card(5, Suit::Club)]),
            player(2, [Card(3, Suit::Heart), Card(5, Suit::Diamond)]),
        ];
        let result = resolve_showdown(&[1, 0], &seats, &board(), &SubHandEvaluator).unwrap();
        assert_eq!(result.winners, vec![1, 0]);
    }

    #[test]
    fn test_empty_seats_are_skipped() {
        let seats = vec![None, player(2, [Card(3, Suit::Heart), Card(5, Suit::Diamond)])];
        let result = resolve_showdown(&[0, 1], &seats, &board(), &SubHandEvaluator).unwrap();
        assert_eq!(result.winners, vec![1]);
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let seats: Vec<Option<Player>> = vec![None, None];
        assert_eq!(
            resolve_showdown(&[0, 1], &seats, &board(), &SubHandEvaluator),
            Err(RoundError::EmptyWinnerSet)
        );
    }
}
