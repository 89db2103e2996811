//! Hand evaluation. Pure functions over card slices, plus the
//! [`HandEvaluator`] seam the table uses at showdown.

use std::collections::BTreeMap;

use super::{
    constants::HAND_SIZE,
    entities::{ACE, Card, Rank, SubHand, Suit, Value},
};

/// Something that can rank a player's cards. The table only relies on
/// the total order of the returned [`SubHand`].
pub trait HandEvaluator: Send {
    fn best_hand(&self, cards: &[Card]) -> SubHand;
}

/// Default evaluator backed by [`eval`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SubHandEvaluator;

impl HandEvaluator for SubHandEvaluator {
    fn best_hand(&self, cards: &[Card]) -> SubHand {
        let mut hand = cards.to_vec();
        prepare_hand(&mut hand);
        eval(&hand)
    }
}

/// Sort cards high to low so evaluation output doesn't depend on the
/// order cards were dealt in.
pub fn prepare_hand(cards: &mut [Card]) {
    cards.sort_unstable_by(|a, b| b.cmp(a));
}

/// Highest straight in a set of distinct values, ace playing both high
/// and low. Returns the top card of the straight.
fn highest_straight(values: &[Value]) -> Option<Value> {
    let mut present = [false; ACE as usize + 1];
    for &value in values {
        present[usize::from(value)] = true;
        if value == ACE {
            present[1] = true;
        }
    }
    (5..=ACE).rev().find(|&high| (high - 4..=high).all(|v| present[usize::from(v)]))
}

fn top_values(values: impl Iterator<Item = Value>, n: usize) -> Vec<Value> {
    let mut values: Vec<Value> = values.collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values.truncate(n);
    values
}

/// Best hand that can be made from up to seven cards.
///
/// `values` holds the tie-break order: the defining groups first (quads,
/// trips, pairs, highest to lowest) and then the kickers, so two hands of
/// the same rank compare lexicographically.
pub fn eval(cards: &[Card]) -> SubHand {
    let mut by_suit: BTreeMap<Suit, Vec<Value>> = BTreeMap::new();
    let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
    for Card(value, suit) in cards {
        by_suit.entry(*suit).or_default().push(*value);
        *counts.entry(*value).or_default() += 1;
    }

    let flush = by_suit
        .values()
        .filter(|values| values.len() >= HAND_SIZE)
        .max_by_key(|values| top_values(values.iter().copied(), HAND_SIZE));
    if let Some(flush_values) = flush
        && let Some(high) = highest_straight(flush_values)
    {
        return SubHand {
            rank: Rank::StraightFlush,
            values: vec![high],
        };
    }

    // Groups ordered by size and then value, largest first.
    let mut groups: Vec<(usize, Value)> = counts.iter().map(|(v, c)| (*c, *v)).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let kickers = |used: &[Value], n: usize| -> Vec<Value> {
        top_values(
            counts.keys().copied().filter(|value| !used.contains(value)),
            n,
        )
    };

    if let Some(&(4, quad)) = groups.first() {
        let mut values = vec![quad];
        values.extend(kickers(&[quad], 1));
        return SubHand {
            rank: Rank::FourOfAKind,
            values,
        };
    }

    if let Some(&(3, trips)) = groups.first()
        && let Some(&(count, pair)) = groups.get(1)
        && count >= 2
    {
        return SubHand {
            rank: Rank::FullHouse,
            values: vec![trips, pair],
        };
    }

    if let Some(flush_values) = flush {
        return SubHand {
            rank: Rank::Flush,
            values: top_values(flush_values.iter().copied(), HAND_SIZE),
        };
    }

    let distinct: Vec<Value> = counts.keys().copied().collect();
    if let Some(high) = highest_straight(&distinct) {
        return SubHand {
            rank: Rank::Straight,
            values: vec![high],
        };
    }

    match groups.as_slice() {
        [(3, trips), ..] => {
            let mut values = vec![*trips];
            values.extend(kickers(&[*trips], 2));
            SubHand {
                rank: Rank::ThreeOfAKind,
                values,
            }
        }
        [(2, high), (2, low), ..] => {
            let mut values = vec![*high, *low];
            values.extend(kickers(&[*high, *low], 1));
            SubHand {
                rank: Rank::TwoPair,
                values,
            }
        }
        [(2, pair), ..] => {
            let mut values = vec![*pair];
            values.extend(kickers(&[*pair], 3));
            SubHand {
                rank: Rank::OnePair,
                values,
            }
        }
        _ => SubHand {
            rank: Rank::HighCard,
            values: kickers(&[], HAND_SIZE),
        },
    }
}

/// Indices of the best hands. Several indices mean a tie.
pub fn argmax(hands: &[SubHand]) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();
    for (i, hand) in hands.iter().enumerate() {
        match best.first().map(|&j| hand.cmp(&hands[j])) {
            None | Some(std::cmp::Ordering::Greater) => best = vec![i],
            Some(std::cmp::Ordering::Equal) => best.push(i),
            Some(std::cmp::Ordering::Less) => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use Suit::{Club as C, Diamond as D, Heart as H, Spade as S};

    fn hand(cards: &[(Value, Suit)]) -> SubHand {
        let cards: Vec<Card> = cards.iter().map(|(v, s)| Card(*v, *s)).collect();
        SubHandEvaluator.best_hand(&cards)
    }

    #[test]
    fn royal_flush() {
        let best = hand(&[(14, S), (13, S), (12, S), (11, S), (10, S), (2, H), (3, D)]);
        assert_eq!(best.rank, Rank::StraightFlush);
        assert_eq!(best.values, vec![14]);
    }

    #[test]
    fn wheel_straight() {
        let best = hand(&[(14, S), (2, H), (3, D), (4, C), (5, S), (9, H), (13, D)]);
        assert_eq!(best.rank, Rank::Straight);
        assert_eq!(best.values, vec![5]);
    }

    #[test]
    fn steel_wheel() {
        let best = hand(&[(14, H), (2, H), (3, H), (4, H), (5, H), (13, H)]);
        assert_eq!(best.rank, Rank::StraightFlush);
        assert_eq!(best.values, vec![5]);
    }

    #[test]
    fn flush_without_straight_flush() {
        let best = hand(&[(14, H), (9, H), (3, H), (4, H), (5, H), (6, S), (7, D)]);
        assert_eq!(best.rank, Rank::Flush);
        assert_eq!(best.values, vec![14, 9, 5, 4, 3]);
    }

    #[test]
    fn full_house_from_two_trips() {
        let best = hand(&[(9, H), (9, S), (9, D), (4, H), (4, S), (4, C), (2, D)]);
        assert_eq!(best.rank, Rank::FullHouse);
        assert_eq!(best.values, vec![9, 4]);
    }

    #[test]
    fn quads_with_kicker() {
        let best = hand(&[(7, H), (7, S), (7, D), (7, C), (13, S), (4, C), (2, D)]);
        assert_eq!(best.rank, Rank::FourOfAKind);
        assert_eq!(best.values, vec![7, 13]);
    }

    #[test]
    fn two_pair_uses_best_pairs() {
        let best = hand(&[(9, H), (9, S), (5, D), (5, C), (3, S), (3, C), (12, D)]);
        assert_eq!(best.rank, Rank::TwoPair);
        assert_eq!(best.values, vec![9, 5, 12]);
    }

    #[test]
    fn pocket_cards_alone() {
        let best = hand(&[(14, H), (14, S)]);
        assert_eq!(best.rank, Rank::OnePair);
        assert_eq!(best.values, vec![14]);
    }

    #[test]
    fn kicker_breaks_tie() {
        let a = hand(&[(14, H), (14, S), (13, D), (8, C), (4, S)]);
        let b = hand(&[(14, D), (14, C), (12, D), (8, H), (4, H)]);
        assert!(a > b);
        assert_eq!(argmax(&[b, a]), vec![1]);
    }

    #[test]
    fn argmax_reports_ties() {
        let a = hand(&[(10, H), (9, S), (8, D), (7, C), (6, S)]);
        let b = hand(&[(10, D), (9, C), (8, H), (7, S), (6, H)]);
        assert_eq!(argmax(&[a, b]), vec![0, 1]);
        assert!(argmax(&[]).is_empty());
    }

    #[test]
    fn display_names_the_rank() {
        let best = hand(&[(14, H), (14, S), (13, D), (8, C), (4, S)]);
        assert_eq!(best.to_string(), "one pair (A K 8 4)");
    }
}
