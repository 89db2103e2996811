/// Property-based tests for hand evaluation and dealing using proptest
///
/// These tests verify that hand ranking and the deck behave across a wide
/// range of randomly generated cards and seeds.
use holdem_round::game::{
    Round,
    entities::{ACE, Card, Deck, MIN_VALUE, Rank, SubHand, Suit},
    functional::{HandEvaluator, SubHandEvaluator, argmax, eval},
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;

// Strategy to generate a valid card (values 2-14, aces are value 14)
fn card_strategy() -> impl Strategy<Value = Card> {
    (MIN_VALUE..=ACE, 0usize..4).prop_map(|(value, suit)| Card(value, Suit::ALL[suit]))
}

// Strategy to generate a vec of unique cards (no duplicates)
fn unique_cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), min..=max).prop_filter("Cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

fn five_card_hand_strategy() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_strategy(5, 5)
}

// Texas Hold'em: 2 pocket + 5 board
fn seven_card_hand_strategy() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_strategy(7, 7)
}

fn suit_strategy() -> impl Strategy<Value = Suit> {
    (0usize..4).prop_map(|idx| Suit::ALL[idx])
}

proptest! {
    #[test]
    fn test_eval_always_returns_valid_hand(cards in seven_card_hand_strategy()) {
        let hand = eval(&cards);

        prop_assert!(!hand.values.is_empty(), "eval() should describe the hand");
        prop_assert!(hand.values.len() <= 5, "eval() uses at most 5 cards");
        prop_assert!(hand.values.iter().all(|v| (MIN_VALUE..=ACE).contains(v)));
    }

    #[test]
    fn test_eval_handles_pocket_cards_only(cards in unique_cards_strategy(2, 2)) {
        let hand = eval(&cards);
        prop_assert!(hand.rank == Rank::HighCard || hand.rank == Rank::OnePair);
    }

    #[test]
    fn test_eval_ignores_card_order(cards in seven_card_hand_strategy()) {
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(eval(&cards), eval(&reversed));
    }

    #[test]
    fn test_evaluator_matches_eval(cards in seven_card_hand_strategy()) {
        prop_assert_eq!(SubHandEvaluator.best_hand(&cards), eval(&cards));
    }

    #[test]
    fn test_more_cards_never_hurt(cards in seven_card_hand_strategy()) {
        let five = eval(&cards[..5]);
        let seven = eval(&cards);
        prop_assert!(seven >= five, "{} should not lose to {}", seven, five);
    }

    #[test]
    fn test_argmax_single_hand_returns_zero(cards in five_card_hand_strategy()) {
        prop_assert_eq!(argmax(&[eval(&cards)]), vec![0]);
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in five_card_hand_strategy()) {
        let hand = eval(&cards);
        let winners = argmax(&[hand.clone(), hand.clone(), hand]);
        prop_assert_eq!(winners, vec![0, 1, 2], "Identical hands should all win");
    }

    #[test]
    fn test_argmax_returns_valid_indices(
        hands in prop::collection::vec(five_card_hand_strategy(), 2..=10)
    ) {
        let evaluated: Vec<SubHand> = hands.iter().map(|h| eval(h)).collect();
        let winners = argmax(&evaluated);

        prop_assert!(!winners.is_empty(), "argmax should return at least one winner");

        // Indices should be sorted and unique
        let mut sorted_winners = winners.clone();
        sorted_winners.sort();
        sorted_winners.dedup();
        prop_assert_eq!(&winners, &sorted_winners);

        let best = &evaluated[winners[0]];
        for (i, hand) in evaluated.iter().enumerate() {
            if winners.contains(&i) {
                prop_assert_eq!(hand, best);
            } else {
                prop_assert!(hand < best);
            }
        }
    }

    /// Test that comparison is transitive: if A > B and B > C, then A > C
    #[test]
    fn test_hand_comparison_transitive(
        cards1 in seven_card_hand_strategy(),
        cards2 in seven_card_hand_strategy(),
        cards3 in seven_card_hand_strategy()
    ) {
        let hand1 = eval(&cards1);
        let hand2 = eval(&cards2);
        let hand3 = eval(&cards3);

        if argmax(&[hand1.clone(), hand2.clone()]) == vec![0]
            && argmax(&[hand2, hand3.clone()]) == vec![0]
        {
            prop_assert_eq!(argmax(&[hand1, hand3]), vec![0]);
        }
    }
}

// Specific property tests for hand rankings

proptest! {
    #[test]
    fn test_royal_flush_beats_four_kind(suit in suit_strategy()) {
        let royal_flush = vec![
            Card(14, suit),
            Card(10, suit),
            Card(11, suit),
            Card(12, suit),
            Card(13, suit),
        ];
        let four_kind = vec![
            Card(9, Suit::Club),
            Card(9, Suit::Diamond),
            Card(9, Suit::Heart),
            Card(9, Suit::Spade),
            Card(8, suit),
        ];

        let royal = eval(&royal_flush);
        prop_assert_eq!(royal.rank, Rank::StraightFlush);
        prop_assert_eq!(argmax(&[royal, eval(&four_kind)]), vec![0]);
    }

    #[test]
    fn test_wheel_straight_flush_loses_to_six_high(suit in suit_strategy()) {
        let wheel = vec![Card(14, suit), Card(2, suit), Card(3, suit), Card(4, suit), Card(5, suit)];
        let six_high = vec![Card(2, suit), Card(3, suit), Card(4, suit), Card(5, suit), Card(6, suit)];

        let wheel = eval(&wheel);
        prop_assert_eq!(&wheel.values, &vec![5]);
        prop_assert_eq!(argmax(&[wheel, eval(&six_high)]), vec![1]);
    }

    #[test]
    fn test_four_kind_beats_full_house(quad_value in 2u8..=14, trip_value in 2u8..=14) {
        prop_assume!(quad_value != trip_value);

        let four_kind = vec![
            Card(quad_value, Suit::Club),
            Card(quad_value, Suit::Diamond),
            Card(quad_value, Suit::Heart),
            Card(quad_value, Suit::Spade),
            Card(trip_value, Suit::Club),
        ];
        let full_house = vec![
            Card(trip_value, Suit::Club),
            Card(trip_value, Suit::Diamond),
            Card(trip_value, Suit::Heart),
            Card(quad_value, Suit::Club),
            Card(quad_value, Suit::Diamond),
        ];

        prop_assert_eq!(argmax(&[eval(&four_kind), eval(&full_house)]), vec![0]);
    }

    #[test]
    fn test_flush_beats_straight(suit in suit_strategy()) {
        // 2-5-8-10-K is not a straight
        let flush = vec![Card(2, suit), Card(5, suit), Card(8, suit), Card(10, suit), Card(13, suit)];
        let straight = vec![
            Card(7, Suit::Club),
            Card(8, Suit::Diamond),
            Card(9, Suit::Heart),
            Card(10, Suit::Spade),
            Card(11, Suit::Club),
        ];

        prop_assert_eq!(argmax(&[eval(&flush), eval(&straight)]), vec![0]);
    }

    #[test]
    fn test_three_kind_beats_two_pair(trip_value in 2u8..=14, pair1 in 2u8..=14, pair2 in 2u8..=14) {
        prop_assume!(trip_value != pair1 && trip_value != pair2 && pair1 != pair2);

        let three_kind = vec![
            Card(trip_value, Suit::Club),
            Card(trip_value, Suit::Diamond),
            Card(trip_value, Suit::Heart),
            Card(pair1, Suit::Club),
            Card(pair2, Suit::Diamond),
        ];
        let two_pair = vec![
            Card(pair1, Suit::Club),
            Card(pair1, Suit::Diamond),
            Card(pair2, Suit::Heart),
            Card(pair2, Suit::Spade),
            Card(trip_value, Suit::Club),
        ];

        prop_assert_eq!(argmax(&[eval(&three_kind), eval(&two_pair)]), vec![0]);
    }

    #[test]
    fn test_higher_kicker_breaks_pair_tie(kicker in 3u8..=12) {
        // A pair of twos at the bottom of `low` would change the rank.
        prop_assume!(kicker - 1 != 2);

        let low = vec![
            Card(13, Suit::Club),
            Card(13, Suit::Diamond),
            Card(kicker - 1, Suit::Heart),
            Card(14, Suit::Spade),
            Card(2, Suit::Club),
        ];
        let high = vec![
            Card(13, Suit::Heart),
            Card(13, Suit::Spade),
            Card(kicker, Suit::Heart),
            Card(14, Suit::Club),
            Card(2, Suit::Diamond),
        ];
        prop_assert_eq!(argmax(&[eval(&low), eval(&high)]), vec![1]);
    }
}

// Dealing properties

proptest! {
    #[test]
    fn test_card_codes_are_a_bijection(card in card_strategy()) {
        prop_assert!(usize::from(card.code()) < 52);
        prop_assert_eq!(Card::from_code(card.code()), Some(card));
    }

    #[test]
    fn test_shuffled_deck_replays_from_codes(seed in any::<u64>()) {
        let deck = Deck::shuffled(&mut StdRng::seed_from_u64(seed));
        let codes = deck.codes();

        let unique: BTreeSet<u8> = codes.iter().copied().collect();
        prop_assert_eq!(unique.len(), 52);
        prop_assert_eq!(Deck::from_codes(&codes).unwrap().codes(), codes);
    }

    #[test]
    fn test_round_deals_distinct_cards(seed in any::<u64>(), players in 2usize..=10) {
        let mut deck = Deck::shuffled(&mut StdRng::seed_from_u64(seed));
        let mut round = Round::new();
        let pockets = round.start(uuid::Uuid::nil(), &mut deck, players).unwrap();
        prop_assert_eq!(pockets.len(), players);

        let mut board = Vec::new();
        while let Ok(advance) = round.advance() {
            board.extend(advance.revealed);
        }
        prop_assert_eq!(board.len(), 5);

        let dealt: BTreeSet<Card> = pockets.iter().flatten().chain(board.iter()).copied().collect();
        prop_assert_eq!(dealt.len(), players * 2 + 5);
    }
}
