//! Hand Evaluation Example
//!
//! Deals a seeded round for four players and ranks every hand against
//! the board the same way the table does at showdown.

use holdem_round::{
    entities::{Deck, Player},
    functional::{SubHandEvaluator, argmax, eval},
    game::{Round, resolve_showdown},
};
use rand::{SeedableRng, rngs::StdRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut deck = Deck::shuffled(&mut rng);
    let mut round = Round::new();
    let pockets = round.start(uuid::Uuid::nil(), &mut deck, 4)?;

    while let Ok(advance) = round.advance() {
        let shown: Vec<String> = advance.revealed.iter().map(ToString::to_string).collect();
        println!("{:>9}: {}", advance.stage.to_string(), shown.join(" "));
    }

    let board = round.board().to_vec();
    let mut seats = Vec::new();
    let mut hands = Vec::new();
    for (i, cards) in pockets.iter().enumerate() {
        let mut all = cards.to_vec();
        all.extend_from_slice(&board);
        let hand = eval(&all);
        println!("player {i}: {}{} -> {hand}", cards[0], cards[1]);
        hands.push(hand);

        let mut player = Player::new(i as u64, format!("player{i}").into(), 1000);
        player.cards = cards.to_vec();
        seats.push(Some(player));
    }

    println!("\nargmax: {:?}", argmax(&hands));

    let order: Vec<usize> = (0..seats.len()).collect();
    let result = resolve_showdown(&order, &seats, &board, &SubHandEvaluator)?;
    println!("showdown winners: {:?} with {}", result.winners, result.hand);
    Ok(())
}
