use super::entities::{Player, SeatIndex};

/// Produces the seat orders each stage iterates over. Orders only ever
/// contain occupied seats.
pub trait TurnSequencer: Send {
    fn move_button(&mut self, seats: &[Option<Player>]);

    fn button(&self) -> Option<SeatIndex>;

    /// Occupied seats starting left of the button, button last.
    fn dealing_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex>;

    fn preflop_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex>;

    fn postflop_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex>;

    fn showdown_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex>;
}

/// Classic dealer button rotation. The two seats after the button post
/// the blinds and pre-flop action starts after the big blind.
#[derive(Clone, Debug, Default)]
pub struct ButtonSequencer {
    button: Option<SeatIndex>,
}

impl ButtonSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn occupied_after(seats: &[Option<Player>], start: SeatIndex) -> Vec<SeatIndex> {
        let n = seats.len();
        (1..=n)
            .map(|offset| (start + offset) % n)
            .filter(|&idx| seats[idx].is_some())
            .collect()
    }
}

impl TurnSequencer for ButtonSequencer {
    fn move_button(&mut self, seats: &[Option<Player>]) {
        if seats.is_empty() {
            return;
        }
        let start = self.button.unwrap_or(seats.len() - 1);
        self.button = Self::occupied_after(seats, start).first().copied();
    }

    fn button(&self) -> Option<SeatIndex> {
        self.button
    }

    fn dealing_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex> {
        match self.button {
            Some(button) if !seats.is_empty() => Self::occupied_after(seats, button),
            _ => Vec::new(),
        }
    }

    fn preflop_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex> {
        let mut order = self.dealing_order(seats);
        if order.len() > 2 {
            order.rotate_left(2);
        }
        order
    }

    fn postflop_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex> {
        self.dealing_order(seats)
    }

    fn showdown_order(&self, seats: &[Option<Player>]) -> Vec<SeatIndex> {
        self.dealing_order(seats)
            .into_iter()
            .filter(|&idx| seats[idx].as_ref().is_some_and(|p| !p.is_folded()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::BetAction;

    fn seats(occupied: &[bool]) -> Vec<Option<Player>> {
        occupied
            .iter()
            .enumerate()
            .map(|(i, taken)| taken.then(|| Player::new(i as u64, "p".into(), 100)))
            .collect()
    }

    #[test]
    fn test_button_moves_to_next_occupied_seat() {
        let seats = seats(&[false, true, false, true, true]);
        let mut sequencer = ButtonSequencer::new();
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), Some(1));
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), Some(3));
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), Some(4));
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), Some(1));
    }

    #[test]
    fn test_orders() {
        let seats = seats(&[true, true, false, true, true]);
        let mut sequencer = ButtonSequencer::new();
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), Some(0));
        assert_eq!(sequencer.dealing_order(&seats), vec![1, 3, 4, 0]);
        assert_eq!(sequencer.preflop_order(&seats), vec![4, 0, 1, 3]);
        assert_eq!(sequencer.postflop_order(&seats), vec![1, 3, 4, 0]);
    }

    #[test]
    fn test_heads_up_preflop_order_matches_dealing_order() {
        let seats = seats(&[true, true]);
        let mut sequencer = ButtonSequencer::new();
        sequencer.move_button(&seats);
        assert_eq!(sequencer.preflop_order(&seats), vec![1, 0]);
    }

    #[test]
    fn test_showdown_order_skips_folded() {
        let mut seats = seats(&[true, true, true]);
        if let Some(player) = seats[2].as_mut() {
            player.bet_action = BetAction::Fold;
        }
        let mut sequencer = ButtonSequencer::new();
        sequencer.move_button(&seats);
        assert_eq!(sequencer.showdown_order(&seats), vec![1, 0]);
    }

    #[test]
    fn test_empty_table_has_no_orders() {
        let seats = seats(&[false, false]);
        let mut sequencer = ButtonSequencer::new();
        sequencer.move_button(&seats);
        assert_eq!(sequencer.button(), None);
        assert!(sequencer.dealing_order(&seats).is_empty());
    }
}
