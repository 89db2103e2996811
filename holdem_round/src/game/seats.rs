use thiserror::Error;

use super::entities::{Player, PlayerId, SeatIndex, Waitlist};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SeatError {
    #[error("player {0} already joined")]
    AlreadyJoined(PlayerId),
    #[error("table is full")]
    TableFull,
}

/// Where a joining player ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Seating {
    Seated(SeatIndex),
    /// Position in the waitlist, starting at 0.
    Waitlisted(usize),
}

/// Where a leaving player was.
#[derive(Clone, Debug, PartialEq)]
pub enum Departure {
    Seated(SeatIndex, Player),
    Waiting(Player),
}

/// Seat occupancy for one table. Seats are nullable slots so indices stay
/// stable while players come and go.
pub trait SeatProvider: Send {
    fn as_slice(&self) -> &[Option<Player>];

    fn as_mut_slice(&mut self) -> &mut [Option<Player>];

    fn num_occupied(&self) -> usize;

    fn num_waiting(&self) -> usize;

    /// Seat a player right away, or queue them when a round is running.
    fn sit(&mut self, player: Player, round_active: bool) -> Result<Seating, SeatError>;

    fn leave(&mut self, id: PlayerId) -> Option<Departure>;

    /// Move waiting players into free seats, first come first served.
    fn promote_waiting(&mut self) -> Vec<(SeatIndex, PlayerId)>;

    /// Empty every seat whose player has no chips left.
    fn remove_broke(&mut self) -> Vec<Player>;

    fn find(&self, id: PlayerId) -> Option<SeatIndex>;

    fn waiting(&self) -> Vec<&Player>;

    fn get(&self, idx: SeatIndex) -> Option<&Player> {
        self.as_slice().get(idx).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, idx: SeatIndex) -> Option<&mut Player> {
        self.as_mut_slice().get_mut(idx).and_then(Option::as_mut)
    }

    /// Ids of every seated player.
    fn seated_ids(&self) -> Vec<PlayerId> {
        self.as_slice().iter().flatten().map(|p| p.id).collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Seats {
    seats: Vec<Option<Player>>,
    waitlist: Waitlist,
}

impl Seats {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            seats: vec![None; capacity],
            waitlist: Waitlist::new(),
        }
    }

    fn contains(&self, id: PlayerId) -> bool {
        self.find(id).is_some() || self.waitlist.iter().any(|p| p.id == id)
    }

    fn free_seat(&self) -> Option<SeatIndex> {
        self.seats.iter().position(Option::is_none)
    }
}

impl SeatProvider for Seats {
    fn as_slice(&self) -> &[Option<Player>] {
        &self.seats
    }

    fn as_mut_slice(&mut self) -> &mut [Option<Player>] {
        &mut self.seats
    }

    fn num_occupied(&self) -> usize {
        self.seats.iter().flatten().count()
    }

    fn num_waiting(&self) -> usize {
        self.waitlist.len()
    }

    fn sit(&mut self, player: Player, round_active: bool) -> Result<Seating, SeatError> {
        if self.contains(player.id) {
            return Err(SeatError::AlreadyJoined(player.id));
        }
        if self.num_occupied() + self.num_waiting() >= self.seats.len() {
            return Err(SeatError::TableFull);
        }
        match self.free_seat() {
            Some(idx) if !round_active => {
                self.seats[idx] = Some(player);
                Ok(Seating::Seated(idx))
            }
            _ => {
                self.waitlist.push_back(player);
                Ok(Seating::Waitlisted(self.waitlist.len() - 1))
            }
        }
    }

    fn leave(&mut self, id: PlayerId) -> Option<Departure> {
        if let Some(idx) = self.find(id) {
            return self.seats[idx]
                .take()
                .map(|player| Departure::Seated(idx, player));
        }
        let pos = self.waitlist.iter().position(|p| p.id == id)?;
        self.waitlist.remove(pos).map(Departure::Waiting)
    }

    fn promote_waiting(&mut self) -> Vec<(SeatIndex, PlayerId)> {
        let mut promoted = Vec::new();
        while let Some(idx) = self.free_seat() {
            let Some(player) = self.waitlist.pop_front() else {
                break;
            };
            promoted.push((idx, player.id));
            self.seats[idx] = Some(player);
        }
        promoted
    }

    fn remove_broke(&mut self) -> Vec<Player> {
        self.seats
            .iter_mut()
            .filter(|seat| seat.as_ref().is_some_and(|p| p.stack == 0))
            .filter_map(Option::take)
            .collect()
    }

    fn find(&self, id: PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|p| p.id == id))
    }

    fn waiting(&self) -> Vec<&Player> {
        self.waitlist.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, stack: u32) -> Player {
        Player::new(id, format!("p{id}").as_str().into(), stack)
    }

    #[test]
    fn test_sit_between_rounds_takes_a_seat() {
        let mut seats = Seats::new(3);
        assert_eq!(seats.sit(player(1, 100), false), Ok(Seating::Seated(0)));
        assert_eq!(seats.sit(player(2, 100), false), Ok(Seating::Seated(1)));
        assert_eq!(seats.num_occupied(), 2);
        assert_eq!(seats.find(2), Some(1));
    }

    #[test]
    fn test_sit_during_round_waits() {
        let mut seats = Seats::new(3);
        seats.sit(player(1, 100), false).unwrap();
        assert_eq!(seats.sit(player(2, 100), true), Ok(Seating::Waitlisted(0)));
        assert_eq!(seats.num_waiting(), 1);
        assert_eq!(seats.promote_waiting(), vec![(1, 2)]);
        assert_eq!(seats.num_waiting(), 0);
    }

    #[test]
    fn test_rejects_duplicates_and_overflow() {
        let mut seats = Seats::new(2);
        seats.sit(player(1, 100), false).unwrap();
        assert_eq!(
            seats.sit(player(1, 100), false),
            Err(SeatError::AlreadyJoined(1))
        );
        seats.sit(player(2, 100), true).unwrap();
        assert_eq!(seats.sit(player(3, 100), false), Err(SeatError::TableFull));
    }

    #[test]
    fn test_leave_empties_the_seat() {
        let mut seats = Seats::new(3);
        seats.sit(player(1, 100), false).unwrap();
        seats.sit(player(2, 100), false).unwrap();
        assert!(matches!(seats.leave(1), Some(Departure::Seated(0, _))));
        assert!(seats.get(0).is_none());
        assert_eq!(seats.get(1).map(|p| p.id), Some(2));
        assert_eq!(seats.leave(1), None);
    }

    #[test]
    fn test_leave_from_waitlist() {
        let mut seats = Seats::new(3);
        seats.sit(player(1, 100), true).unwrap();
        assert!(matches!(seats.leave(1), Some(Departure::Waiting(_))));
        assert_eq!(seats.num_waiting(), 0);
    }

    #[test]
    fn test_remove_broke() {
        let mut seats = Seats::new(3);
        seats.sit(player(1, 0), false).unwrap();
        seats.sit(player(2, 100), false).unwrap();
        let removed = seats.remove_broke();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, 1);
        assert_eq!(seats.seated_ids(), vec![2]);
    }
}
