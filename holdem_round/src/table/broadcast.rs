use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::game::{entities::PlayerId, events::RoundEvent};

/// Pushes every transition to the table's subscribers.
pub trait Broadcaster: Send {
    fn subscribe(&mut self, observer: PlayerId, sender: mpsc::UnboundedSender<RoundEvent>);

    fn unsubscribe(&mut self, observer: PlayerId);

    fn broadcast(&mut self, event: &RoundEvent);

    fn num_subscribers(&self) -> usize;
}

/// Fans events out over unbounded channels. Each subscriber sees events
/// in the order they were broadcast; a subscriber whose receiver is gone
/// is dropped on the next broadcast.
#[derive(Debug, Default)]
pub struct SubscriberBroadcaster {
    subscribers: HashMap<PlayerId, mpsc::UnboundedSender<RoundEvent>>,
}

impl SubscriberBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Broadcaster for SubscriberBroadcaster {
    fn subscribe(&mut self, observer: PlayerId, sender: mpsc::UnboundedSender<RoundEvent>) {
        if self.subscribers.insert(observer, sender).is_some() {
            log::debug!("Observer {observer} re-subscribed");
        }
    }

    fn unsubscribe(&mut self, observer: PlayerId) {
        self.subscribers.remove(&observer);
    }

    fn broadcast(&mut self, event: &RoundEvent) {
        self.subscribers.retain(|observer, sender| {
            if sender.send(event.clone()).is_ok() {
                true
            } else {
                log::debug!("Subscriber {observer} disconnected, removing");
                false
            }
        });
    }

    fn num_subscribers(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::stage::Stage;

    #[test]
    fn test_events_arrive_in_order() {
        let mut broadcaster = SubscriberBroadcaster::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        broadcaster.subscribe(1, tx);
        broadcaster.broadcast(&RoundEvent::StageEnded {
            stage: Stage::Preflop,
        });
        broadcaster.broadcast(&RoundEvent::StageEnded { stage: Stage::Flop });
        assert_eq!(
            rx.try_recv().unwrap(),
            RoundEvent::StageEnded {
                stage: Stage::Preflop
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            RoundEvent::StageEnded { stage: Stage::Flop }
        );
    }

    #[test]
    fn test_closed_subscriber_is_dropped() {
        let mut broadcaster = SubscriberBroadcaster::new();
        let (tx, rx) = mpsc::unbounded_channel();
        broadcaster.subscribe(1, tx);
        drop(rx);
        broadcaster.broadcast(&RoundEvent::PlayerLeft { player: 1 });
        assert_eq!(broadcaster.num_subscribers(), 0);
    }
}
