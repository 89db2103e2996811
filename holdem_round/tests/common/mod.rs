//! Shared helpers for table integration tests.
#![allow(dead_code)]

use holdem_round::{
    RoundEvent, TableActor, TableConfig, TableError, TableHandle,
    entities::{Action, PlayerId},
    frame,
    game::Replica,
    table::{TableParts, TableResponse},
};
use tokio::{
    sync::mpsc::UnboundedReceiver,
    task::JoinHandle,
    time::{Duration, timeout},
};

/// Longer than any wait a table makes, so hitting it means the table hung.
pub const TIMEOUT: Duration = Duration::from_secs(3600);

pub const OBSERVER: PlayerId = 1000;

pub const BUY_IN: u32 = 1000;

pub fn test_config() -> TableConfig {
    TableConfig {
        name: "test table".to_string(),
        rng_seed: Some(7),
        ..TableConfig::default()
    }
}

pub struct TestTable {
    pub handle: TableHandle,
    pub events: UnboundedReceiver<RoundEvent>,
    pub task: JoinHandle<Result<(), TableError>>,
    /// Replays every event received, through the wire framing.
    pub replica: Replica,
}

pub async fn spawn_table(config: TableConfig) -> TestTable {
    let parts = TableParts::standard(&config);
    spawn_table_with_parts(config, parts).await
}

pub async fn spawn_table_with_parts(config: TableConfig, parts: TableParts) -> TestTable {
    let (actor, handle) = TableActor::with_parts(1, config, parts);
    let task = tokio::spawn(actor.run());
    let events = handle.subscribe(OBSERVER).await.unwrap();
    TestTable {
        handle,
        events,
        task,
        replica: Replica::new(),
    }
}

impl TestTable {
    /// Seat players `1..=n` with the default buy-in.
    pub async fn seat_players(&self, n: PlayerId) {
        for id in 1..=n {
            let response = self.handle.sit(id, &format!("p{id}"), BUY_IN).await.unwrap();
            assert_eq!(response, TableResponse::Success);
        }
    }

    pub async fn next_event(&mut self) -> RoundEvent {
        let event = timeout(TIMEOUT, self.events.recv())
            .await
            .expect("table went quiet")
            .expect("table dropped its subscribers");
        let frame = frame::encode_frame(&event).unwrap();
        let (decoded, _) = frame::decode_frame::<RoundEvent>(&frame).unwrap();
        self.replica.apply(&decoded).unwrap();
        event
    }

    /// Skip events until one matches, returning it.
    pub async fn next_matching(&mut self, matches: impl Fn(&RoundEvent) -> bool) -> RoundEvent {
        loop {
            let event = self.next_event().await;
            if matches(&event) {
                return event;
            }
        }
    }

    /// Check when possible and call otherwise.
    pub async fn act_passively(&self, event: &RoundEvent) {
        if let RoundEvent::ActionRequested {
            player, choices, ..
        } = event
        {
            let action = if choices.contains(&Action::Check) {
                Action::Check
            } else {
                Action::Call
            };
            let response = self.handle.take_action(*player, action).await.unwrap();
            assert_eq!(response, TableResponse::Success);
        }
    }

    /// Play passively until the current round ends, returning every event
    /// seen along the way.
    pub async fn play_round(&mut self) -> Vec<RoundEvent> {
        let mut seen = Vec::new();
        loop {
            let event = self.next_event().await;
            self.act_passively(&event).await;
            let done = matches!(event, RoundEvent::RoundEnded { .. });
            seen.push(event);
            if done {
                return seen;
            }
        }
    }
}
