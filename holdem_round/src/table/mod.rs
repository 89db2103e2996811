//! Table module running each table as an async actor.
//!
//! This module implements:
//! - TableActor: the authority for one table's rounds
//! - TableManager: spawns and tracks table actors
//! - Message-based communication with tokio channels
//! - Table configuration and the restart timer between rounds
//!
//! ## Architecture
//!
//! Each table runs in a separate Tokio task with an mpsc message inbox.
//! Round transitions are pushed to subscribers as
//! [`RoundEvent`](crate::game::events::RoundEvent)s over unbounded
//! channels.
//!
//! ## Example
//!
//! ```no_run
//! use holdem_round::table::{TableActor, TableConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = TableActor::new(1, TableConfig::default());
//!     let task = tokio::spawn(actor.run());
//!
//!     let mut events = handle.subscribe(100).await.unwrap();
//!     handle.sit(1, "alice", 1_000).await.unwrap();
//!     handle.sit(2, "bob", 1_000).await.unwrap();
//!     while let Some(event) = events.recv().await {
//!         println!("{event}");
//!     }
//!     let _ = task.await;
//! }
//! ```

pub mod actor;
pub mod broadcast;
pub mod config;
pub mod lifecycle;
pub mod manager;
pub mod messages;

/// Identifier of a table within one process.
pub type TableId = u64;

pub use actor::{TableActor, TableError, TableHandle, TableParts};
pub use broadcast::{Broadcaster, SubscriberBroadcaster};
pub use config::{ConfigError, TableConfig, TableSpeed};
pub use lifecycle::{RestartPhase, RestartTimer};
pub use manager::{TableManager, TableMetadata};
pub use messages::{SeatView, TableMessage, TableResponse, TableStateResponse};
