//! Table actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::game::{
    entities::{Action, PlayerId, SeatIndex, Usd},
    events::RoundEvent,
};

use super::TableId;

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Take a seat, or join the waitlist while a round is running
    Sit {
        player: PlayerId,
        name: String,
        buy_in: Usd,
        response: oneshot::Sender<TableResponse>,
    },

    /// Leave the table (mid-round leaves forfeit chips in the pot)
    Leave {
        player: PlayerId,
        response: oneshot::Sender<TableResponse>,
    },

    /// Player action (fold, check, call, raise, all-in)
    TakeAction {
        player: PlayerId,
        action: Action,
        response: oneshot::Sender<TableResponse>,
    },

    /// Get current table state
    GetState {
        response: oneshot::Sender<TableStateResponse>,
    },

    /// Subscribe to round events
    Subscribe {
        observer: PlayerId,
        sender: mpsc::UnboundedSender<RoundEvent>,
    },

    /// Unsubscribe from round events
    Unsubscribe { observer: PlayerId },

    /// Close table
    Close {
        response: oneshot::Sender<TableResponse>,
    },
}

/// Response from table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableResponse {
    /// Operation succeeded
    Success,

    /// Operation succeeded with message
    SuccessWithMessage(String),

    /// Operation failed
    Error(String),

    /// Table is full
    TableFull,

    /// Not your turn
    NotYourTurn,

    /// Invalid action for current game state
    InvalidAction(String),

    /// Player not at table
    NotAtTable,
}

/// One occupied seat in a state snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub player: PlayerId,
    pub name: String,
    pub stack: Usd,
    pub bet: Usd,
    pub action: String,
}

/// Table state response
#[derive(Debug, Clone, Serialize)]
pub struct TableStateResponse {
    /// Table ID
    pub table_id: TableId,

    /// Table name
    pub table_name: String,

    /// Current player count
    pub player_count: usize,

    /// Maximum players
    pub max_players: usize,

    /// Waitlist count
    pub waitlist_count: usize,

    /// Event subscriber count
    pub subscriber_count: usize,

    /// Small blind
    pub small_blind: Usd,

    /// Big blind
    pub big_blind: Usd,

    /// Current pot size
    pub pot_size: Usd,

    /// Is a round being played
    pub is_active: bool,

    /// Current stage
    pub stage: String,

    /// Community cards
    pub board: Vec<String>,

    /// Button seat, once a round has been dealt
    pub button: Option<SeatIndex>,

    /// Seated players
    pub players: Vec<SeatView>,

    /// Rounds finished at this table
    pub hands_played: u32,

    /// Table speed
    pub speed: String,
}

impl TableResponse {
    /// Check if response is success
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TableResponse::Success | TableResponse::SuccessWithMessage(_)
        )
    }

    /// Get error message if response is error
    pub fn error_message(&self) -> Option<String> {
        match self {
            TableResponse::Error(msg) => Some(msg.clone()),
            TableResponse::TableFull => Some("Table is full".to_string()),
            TableResponse::NotYourTurn => Some("Not your turn".to_string()),
            TableResponse::InvalidAction(msg) => Some(format!("Invalid action: {}", msg)),
            TableResponse::NotAtTable => Some("Not at table".to_string()),
            _ => None,
        }
    }
}
