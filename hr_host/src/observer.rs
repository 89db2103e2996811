//! Passive table observer. Every event goes through the wire framing
//! before it reaches the replica, the way a remote observer would see it.

use anyhow::{Context, Error};
use holdem_round::{
    Replica, RoundEvent, SerializationError,
    frame::{decode_frame, write_prefixed},
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Follow a table until `rounds` rounds have ended or the table closes.
pub async fn observe(
    table: String,
    mut events: UnboundedReceiver<RoundEvent>,
    rounds: usize,
) -> Result<Replica, Error> {
    let mut replica = Replica::new();
    let mut wire = Vec::new();

    while replica.rounds_seen() < rounds {
        let Some(event) = events.recv().await else {
            debug!(table = %table, "Table closed before the last round");
            break;
        };
        write_prefixed(&mut wire, &event)?;

        loop {
            let (decoded, used) = match decode_frame::<RoundEvent>(&wire) {
                Ok(frame) => frame,
                Err(SerializationError::Truncated { .. }) => break,
                Err(e) => return Err(e.into()),
            };
            wire.drain(..used);
            replica
                .apply(&decoded)
                .with_context(|| format!("{table} replica rejected: {decoded}"))?;

            if let RoundEvent::RoundEnded { winners, .. } = &decoded {
                let summary = winners
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                info!(
                    table = %table,
                    round = replica.rounds_seen(),
                    "{}",
                    if summary.is_empty() { "round voided".to_string() } else { summary }
                );
            }
        }
    }

    Ok(replica)
}
