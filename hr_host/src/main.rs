//! Local host running authoritative hold'em tables.
//!
//! Spawns table actors through a TableManager, seats scripted bots at
//! each one and follows every table with a replica fed through the wire
//! framing. Stops after the configured number of rounds or on Ctrl-C.

mod bots;
mod config;
mod logging;
mod observer;

use std::time::Instant;

use anyhow::Error;
use ctrlc::set_handler;
use holdem_round::{entities::PlayerId, table::TableManager};
use pico_args::Arguments;
use tokio::{sync::watch, time::Duration};
use tracing::{info, warn};

use crate::{
    bots::ScriptedBot,
    config::{HostConfig, Overrides},
};

const HELP: &str = "\
Run authoritative hold'em tables with scripted players

USAGE:
  hr_host [OPTIONS]

OPTIONS:
  --tables     N           Number of tables to run          [default: env HR_TABLES or 1]
  --players    N           Bots seated at each table        [default: env HR_PLAYERS or 4]
  --rounds     N           Rounds each table plays          [default: env HR_ROUNDS or 5]
  --seed       N           Seed for decks and bots          [default: env HR_SEED or random]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  HR_SMALL_BLIND, HR_BIG_BLIND, HR_MAX_PLAYERS, HR_SPEED, HR_BUY_IN,
  HR_ROUND_INTERVAL_MS, HR_SHOWDOWN_END_MS, HR_BOT_DELAY_MS
  RUST_LOG                 Log filter [default: info]
  (A .env file in the working directory is read first)
";

/// Subscriber id the host's own observer uses; bots start at 1.
const OBSERVER_ID: PlayerId = 0;

/// Bot ids are spaced per table so they stay unique across tables.
const IDS_PER_TABLE: PlayerId = 100;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        num_tables: pargs.opt_value_from_str("--tables")?,
        players_per_table: pargs.opt_value_from_str("--players")?,
        rounds: pargs.opt_value_from_str("--rounds")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };
    let config = HostConfig::from_env(overrides)?;
    config.validate()?;

    logging::init();

    // Catching signals for a clean shutdown.
    let (shutdown, mut interrupted) = watch::channel(false);
    set_handler(move || {
        let _ = shutdown.send(true);
    })?;

    let manager = TableManager::new();
    let started = Instant::now();
    let mut handles = Vec::with_capacity(config.num_tables);
    let mut observers = Vec::with_capacity(config.num_tables);

    info!(
        "Starting {} table(s) with {} bots each",
        config.num_tables, config.players_per_table
    );
    for index in 0..config.num_tables {
        let table_config = config.table_config(index);
        let name = table_config.name.clone();
        let handle = manager.create_table(table_config).await?;

        // Subscribe before anyone sits so the replica sees every event.
        let events = handle.subscribe(OBSERVER_ID).await?;
        observers.push(tokio::spawn(observer::observe(
            name.clone(),
            events,
            config.rounds,
        )));

        for seat in 0..config.players_per_table {
            let id = handle.table_id() * IDS_PER_TABLE + seat as PlayerId + 1;
            let bot = ScriptedBot::new(
                id,
                config.buy_in,
                Duration::from_millis(config.bot_delay_ms),
                config.seed,
            );
            tokio::spawn(bot.run(handle.clone()));
        }
        handles.push((name, handle));
    }

    let finished = async {
        let mut replicas = Vec::with_capacity(observers.len());
        for observer in observers {
            replicas.push(observer.await??);
        }
        Ok::<_, Error>(replicas)
    };

    tokio::select! {
        replicas = finished => {
            let replicas = replicas?;
            let rounds: usize = replicas.iter().map(|r| r.rounds_seen()).sum();
            info!("All tables finished, {} rounds replayed", rounds);
        }
        _ = interrupted.changed() => warn!("Interrupted, closing tables"),
    }

    for (name, handle) in &handles {
        let state = handle.state().await?;
        let chips = state.players.iter().map(|p| p.stack).sum();
        logging::log_table_summary(
            name,
            state.hands_played as usize,
            chips,
            started.elapsed().as_millis(),
        );
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    info!("Shutting down {} table(s)...", manager.active_table_count().await);
    manager.close_all().await?;

    Ok(())
}
