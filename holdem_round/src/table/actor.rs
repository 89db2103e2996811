//! Table actor implementation with async message handling.
//!
//! The actor task is the only writer of round state. A round is driven
//! by [`TableActor::play_round`]; every wait inside it (an action
//! request, the pause between stages, the showdown pause) keeps serving
//! the inbox, so sits, leaves and state queries are handled while the
//! round is suspended.

use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, Instant, sleep_until},
};
use uuid::Builder;

use super::{
    TableId,
    broadcast::{Broadcaster, SubscriberBroadcaster},
    config::{ConfigError, TableConfig},
    lifecycle::{RestartPhase, RestartTimer},
    messages::{SeatView, TableMessage, TableResponse, TableStateResponse},
};
use crate::game::{
    betting::{self, BetError, Betting},
    entities::{Action, Bet, Deck, Player, PlayerId, SeatIndex, Usd, Username, WinnerRecord},
    events::RoundEvent,
    functional::{HandEvaluator, SubHandEvaluator},
    pot::{Pot, PotLedger},
    round::{Round, RoundError},
    seats::{Departure, SeatError, SeatProvider, Seating, Seats},
    sequencer::{ButtonSequencer, TurnSequencer},
    showdown::{ShowdownResult, resolve_showdown},
    stage::Stage,
};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table is closed")]
    Closed,
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    /// Create a new table handle
    pub fn new(sender: mpsc::Sender<TableMessage>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    /// Get table ID
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage,
    ) -> Result<T, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(message(response)).await?;
        rx.await.map_err(|_| TableError::Closed)
    }

    pub async fn sit(
        &self,
        player: PlayerId,
        name: &str,
        buy_in: Usd,
    ) -> Result<TableResponse, TableError> {
        let name = name.to_string();
        self.request(|response| TableMessage::Sit {
            player,
            name,
            buy_in,
            response,
        })
        .await
    }

    pub async fn leave(&self, player: PlayerId) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::Leave { player, response })
            .await
    }

    pub async fn take_action(
        &self,
        player: PlayerId,
        action: Action,
    ) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::TakeAction {
            player,
            action,
            response,
        })
        .await
    }

    pub async fn state(&self) -> Result<TableStateResponse, TableError> {
        self.request(|response| TableMessage::GetState { response })
            .await
    }

    /// Subscribe to round events. Events are buffered from the moment the
    /// table processes the subscription.
    pub async fn subscribe(
        &self,
        observer: PlayerId,
    ) -> Result<mpsc::UnboundedReceiver<RoundEvent>, TableError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.send(TableMessage::Subscribe { observer, sender })
            .await?;
        Ok(receiver)
    }

    pub async fn unsubscribe(&self, observer: PlayerId) -> Result<(), TableError> {
        self.send(TableMessage::Unsubscribe { observer }).await
    }

    pub async fn close(&self) -> Result<TableResponse, TableError> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// The collaborators a table drives a round with.
pub struct TableParts {
    pub seats: Box<dyn SeatProvider>,
    pub sequencer: Box<dyn TurnSequencer>,
    pub pot: Box<dyn PotLedger>,
    pub evaluator: Box<dyn HandEvaluator>,
    pub broadcaster: Box<dyn Broadcaster>,
}

impl TableParts {
    pub fn standard(config: &TableConfig) -> Self {
        Self {
            seats: Box::new(Seats::new(config.max_players)),
            sequencer: Box::new(ButtonSequencer::new()),
            pot: Box::new(Pot::new()),
            evaluator: Box::new(SubHandEvaluator),
            broadcaster: Box::new(SubscriberBroadcaster::new()),
        }
    }
}

/// How a deal ended.
enum RoundOutcome {
    Showdown(ShowdownResult),
    /// Everyone else folded or left.
    Uncontested(SeatIndex),
    /// Nobody holding cards is left.
    Void,
}

/// Table actor managing a single poker table
pub struct TableActor {
    /// Table ID
    id: TableId,

    /// Table configuration
    config: TableConfig,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    seats: Box<dyn SeatProvider>,
    sequencer: Box<dyn TurnSequencer>,
    pot: Box<dyn PotLedger>,
    evaluator: Box<dyn HandEvaluator>,
    broadcaster: Box<dyn Broadcaster>,
    betting: Betting,

    round: Round,
    restart: RestartTimer,
    rng: StdRng,

    /// Is table closed
    is_closed: bool,

    /// Rounds finished so far
    hand_count: u32,
}

impl TableActor {
    /// Create a new table actor with the standard collaborators
    pub fn new(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let parts = TableParts::standard(&config);
        Self::with_parts(id, config, parts)
    }

    pub fn with_parts(id: TableId, config: TableConfig, parts: TableParts) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let actor = Self {
            id,
            betting: Betting::new(config.blinds()),
            config,
            inbox,
            seats: parts.seats,
            sequencer: parts.sequencer,
            pot: parts.pot,
            evaluator: parts.evaluator,
            broadcaster: parts.broadcaster,
            round: Round::new(),
            restart: RestartTimer::new(),
            rng,
            is_closed: false,
            hand_count: 0,
        };

        let handle = TableHandle::new(sender, id);

        (actor, handle)
    }

    /// Run the table actor event loop until the table is closed or every
    /// handle is dropped. Collaborator defects end the task with an error.
    pub async fn run(mut self) -> Result<(), TableError> {
        log::info!("Table {} '{}' starting", self.id, self.config.name);

        while !self.is_closed {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => self.close(),
                },

                _ = self.restart.elapsed() => {
                    if let Err(e) = self.on_restart().await {
                        log::error!("Table {}: {}", self.id, e);
                        return Err(e);
                    }
                }
            }
        }

        log::info!("Table {} '{}' closed", self.id, self.config.name);
        Ok(())
    }

    fn broadcast(&mut self, event: RoundEvent) {
        log::trace!("Table {}: {}", self.id, event);
        self.broadcaster.broadcast(&event);
    }

    /// Handle a table message. Never suspends, so it can run from any
    /// wait inside a round.
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Sit {
                player,
                name,
                buy_in,
                response,
            } => {
                let result = self.handle_sit(player, &name, buy_in);
                let _ = response.send(result);
            }

            TableMessage::Leave { player, response } => {
                let result = self.handle_leave(player);
                let _ = response.send(result);
            }

            // The player to act is served by `request_bet`; anything that
            // reaches this point is out of turn.
            TableMessage::TakeAction {
                player, response, ..
            } => {
                let result = if self.seats.find(player).is_some() {
                    TableResponse::NotYourTurn
                } else {
                    TableResponse::NotAtTable
                };
                let _ = response.send(result);
            }

            TableMessage::GetState { response } => {
                let _ = response.send(self.get_state());
            }

            TableMessage::Subscribe { observer, sender } => {
                self.broadcaster.subscribe(observer, sender);
                log::debug!("Observer {} subscribed to table {}", observer, self.id);
            }

            TableMessage::Unsubscribe { observer } => {
                self.broadcaster.unsubscribe(observer);
                log::debug!("Observer {} unsubscribed from table {}", observer, self.id);
            }

            TableMessage::Close { response } => {
                self.close();
                let _ = response.send(TableResponse::Success);
            }
        }
    }

    fn close(&mut self) {
        if self.round.is_active() {
            log::warn!("Table {}: closing mid-round, voiding the deal", self.id);
            self.end_deal(RoundOutcome::Void);
        }
        self.restart.cancel();
        self.is_closed = true;
    }

    /// Handle sit request
    fn handle_sit(&mut self, player: PlayerId, name: &str, buy_in: Usd) -> TableResponse {
        let min_buy_in = self.config.min_buy_in_chips();
        let max_buy_in = self.config.max_buy_in_chips();

        if buy_in < min_buy_in || buy_in > max_buy_in {
            return TableResponse::Error(format!(
                "Buy-in must be between {} and {} chips",
                min_buy_in, max_buy_in
            ));
        }

        let name = Username::new(name);
        let seated = Player::new(player, name.clone(), buy_in);
        match self.seats.sit(seated, self.round.is_active()) {
            Ok(Seating::Seated(seat)) => {
                log::info!(
                    "Player {} ({}) sat at table {} seat {} with {} chips",
                    player,
                    name,
                    self.id,
                    seat,
                    buy_in
                );
                self.broadcast(RoundEvent::PlayerSeated {
                    player,
                    name,
                    seat,
                    stack: buy_in,
                });
                if !self.round.is_active() && !self.restart.is_pending() {
                    self.restart
                        .arm(RestartPhase::Settling, self.config.settle_interval());
                }
                TableResponse::Success
            }
            Ok(Seating::Waitlisted(position)) => {
                log::info!(
                    "Player {} ({}) waitlisted at table {}",
                    player,
                    name,
                    self.id
                );
                self.broadcast(RoundEvent::PlayerWaitlisted { player, name });
                TableResponse::SuccessWithMessage(format!(
                    "Waitlisted at position {}",
                    position + 1
                ))
            }
            Err(SeatError::TableFull) => TableResponse::TableFull,
            Err(e) => TableResponse::Error(e.to_string()),
        }
    }

    /// Handle leave request. A leave that leaves one player holding cards
    /// ends the deal in their favour; a leave that leaves nobody voids it.
    fn handle_leave(&mut self, player: PlayerId) -> TableResponse {
        let Some(departure) = self.seats.leave(player) else {
            return TableResponse::NotAtTable;
        };
        self.broadcast(RoundEvent::PlayerLeft { player });

        if let Departure::Seated(seat, departed) = departure {
            log::info!(
                "Player {} left table {} seat {} with {} chips",
                player,
                self.id,
                seat,
                departed.stack
            );
            if self.round.is_active() {
                let seats = self.seats.as_slice();
                match betting::num_non_folded(seats) {
                    0 => self.end_deal(RoundOutcome::Void),
                    1 => {
                        if let Some(survivor) = Self::first_non_folded(seats) {
                            self.end_deal(RoundOutcome::Uncontested(survivor));
                        }
                    }
                    _ => {}
                }
            }
        }

        TableResponse::Success
    }

    fn first_non_folded(seats: &[Option<Player>]) -> Option<SeatIndex> {
        seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|p| !p.is_folded()))
    }

    /// Get current table state
    fn get_state(&self) -> TableStateResponse {
        let players = self
            .seats
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(|(seat, player)| {
                player.as_ref().map(|p| SeatView {
                    seat,
                    player: p.id,
                    name: p.name.to_string(),
                    stack: p.stack,
                    bet: p.bet,
                    action: p.bet_action.to_string().trim_end().to_string(),
                })
            })
            .collect::<Vec<_>>();

        TableStateResponse {
            table_id: self.id,
            table_name: self.config.name.clone(),
            player_count: players.len(),
            max_players: self.config.max_players,
            waitlist_count: self.seats.num_waiting(),
            subscriber_count: self.broadcaster.num_subscribers(),
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            pot_size: self.pot.size(),
            is_active: self.round.is_active(),
            stage: self.round.stage().to_string(),
            board: self.round.board().iter().map(|c| c.to_string().trim().to_string()).collect(),
            button: self.sequencer.button(),
            players,
            hands_played: self.hand_count,
            speed: self.config.speed.to_string(),
        }
    }

    /// Two funded players are seated and nobody carries a bet.
    fn can_start(&self) -> bool {
        let seated = self.seats.as_slice().iter().flatten();
        !self.round.is_active()
            && seated.clone().filter(|p| p.stack > 0).count() >= 2
            && seated.clone().all(|p| p.bet == 0)
    }

    async fn on_restart(&mut self) -> Result<(), TableError> {
        match self.restart.fire() {
            Some(RestartPhase::Settling) => {
                self.settle();
                self.await_players();
            }
            Some(RestartPhase::AwaitingPlayers) => self.await_players(),
            Some(RestartPhase::Debouncing) => self.play_round().await?,
            None => {}
        }
        Ok(())
    }

    /// Seat waiting players and drop those with no chips left.
    fn settle(&mut self) {
        for player in self.seats.remove_broke() {
            log::info!("Table {}: removing player {} with no chips", self.id, player.id);
            self.broadcast(RoundEvent::PlayerRemoved { player: player.id });
        }
        for (seat, id) in self.seats.promote_waiting() {
            let Some(player) = self.seats.get(seat) else {
                continue;
            };
            let event = RoundEvent::PlayerSeated {
                player: id,
                name: player.name.clone(),
                seat,
                stack: player.stack,
            };
            self.broadcast(event);
        }
    }

    fn await_players(&mut self) {
        if self.can_start() {
            self.restart
                .arm(RestartPhase::Debouncing, self.config.debounce());
        } else {
            self.restart
                .arm(RestartPhase::AwaitingPlayers, self.config.poll_interval());
        }
    }

    /// Play one round from the deal to the end of the deal.
    pub async fn play_round(&mut self) -> Result<(), TableError> {
        if !self.start_round()? {
            self.await_players();
            return Ok(());
        }

        let mut stage = Stage::Preflop;
        loop {
            self.run_stage(stage).await?;
            if !self.round.is_active() {
                return Ok(());
            }
            self.end_stage();
            self.pause(self.config.round_interval()).await;
            if !self.round.is_active() {
                return Ok(());
            }
            stage = self.advance_stage()?;
        }
    }

    /// Deal a new round. Returns `false` without touching anything when
    /// the start condition doesn't hold.
    pub fn start_round(&mut self) -> Result<bool, TableError> {
        if self.round.is_active() {
            log::warn!("Table {}: start requested while a round is active", self.id);
            return Ok(false);
        }
        if !self.can_start() {
            log::debug!(
                "Table {}: not starting, {} players seated",
                self.id,
                self.seats.num_occupied()
            );
            return Ok(false);
        }
        self.restart.cancel();

        self.sequencer.move_button(self.seats.as_slice());
        let dealing = self.sequencer.dealing_order(self.seats.as_slice());
        let button = self.sequencer.button().unwrap_or_default();
        let dealing_ids: Vec<PlayerId> = dealing
            .iter()
            .filter_map(|&idx| self.seats.get(idx).map(|p| p.id))
            .collect();

        let mut deck = Deck::shuffled(&mut self.rng);
        let round_id = Builder::from_random_bytes(self.rng.random()).into_uuid();
        self.broadcast(RoundEvent::RoundStarted {
            round: round_id,
            button,
            deck: deck.codes(),
            dealing_order: dealing_ids.clone(),
        });

        let pockets = self.round.start(round_id, &mut deck, dealing.len())?;
        for ((&idx, id), cards) in dealing.iter().zip(dealing_ids).zip(pockets) {
            if let Some(player) = self.seats.get_mut(idx) {
                player.reset();
                player.cards = cards.to_vec();
            }
            self.broadcast(RoundEvent::PocketCardsAssigned { player: id, cards });
        }

        log::info!(
            "Table {}: round {} started with {} players, button at seat {}",
            self.id,
            round_id,
            dealing.len(),
            button
        );
        self.advance_stage()?;
        Ok(true)
    }

    /// Move to the next stage and reveal its community cards.
    fn advance_stage(&mut self) -> Result<Stage, TableError> {
        let advance = self.round.advance()?;
        log::info!("Table {}: {} begins", self.id, advance.stage);
        self.broadcast(RoundEvent::StageAdvanced {
            stage: advance.stage,
            revealed: advance.revealed,
        });
        Ok(advance.stage)
    }

    fn end_stage(&mut self) {
        let stage = self.round.stage();
        self.broadcast(RoundEvent::StageEnded { stage });
    }

    async fn run_stage(&mut self, stage: Stage) -> Result<(), TableError> {
        match stage {
            Stage::Preflop => self.run_preflop().await,
            Stage::Flop | Stage::Turn | Stage::River => self.run_mid_game_stage().await,
            Stage::Showdown => self.run_showdown().await?,
            Stage::Empty => return Err(RoundError::NotActive.into()),
        }
        Ok(())
    }

    async fn run_preflop(&mut self) {
        betting::start_stage(self.seats.as_mut_slice());
        let dealing = self.sequencer.dealing_order(self.seats.as_slice());
        let blinds = self.betting.blinds().clone();
        for (&idx, blind) in dealing.iter().zip([blinds.small, blinds.big]) {
            self.post_blind(idx, blind);
        }
        let order = self.sequencer.preflop_order(self.seats.as_slice());
        self.bet(order).await;
    }

    async fn run_mid_game_stage(&mut self) {
        betting::start_stage(self.seats.as_mut_slice());
        if betting::is_all_in(self.seats.as_slice()) {
            log::debug!(
                "Table {}: nobody left to bet, skipping {} betting",
                self.id,
                self.round.stage()
            );
            return;
        }
        let order = self.sequencer.postflop_order(self.seats.as_slice());
        self.bet(order).await;
    }

    async fn run_showdown(&mut self) -> Result<(), TableError> {
        self.end_stage();
        self.pause(self.config.showdown_end()).await;
        if !self.round.is_active() {
            return Ok(());
        }
        let seats = self.seats.as_slice();
        let order = self.sequencer.showdown_order(seats);
        let result = resolve_showdown(&order, seats, self.round.board(), self.evaluator.as_ref())?;
        self.end_deal(RoundOutcome::Showdown(result));
        Ok(())
    }

    fn post_blind(&mut self, idx: SeatIndex, blind: Usd) {
        let Some(player) = self.seats.get_mut(idx) else {
            return;
        };
        let bet = self.betting.post_blind(player, blind);
        let (id, stack) = (player.id, player.stack);
        self.pot.contribute(id, bet.amount);
        self.broadcast(RoundEvent::BlindPosted {
            player: id,
            bet,
            stack,
        });
    }

    /// Betting loop for the current stage. Returns once the stage is
    /// resolved or the deal ended.
    async fn bet(&mut self, order: Vec<SeatIndex>) {
        let mut pass = 0;
        loop {
            let mut acted = false;
            for &idx in &order {
                if !self.round.is_active() || self.is_closed {
                    return;
                }
                if !self.seats.get(idx).is_some_and(Player::can_act) {
                    continue;
                }
                acted = true;
                self.request_bet(idx).await;
                if !self.round.is_active() {
                    return;
                }

                let seats = self.seats.as_slice();
                if betting::num_non_folded(seats) == 1 {
                    if let Some(survivor) = Self::first_non_folded(seats) {
                        self.end_deal(RoundOutcome::Uncontested(survivor));
                    }
                    return;
                }
                if pass > 0 && betting::are_bets_equal(seats) {
                    return;
                }
            }
            if !acted || betting::are_bets_equal(self.seats.as_slice()) {
                return;
            }
            pass += 1;
        }
    }

    /// Ask the player at `idx` to act and wait for a valid action or the
    /// action timeout. Invalid actions are rejected and the player keeps
    /// the turn; on timeout the player checks when possible and folds
    /// otherwise.
    async fn request_bet(&mut self, idx: SeatIndex) {
        let max_bet = betting::max_bet(self.seats.as_slice());
        let Some(player) = self.seats.get(idx) else {
            return;
        };
        let player_id = player.id;
        let choices = self.betting.action_choices(player, max_bet);
        self.broadcast(RoundEvent::ActionRequested {
            player: player_id,
            choices: choices.clone(),
            timeout_secs: self.config.action_timeout_secs(),
        });

        let deadline = Instant::now() + self.config.action_timeout();
        loop {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(TableMessage::TakeAction { player, action, response }) if player == player_id => {
                        match self.place_bet(idx, &action) {
                            Ok(_) => {
                                let _ = response.send(TableResponse::Success);
                                return;
                            }
                            Err(e) => {
                                log::debug!(
                                    "Table {}: rejected {:?} from player {}: {}",
                                    self.id,
                                    action,
                                    player,
                                    e
                                );
                                let _ = response.send(TableResponse::InvalidAction(e.to_string()));
                            }
                        }
                    }
                    Some(message) => self.handle_message(message),
                    None => self.close(),
                },

                _ = sleep_until(deadline) => {
                    let fallback = if choices.contains(&Action::Check) {
                        Action::Check
                    } else {
                        Action::Fold
                    };
                    log::info!("Table {}: player {} timed out and {}", self.id, player_id, fallback);
                    if let Err(e) = self.place_bet(idx, &fallback) {
                        log::warn!("Table {}: timeout fallback failed: {}", self.id, e);
                    }
                    return;
                }
            }

            let still_seated = self.seats.get(idx).map(|p| p.id) == Some(player_id);
            if self.is_closed || !self.round.is_active() || !still_seated {
                return;
            }
        }
    }

    fn place_bet(&mut self, idx: SeatIndex, action: &Action) -> Result<Bet, BetError> {
        let max_bet = betting::max_bet(self.seats.as_slice());
        let Some(player) = self.seats.get_mut(idx) else {
            return Err(BetError::Illegal(action.clone()));
        };
        let bet = self.betting.apply(player, max_bet, action)?;
        let (id, stack) = (player.id, player.stack);
        log::debug!("Table {}: player {} {}", self.id, id, action);
        self.pot.contribute(id, bet.amount);
        self.broadcast(RoundEvent::BetPlaced {
            player: id,
            bet: bet.clone(),
            stack,
        });
        Ok(bet)
    }

    /// Wait for `duration` while still serving the inbox.
    async fn pause(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while !self.is_closed {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => self.close(),
                },
                _ = sleep_until(deadline) => return,
            }
        }
    }

    /// Pay the pot, reset the round and re-arm the restart timer.
    fn end_deal(&mut self, outcome: RoundOutcome) {
        let Some(round_id) = self.round.id() else {
            return;
        };
        let (winner_seats, hand) = match outcome {
            RoundOutcome::Showdown(result) => (result.winners, Some(result.hand.to_string())),
            RoundOutcome::Uncontested(seat) => (vec![seat], None),
            RoundOutcome::Void => (Vec::new(), None),
        };
        let winner_ids: Vec<PlayerId> = winner_seats
            .iter()
            .filter_map(|&idx| self.seats.get(idx).map(|p| p.id))
            .collect();

        let seated = self.seats.seated_ids();
        let settlement = self.pot.settle(&winner_ids, &seated);
        for (id, amount) in settlement.payouts.iter().chain(settlement.refunds.iter()) {
            if let Some(idx) = self.seats.find(*id)
                && let Some(player) = self.seats.get_mut(idx)
            {
                player.stack += amount;
            }
        }

        let winners: Vec<WinnerRecord> = settlement
            .payouts
            .iter()
            .filter_map(|(id, amount)| {
                let player = self.seats.get(self.seats.find(*id)?)?;
                Some(WinnerRecord {
                    player: *id,
                    name: player.name.clone(),
                    amount: *amount,
                    hand: hand.clone(),
                })
            })
            .collect();

        for player in self.seats.as_mut_slice().iter_mut().flatten() {
            player.reset();
        }
        self.round.end();
        self.hand_count += 1;

        if winners.is_empty() {
            log::info!("Table {}: round {} voided", self.id, round_id);
        } else {
            let summary = winners
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            log::info!("Table {}: round {} ended, {}", self.id, round_id, summary);
        }

        self.broadcast(RoundEvent::RoundEnded {
            round: round_id,
            winners,
            refunds: settlement.refunds,
        });
        self.restart
            .arm(RestartPhase::Settling, self.config.settle_interval());
    }
}
