//! Game session controller.
//!
//! `GameSession` is the only entry point the presentation layer uses. It
//! composes the deck builder, shuffler, card store, turn machine, and
//! round timer into `start`, `reset`, and `handle_selection`, and
//! reports every state change on the event channel supplied at
//! construction.
//!
//! ## Concurrency
//!
//! The timer tick and the selection handler both read-modify-write the
//! round state, so the whole round interior sits behind one mutex.
//! Events are sent while the lock is held, which keeps event order
//! identical to state order. The reveal delay is a spawned sleep task
//! carrying the round epoch it was scheduled in: if the round ends or is
//! restarted before it fires, the epoch check (and the terminal-phase
//! check in the machine) turn it into a no-op, and `start`/`reset` abort
//! it outright.
//!
//! Lock ordering: the round interior mutex may be held while taking the
//! timer/resolver handle locks, never the reverse.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cards::{CardId, CardInstance, CardStore};
use crate::core::{GameConfiguration, GameRng, RoundOutcome, RoundState};
use crate::deck;
use crate::error::EngineError;
use crate::events::GameEvent;
use crate::timer::{RoundTimer, TickOutcome};
use crate::turn::{SelectionOutcome, TurnMachine};

/// Render state for a freshly dealt (or in-progress) round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Every card instance in layout order.
    pub cards: Vec<CardInstance>,

    /// Pairs matched so far.
    pub score: u32,

    /// Seconds left on the countdown.
    pub seconds_remaining: u32,
}

/// Everything the timer tick and the selection handler contend over.
struct RoundInner {
    config: GameConfiguration,
    store: CardStore,
    machine: TurnMachine,
    state: RoundState,
    /// Bumped by every `start`/`reset`; deferred work scheduled for an
    /// older epoch must not touch the new round.
    epoch: u64,
}

/// Shared interior handed to the timer task and reveal resolvers.
struct SessionCore {
    inner: Mutex<Option<RoundInner>>,
    events: UnboundedSender<GameEvent>,
}

impl SessionCore {
    fn emit(&self, event: GameEvent) {
        // A closed receiver means presentation went away; the round can
        // keep running without an audience.
        let _ = self.events.send(event);
    }

    /// Timer callback: one elapsed second.
    fn on_tick(&self, epoch: u64) -> TickOutcome {
        let mut guard = self.inner.lock();
        let Some(round) = guard.as_mut() else {
            return TickOutcome::Stop;
        };
        if round.epoch != epoch {
            return TickOutcome::Stop;
        }
        // Score check takes priority: a round won on the expiring tick
        // stays won, and a stopped round never ticks again.
        if round.machine.is_over() {
            return TickOutcome::Stop;
        }

        let remaining = round.state.consume_second();
        self.emit(GameEvent::TimeChanged {
            seconds_remaining: remaining,
        });

        if remaining == 0 {
            for id in round.machine.force_timeout(&mut round.store) {
                self.emit(GameEvent::CardHidden { card: id });
            }
            self.emit(GameEvent::RoundEnded {
                outcome: RoundOutcome::Timeout,
                final_score: round.state.score(),
            });
            return TickOutcome::Stop;
        }

        TickOutcome::Continue
    }

    /// Deferred resolution of a locked pair, scheduled at selection time.
    fn resolve_reveal(&self, epoch: u64) {
        let mut guard = self.inner.lock();
        let Some(round) = guard.as_mut() else {
            return;
        };
        if round.epoch != epoch {
            return;
        }

        let distinct = round.config.distinct_card_count;
        let Some(resolution) =
            round
                .machine
                .resolve_locked(&mut round.store, &mut round.state, distinct)
        else {
            // The round ended while the delay was pending.
            return;
        };

        if resolution.matched {
            if let Some(score) = resolution.new_score {
                self.emit(GameEvent::ScoreChanged { score });
            }
            for id in resolution.cards {
                self.emit(GameEvent::CardRemoved { card: id });
            }
            if resolution.won {
                self.emit(GameEvent::RoundEnded {
                    outcome: RoundOutcome::Won,
                    final_score: round.state.score(),
                });
            }
        } else {
            for id in resolution.cards {
                self.emit(GameEvent::CardHidden { card: id });
            }
        }
    }

    fn snapshot(round: &RoundInner) -> RoundSnapshot {
        RoundSnapshot {
            cards: round.store.iter().cloned().collect(),
            score: round.state.score(),
            seconds_remaining: round.state.seconds_remaining(),
        }
    }
}

/// A game session: one engine instance driving consecutive rounds.
///
/// All methods take `&self`; the session synchronizes internally so the
/// presentation layer can share it behind an `Arc`.
pub struct GameSession {
    core: Arc<SessionCore>,
    timer: Mutex<Option<RoundTimer>>,
    resolver: Mutex<Option<JoinHandle<()>>>,
    runtime: Mutex<Option<Handle>>,
}

impl GameSession {
    /// Create a session reporting on the given event channel.
    ///
    /// No round exists until `start` is called; selections before then
    /// are ignored.
    #[must_use]
    pub fn new(events: UnboundedSender<GameEvent>) -> Self {
        Self {
            core: Arc::new(SessionCore {
                inner: Mutex::new(None),
                events,
            }),
            timer: Mutex::new(None),
            resolver: Mutex::new(None),
            runtime: Mutex::new(None),
        }
    }

    /// Start a round: validate, deal, shuffle, and launch the countdown.
    ///
    /// Cancels any previous round's timer and pending reveal resolution
    /// before the new state is committed. Fails without side effects on a
    /// bad configuration; fails with `EngineError::Scheduler` when no
    /// tokio runtime is available for the timer.
    pub fn start(&self, config: GameConfiguration) -> Result<RoundSnapshot, EngineError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| EngineError::Scheduler)?;

        // Deal the new round before touching the current one, so a draw
        // failure leaves the session as it was.
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let universe = deck::build_universe();
        let mut cards = deck::draw_round_deck(&universe, &config, &mut rng)?;
        deck::shuffle(&mut cards, &mut rng);
        let store = CardStore::from_deck(cards);

        self.cancel_pending();

        let (epoch, snapshot) = {
            let mut guard = self.core.inner.lock();
            let epoch = guard.as_ref().map_or(0, |round| round.epoch) + 1;
            let round = RoundInner {
                state: RoundState::new(config.round_duration_seconds),
                machine: TurnMachine::new(),
                store,
                config,
                epoch,
            };
            let snapshot = SessionCore::snapshot(&round);
            *guard = Some(round);
            (epoch, snapshot)
        };

        let core = Arc::clone(&self.core);
        let timer = RoundTimer::spawn(move || core.on_tick(epoch))?;
        *self.timer.lock() = Some(timer);
        *self.runtime.lock() = Some(runtime);

        debug!(
            seed = rng.seed(),
            deck_size = snapshot.cards.len(),
            seconds = snapshot.seconds_remaining,
            "round started"
        );
        Ok(snapshot)
    }

    /// Start over for "play again": deterministic clean slate (score 0,
    /// no pending selection, fresh deck) under the given configuration.
    pub fn reset(&self, config: GameConfiguration) -> Result<RoundSnapshot, EngineError> {
        debug!("resetting for a new round");
        self.start(config)
    }

    /// Forward a player's card selection to the turn machine.
    ///
    /// Returns the synchronous state change; deferred consequences
    /// (removal, flip-back, score) arrive as events after the reveal
    /// delay. Invalid selections are silent no-ops; unknown card ids are
    /// logged and ignored.
    pub fn handle_selection(&self, id: CardId) -> SelectionOutcome {
        // Grab the runtime handle before locking the interior; the
        // resolver is spawned while the lock is held.
        let runtime = self.runtime.lock().clone();

        let mut guard = self.core.inner.lock();
        let Some(round) = guard.as_mut() else {
            return SelectionOutcome::Ignored;
        };

        let outcome = match round.machine.select(&mut round.store, id) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "selection ignored");
                return SelectionOutcome::Ignored;
            }
        };

        match outcome {
            SelectionOutcome::Ignored => {}
            SelectionOutcome::FirstRevealed(card) => {
                self.emit_revealed(round, card);
            }
            SelectionOutcome::PairRevealed { second, .. } => {
                self.emit_revealed(round, second);
                self.schedule_resolution(round, runtime);
            }
        }

        outcome
    }

    /// Suspend the countdown (e.g. while a dialog is up). Remaining time
    /// is preserved; selections are still accepted.
    pub fn pause(&self) {
        if let Some(timer) = &*self.timer.lock() {
            timer.pause();
        }
    }

    /// Resume a paused countdown.
    pub fn resume(&self) {
        if let Some(timer) = &*self.timer.lock() {
            timer.resume();
        }
    }

    /// Current render state, if a round has been started.
    #[must_use]
    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        self.core.inner.lock().as_ref().map(SessionCore::snapshot)
    }

    /// Has the current round reached a terminal state?
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.core
            .inner
            .lock()
            .as_ref()
            .is_some_and(|round| round.machine.is_over())
    }

    /// The current round's terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.core
            .inner
            .lock()
            .as_ref()
            .and_then(|round| round.machine.outcome())
    }

    fn emit_revealed(&self, round: &RoundInner, card: CardId) {
        let identity = round
            .store
            .get(card)
            .expect("revealed card missing from store")
            .identity;
        self.core.emit(GameEvent::CardRevealed { card, identity });
    }

    fn schedule_resolution(&self, round: &RoundInner, runtime: Option<Handle>) {
        let Some(runtime) = runtime else {
            // start() stored the handle; a missing one means no round was
            // started on this runtime, which select() already rules out.
            warn!("no runtime to schedule reveal resolution");
            return;
        };

        let core = Arc::clone(&self.core);
        let epoch = round.epoch;
        let delay = round.config.reveal_delay();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            core.resolve_reveal(epoch);
        });
        // A previous resolver, if any, has already fired: the machine
        // cannot lock twice without resolving in between.
        *self.resolver.lock() = Some(task);
    }

    /// Abort the countdown and any pending reveal resolution.
    fn cancel_pending(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.cancel();
        }
        if let Some(resolver) = self.resolver.lock().take() {
            resolver.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_start_outside_runtime_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = GameSession::new(tx);

        let result = session.start(GameConfiguration::new());
        assert!(matches!(result, Err(EngineError::Scheduler)));
    }

    #[test]
    fn test_selection_before_start_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = GameSession::new(tx);

        assert_eq!(
            session.handle_selection(CardId::new(0)),
            SelectionOutcome::Ignored
        );
        assert!(session.snapshot().is_none());
        assert!(!session.is_round_over());
    }

    #[tokio::test]
    async fn test_bad_configuration_commits_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = GameSession::new(tx);

        let bad = GameConfiguration::new().with_duplicate_count(1);
        assert!(session.start(bad).is_err());
        assert!(session.snapshot().is_none());

        let oversized = GameConfiguration::new().with_distinct_card_count(100);
        assert!(session.start(oversized).is_err());
        assert!(session.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_start_returns_face_down_snapshot() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = GameSession::new(tx);

        let config = GameConfiguration::new().with_seed(42);
        let snapshot = session.start(config).unwrap();

        assert_eq!(snapshot.cards.len(), 16);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.seconds_remaining, 30);
        assert!(snapshot.cards.iter().all(|c| !c.face_up && !c.removed));
    }

    #[tokio::test]
    async fn test_same_seed_same_layout() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = GameSession::new(tx);
        let config = GameConfiguration::new().with_seed(7);

        let first = session.start(config.clone()).unwrap();
        let second = session.reset(config).unwrap();
        assert_eq!(first, second);
    }
}
