//! Battle sessions.
//!
//! A `BattleSession` is the explicit context for one duel. It owns the
//! `BattleState`, the AI controllers, the observers and the frame
//! scheduler, and shares the game's `EffectRegistry`. Nothing about a duel
//! lives outside its session, so sessions are independent and can be
//! dropped at any time.
//!
//! ## Lifecycle
//!
//! ```text
//! new ─► advance / select_battle_card / update ... ─► Finished
//!   └───────────────── abort ─────────────────────► closed
//! ```
//!
//! After `abort` every operation fails with `BattleError::SessionClosed`
//! and no scheduled task can run again.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use card_duel::battle::{AiBehavior, BattleSession};
//! use card_duel::cards::{CardId, CardRegistry, CardTemplate};
//! use card_duel::core::{BattleConfig, BattleState, Side};
//! use card_duel::effects::EffectRegistry;
//! use card_duel::rules::StepOutcome;
//!
//! let catalog = CardRegistry::from_templates([
//!     CardTemplate::new(CardId::new(1), "Squire").with_stats(1, 2, 1),
//! ]).unwrap();
//! let mut state = BattleState::new(BattleConfig::default(), 42);
//! state.load_deck(Side::Player, "Mine", &[CardId::new(1); 10], &catalog).unwrap();
//! state.load_deck(Side::Opponent, "Theirs", &[CardId::new(1); 10], &catalog).unwrap();
//! state.participant_mut(Side::Opponent).ai = Some(AiBehavior::Strongest);
//!
//! let mut session = BattleSession::new(state, Rc::new(EffectRegistry::new()));
//! let outcome = session.advance_until_input(100).unwrap();
//! assert_eq!(outcome, StepOutcome::AwaitingSelection(Side::Player));
//!
//! let card = session.state().participant(Side::Player).hand()[0];
//! session.select_battle_card(Side::Player, card).unwrap();
//! ```

use std::rc::Rc;

use super::ai::BattleAi;
use super::hooks::BattleObserver;
use super::scheduler::{FrameScheduler, TaskId};
use crate::core::{BattleState, EntityId, Side, SideMap};
use crate::effects::EffectRegistry;
use crate::error::BattleError;
use crate::rules::{self, Controllers, MatchResult, Phase, StepOutcome};
use crate::zones::{DrawFrom, PileId};

/// One duel and everything driving it.
pub struct BattleSession {
    state: BattleState,
    effects: Rc<EffectRegistry>,
    controllers: Controllers,
    observers: Vec<Box<dyn BattleObserver>>,
    scheduler: FrameScheduler<BattleSession, BattleError>,
    closed: bool,
}

impl BattleSession {
    /// Open a session on a prepared state.
    ///
    /// Sides whose participant carries an `AiBehavior` tag are controlled
    /// by that behaviour; the rest wait for `select_battle_card`.
    #[must_use]
    pub fn new(mut state: BattleState, effects: Rc<EffectRegistry>) -> Self {
        let controllers = SideMap::new(|side| {
            state
                .participant(side)
                .ai
                .map(|behavior| Box::new(behavior) as Box<dyn BattleAi>)
        });
        if state.phase() == Phase::Start {
            state.set_phase(Phase::Start);
        }
        Self {
            state,
            effects,
            controllers,
            observers: Vec::new(),
            scheduler: FrameScheduler::new(),
            closed: false,
        }
    }

    /// Add an observer (builder pattern).
    #[must_use]
    pub fn with_observer(mut self, observer: impl BattleObserver + 'static) -> Self {
        self.add_observer(Box::new(observer));
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    /// Replace a side's controller (builder pattern).
    #[must_use]
    pub fn with_controller(mut self, side: Side, ai: Option<Box<dyn BattleAi>>) -> Self {
        self.controllers[side] = ai;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Mutable state for scripted battle flows.
    pub fn state_mut(&mut self) -> Result<&mut BattleState, BattleError> {
        self.ensure_open()?;
        Ok(&mut self.state)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.state.result()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.phase().is_terminal()
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.scheduler.frame()
    }

    /// Tasks waiting on the scheduler.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // === Sequencing ===

    /// Execute the current phase and move on.
    pub fn advance(&mut self) -> Result<StepOutcome, BattleError> {
        self.ensure_open()?;
        let result = rules::step(&mut self.state, &self.effects, &mut self.controllers);
        self.flush();
        result
    }

    /// Advance until a human choice is needed or the duel ends, taking at
    /// most `max_steps` steps.
    pub fn advance_until_input(&mut self, max_steps: usize) -> Result<StepOutcome, BattleError> {
        let mut outcome = StepOutcome::Advanced(self.phase());
        for _ in 0..max_steps {
            outcome = self.advance()?;
            if !matches!(outcome, StepOutcome::Advanced(_)) {
                break;
            }
        }
        Ok(outcome)
    }

    /// Commit a battle card for a human-controlled side.
    pub fn select_battle_card(&mut self, side: Side, entity: EntityId) -> Result<(), BattleError> {
        self.ensure_open()?;
        rules::select_battle_card(&mut self.state, side, entity)
    }

    // === Pile operations ===

    pub fn draw(&mut self, side: Side, count: usize, from: DrawFrom) -> Result<usize, BattleError> {
        self.ensure_open()?;
        let drawn = self.state.draw_from(side, count, from);
        self.flush();
        Ok(drawn)
    }

    pub fn shuffle(&mut self, side: Side, pile: PileId) -> Result<(), BattleError> {
        self.ensure_open()?;
        self.state.shuffle(side, pile);
        Ok(())
    }

    pub fn return_pile_to_library(&mut self, side: Side, pile: PileId) -> Result<usize, BattleError> {
        self.ensure_open()?;
        let moved = self.state.return_pile_to_library(side, pile);
        self.flush();
        Ok(moved)
    }

    pub fn add_card_to(
        &mut self,
        side: Side,
        pile: PileId,
        entity: EntityId,
        at_bottom: bool,
    ) -> Result<Option<PileId>, BattleError> {
        self.ensure_open()?;
        let from = self.state.add_card_to(side, pile, entity, at_bottom);
        self.flush();
        from
    }

    pub fn remove_card_from(&mut self, side: Side, pile: PileId, entity: EntityId) -> Result<(), BattleError> {
        self.ensure_open()?;
        let removed = self.state.remove_card_from(side, pile, entity);
        self.flush();
        removed
    }

    // === Frames ===

    /// Run `task` after `delay` frames.
    pub fn schedule(
        &mut self,
        delay: u64,
        task: impl FnOnce(&mut BattleSession) -> Result<(), BattleError> + 'static,
    ) -> Result<TaskId, BattleError> {
        self.ensure_open()?;
        Ok(self.scheduler.schedule(delay, task))
    }

    /// Advance one phase after `delay` frames, typically the length of an
    /// animation.
    pub fn schedule_advance(&mut self, delay: u64) -> Result<TaskId, BattleError> {
        self.schedule(delay, |session| session.advance().map(|_| ()))
    }

    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }

    /// Host frame tick. Runs the tasks that are due.
    ///
    /// A failing task does not stop the rest of the frame; the first error
    /// is returned once every due task has had its turn. A task cancelled
    /// by an earlier task of the same frame never runs, and nothing runs
    /// after an `abort`.
    pub fn update(&mut self) -> Result<(), BattleError> {
        if self.closed {
            return Ok(());
        }
        self.scheduler.advance_frame();
        let mut first_error = None;
        while !self.closed {
            let Some(task) = self.scheduler.next_due() else {
                break;
            };
            if self.scheduler.is_stale(&task) {
                continue;
            }
            let result = (task.run)(self);
            self.flush();
            if let Err(err) = result {
                tracing::warn!(task = ?task.id, %err, "scheduled task failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Tear the session down at a phase boundary.
    ///
    /// Pending tasks are discarded, committed battle cards are released,
    /// and every later operation fails with `SessionClosed`.
    pub fn abort(&mut self) {
        if self.closed {
            return;
        }
        let dropped = self.scheduler.cancel_all();
        for side in Side::BOTH {
            if let Some(entity) = self.state.participant_mut(side).battle_card.take() {
                self.state.clear_exhaust_route(entity);
            }
        }
        self.closed = true;
        tracing::info!(phase = %self.state.phase(), turn = self.state.turn(), dropped, "battle aborted");
    }

    fn ensure_open(&self) -> Result<(), BattleError> {
        if self.closed {
            Err(BattleError::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Deliver buffered events to every observer.
    fn flush(&mut self) {
        let events = self.state.take_events();
        if events.is_empty() {
            return;
        }
        for observer in &mut self.observers {
            for event in &events {
                observer.notify(event);
            }
        }
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("phase", &self.state.phase())
            .field("turn", &self.state.turn())
            .field("observers", &self.observers.len())
            .field("scheduler", &self.scheduler)
            .field("closed", &self.closed)
            .finish()
    }
}
