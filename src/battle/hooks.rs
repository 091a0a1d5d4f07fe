//! Presentation hooks.
//!
//! A rendering layer implements `BattleObserver` to animate what the rules
//! have already decided. Every hook is a notification: the session never
//! waits on an observer, and observers cannot change the battle.

use crate::core::{BattleEvent, BattleReport, CardMove};
use crate::rules::{MatchResult, Phase};

/// Receives battle events after each session operation.
pub trait BattleObserver {
    fn on_phase_change(&mut self, _phase: Phase, _turn: u32) {}

    fn on_card_moved(&mut self, _moved: &CardMove) {}

    fn on_battle_resolved(&mut self, _report: &BattleReport) {}

    fn on_match_finished(&mut self, _result: MatchResult) {}

    /// Route an event to the matching hook.
    fn notify(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::PhaseChanged { phase, turn } => self.on_phase_change(*phase, *turn),
            BattleEvent::CardMoved(moved) => self.on_card_moved(moved),
            BattleEvent::BattleResolved(report) => self.on_battle_resolved(report),
            BattleEvent::MatchFinished(result) => self.on_match_finished(*result),
        }
    }
}

/// Observer that keeps every event, for replays and tests.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<BattleEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.borrow().clone()
    }

    /// Phases entered so far, in order.
    #[must_use]
    pub fn phases(&self) -> Vec<Phase> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::PhaseChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl BattleObserver for EventLog {
    fn notify(&mut self, event: &BattleEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;

    #[derive(Default)]
    struct Counts {
        phases: usize,
        finished: Option<MatchResult>,
    }

    impl BattleObserver for Counts {
        fn on_phase_change(&mut self, _phase: Phase, _turn: u32) {
            self.phases += 1;
        }

        fn on_match_finished(&mut self, result: MatchResult) {
            self.finished = Some(result);
        }
    }

    #[test]
    fn test_notify_dispatches() {
        let mut counts = Counts::default();
        counts.notify(&BattleEvent::PhaseChanged { phase: Phase::Draw, turn: 1 });
        counts.notify(&BattleEvent::MatchFinished(MatchResult::Winner(Side::Player)));

        assert_eq!(counts.phases, 1);
        assert_eq!(counts.finished, Some(MatchResult::Winner(Side::Player)));
    }

    #[test]
    fn test_event_log_shares_events() {
        let log = EventLog::new();
        let mut handle = log.clone();
        handle.notify(&BattleEvent::PhaseChanged { phase: Phase::Main, turn: 2 });

        assert_eq!(log.phases(), vec![Phase::Main]);
        log.clear();
        assert!(log.events().is_empty());
    }
}
