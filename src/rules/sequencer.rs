//! Turn/phase sequencer.
//!
//! `step` executes the current phase against a `BattleState`, checks the
//! victory condition, and moves to the next phase:
//!
//! - **Start**: shuffle both libraries (if configured), draw opening hands
//! - **Upkeep**: the turn counter was incremented on entry; Upkeep effects
//!   of hand cards fire, player side first
//! - **Draw**: both sides draw `cards_per_draw`
//! - **Main**: both sides commit a battle card. AI sides that do not wait
//!   commit first; the step stays in Main and reports
//!   `AwaitingSelection` until every human side with cards has committed
//! - **Battle**: reveal, Reveal effects, resolve, damage, outcome effects,
//!   then battle cards go to Discard (or Exhaust when routed)
//! - **End**: EndOfTurn effects of hand cards, then the turn limit
//!
//! A victory condition moves any phase straight to `Finished`.

use super::outcome::MatchResult;
use super::phase::Phase;
use super::resolver::{resolve, BattleOutcome, Verdict};
use crate::battle::BattleAi;
use crate::core::{BattleReport, BattleState, EntityId, Side, SideMap};
use crate::effects::{EffectRegistry, EffectTrigger};
use crate::error::BattleError;
use crate::zones::PileId;

/// AI controller per side. `None` marks a side driven by
/// `select_battle_card`.
pub type Controllers = SideMap<Option<Box<dyn BattleAi>>>;

/// What a call to `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The previous phase completed and this phase was entered.
    Advanced(Phase),
    /// Still in Main, waiting for this side's battle card.
    AwaitingSelection(Side),
    /// The duel is over.
    Finished(MatchResult),
}

/// Execute the current phase and advance.
pub fn step(
    state: &mut BattleState,
    effects: &EffectRegistry,
    controllers: &mut Controllers,
) -> Result<StepOutcome, BattleError> {
    let phase = state.phase();
    match phase {
        Phase::Finished => {
            return Ok(StepOutcome::Finished(state.result().unwrap_or(MatchResult::Draw)));
        }
        Phase::Start => run_start(state),
        Phase::Upkeep => fire_hand_effects(state, effects, EffectTrigger::Upkeep)?,
        Phase::Draw => {
            let count = state.config().cards_per_draw;
            for side in Side::BOTH {
                state.draw(side, count);
            }
        }
        Phase::Main => {
            if let Some(side) = run_main(state, controllers)? {
                return Ok(StepOutcome::AwaitingSelection(side));
            }
        }
        Phase::Battle => run_battle(state, effects)?,
        Phase::End => fire_hand_effects(state, effects, EffectTrigger::EndOfTurn)?,
    }

    if let Some(result) = state.check_victory() {
        state.finish(result);
        return Ok(StepOutcome::Finished(result));
    }
    if phase == Phase::End && state.config().max_turns.is_some_and(|max| state.turn() >= max) {
        state.finish(MatchResult::Draw);
        return Ok(StepOutcome::Finished(MatchResult::Draw));
    }

    let next = phase.next();
    if next == Phase::Upkeep {
        state.begin_turn();
    }
    state.set_phase(next);
    Ok(StepOutcome::Advanced(next))
}

/// Commit a human-controlled side's battle card for this turn.
pub fn select_battle_card(state: &mut BattleState, side: Side, entity: EntityId) -> Result<(), BattleError> {
    if state.phase() != Phase::Main {
        return Err(BattleError::WrongPhase {
            expected: Phase::Main,
            actual: state.phase(),
        });
    }
    let participant = state.participant(side);
    if participant.battle_card.is_some() {
        return Err(BattleError::AlreadySelected(side));
    }
    if participant.location(entity) != Some(PileId::Hand) {
        return Err(BattleError::NotInPile {
            entity,
            side,
            pile: PileId::Hand,
        });
    }
    tracing::debug!(%side, %entity, "battle card selected");
    state.participant_mut(side).battle_card = Some(entity);
    Ok(())
}

fn run_start(state: &mut BattleState) {
    let config = state.config();
    let (shuffle, hand_size) = (config.shuffle_on_start, config.initial_hand_size);
    for side in Side::BOTH {
        if shuffle {
            state.shuffle(side, PileId::Library);
        }
        state.draw(side, hand_size);
    }
    tracing::info!(hand_size, shuffle, "duel started");
}

/// Fire a phase trigger for every card in each hand, player first.
fn fire_hand_effects(
    state: &mut BattleState,
    effects: &EffectRegistry,
    trigger: EffectTrigger,
) -> Result<(), BattleError> {
    for side in Side::BOTH {
        let hand = state.participant(side).hand().to_vec();
        for entity in hand {
            // An earlier effect may have moved it.
            if state.participant(side).location(entity) == Some(PileId::Hand) {
                effects.fire(state, entity, trigger)?;
            }
        }
    }
    Ok(())
}

fn needs_card(state: &BattleState, side: Side) -> bool {
    let participant = state.participant(side);
    participant.battle_card.is_none() && !participant.hand().is_empty()
}

/// Let AI sides commit. Returns the first human side still to choose.
fn run_main(state: &mut BattleState, controllers: &mut Controllers) -> Result<Option<Side>, BattleError> {
    let waiting_human = |state: &BattleState, controllers: &Controllers| {
        Side::BOTH
            .into_iter()
            .find(|&side| controllers[side].is_none() && needs_card(state, side))
    };

    for side in Side::BOTH {
        if !needs_card(state, side) {
            continue;
        }
        let other_pending = controllers[side.other()].is_none() && needs_card(state, side.other());
        let Some(ai) = controllers[side].as_mut() else {
            continue;
        };
        if ai.waits_for_player() && other_pending {
            continue;
        }
        let (view, rng) = state.selection_view(side, ai.waits_for_player());
        let choice = ai.choose_card(&view, rng);
        if let Some(entity) = choice {
            select_battle_card(state, side, entity)?;
        }
    }

    Ok(waiting_human(state, controllers))
}

fn run_battle(state: &mut BattleState, effects: &EffectRegistry) -> Result<(), BattleError> {
    let committed = SideMap::new(|side| {
        let participant = state.participant(side);
        participant
            .battle_card
            .filter(|&entity| participant.location(entity) == Some(PileId::Hand))
    });
    if committed.iter().all(|(_, card)| card.is_none()) {
        for side in Side::BOTH {
            state.participant_mut(side).battle_card = None;
        }
        tracing::debug!(turn = state.turn(), "no battle cards, battle skipped");
        return Ok(());
    }

    for entity in Side::BOTH.into_iter().filter_map(|side| committed[side]) {
        if let Some(card) = state.card_mut(entity) {
            card.revealed = true;
        }
    }
    for entity in Side::BOTH.into_iter().filter_map(|side| committed[side]) {
        effects.fire(state, entity, EffectTrigger::Reveal)?;
    }

    let outcome = match (committed[Side::Player], committed[Side::Opponent]) {
        (Some(a), Some(b)) => {
            let a = state.card(a).ok_or(BattleError::UnknownCard(a))?;
            let b = state.card(b).ok_or(BattleError::UnknownCard(b))?;
            resolve(a, b, &state.resolver_options())
        }
        (Some(_), None) => BattleOutcome::uncontested(),
        (None, _) => BattleOutcome::uncontested().flipped(),
    };

    let damage = state.config().battle_damage;
    match outcome.verdict {
        Verdict::Win => {
            state.damage(Side::Opponent, damage);
        }
        Verdict::Lose => {
            state.damage(Side::Player, damage);
        }
        Verdict::MutualLoss => {
            state.damage(Side::Player, damage);
            state.damage(Side::Opponent, damage);
        }
        Verdict::Tie => {}
    }

    let card_id = |side: Side| committed[side].and_then(|e| state.card(e)).map(|card| card.card_id);
    let report = BattleReport {
        turn: state.turn(),
        player_card: card_id(Side::Player),
        opponent_card: card_id(Side::Opponent),
        outcome,
    };
    tracing::debug!(turn = report.turn, verdict = ?outcome.verdict, decided_by = ?outcome.decided_by, "battle resolved");
    state.record_battle(report);

    for side in Side::BOTH {
        let Some(entity) = committed[side] else {
            continue;
        };
        let trigger = match report.outcome_for(side).verdict {
            Verdict::Win => Some(EffectTrigger::Win),
            Verdict::Lose | Verdict::MutualLoss => Some(EffectTrigger::Lose),
            Verdict::Tie => None,
        };
        if let Some(trigger) = trigger {
            effects.fire(state, entity, trigger)?;
        }
        effects.fire(state, entity, EffectTrigger::AfterBattle)?;
    }

    for side in Side::BOTH {
        state.participant_mut(side).battle_card = None;
        let Some(entity) = committed[side] else {
            continue;
        };
        let exhaust = state.clear_exhaust_route(entity);
        let Some(owner) = state.card(entity).map(|card| card.owner) else {
            continue;
        };
        // Effects may already have sent the card somewhere else.
        if state.participant(owner).location(entity) == Some(PileId::Hand) {
            let pile = if exhaust { PileId::Exhaust } else { PileId::Discard };
            state.add_card_to(owner, pile, entity, false)?;
        }
    }
    Ok(())
}
