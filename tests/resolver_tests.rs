//! Battle resolution integration tests.
//!
//! Covers the resolution order (element, level, power, health) on raw
//! stats and through full battles driven by a session.

use std::rc::Rc;

use card_duel::battle::{AiBehavior, BattleSession};
use card_duel::cards::{CardId, CardRegistry, CardStats, CardTemplate, Element};
use card_duel::core::{BattleConfig, BattleState, Side};
use card_duel::effects::EffectRegistry;
use card_duel::rules::{resolve_stats, BattleOutcome, Criterion, MatchResult, ResolverOptions, StepOutcome, Verdict};

fn duel(a: (Element, CardStats), b: (Element, CardStats)) -> BattleOutcome {
    resolve_stats(a.0, a.1, b.0, b.1, &ResolverOptions::default())
}

fn level(level: i64) -> CardStats {
    CardStats::new(level, 1, 1)
}

// =============================================================================
// Resolution order
// =============================================================================

/// Test that an element advantage beats a higher level.
#[test]
fn test_fire_beats_wind_on_element() {
    let outcome = duel((Element::Fire, level(3)), (Element::Wind, level(1)));
    assert_eq!(outcome, BattleOutcome::new(Verdict::Win, Criterion::Element));

    let outcome = duel((Element::Fire, level(1)), (Element::Wind, CardStats::new(9, 9, 9)));
    assert_eq!(outcome.verdict, Verdict::Win);
}

/// Test that Water beats Fire regardless of level.
#[test]
fn test_water_beats_fire_on_element() {
    let outcome = duel((Element::Fire, level(3)), (Element::Water, level(1)));
    assert_eq!(outcome, BattleOutcome::new(Verdict::Lose, Criterion::Element));
}

/// Test that the full element cycle holds.
#[test]
fn test_element_cycle() {
    let cycle = [Element::Fire, Element::Wind, Element::Earth, Element::Water];
    for (i, &attacker) in cycle.iter().enumerate() {
        let defender = cycle[(i + 1) % cycle.len()];
        assert_eq!(duel((attacker, level(1)), (defender, level(5))).verdict, Verdict::Win);
        assert_eq!(duel((defender, level(5)), (attacker, level(1))).verdict, Verdict::Lose);
    }
}

/// Test that level decides between equal elements.
#[test]
fn test_earth_level_check() {
    let outcome = duel((Element::Earth, level(2)), (Element::Earth, level(5)));
    assert_eq!(outcome, BattleOutcome::new(Verdict::Lose, Criterion::Level));
}

/// Test that power decides at equal level.
#[test]
fn test_power_check() {
    let outcome = duel(
        (Element::None, CardStats::new(4, 10, 1)),
        (Element::None, CardStats::new(4, 7, 1)),
    );
    assert_eq!(outcome, BattleOutcome::new(Verdict::Win, Criterion::Power));
}

/// Test that Light against Dark defeats both, whatever the stats.
#[test]
fn test_light_dark_double_ko() {
    for (a, b) in [(level(1), level(9)), (CardStats::new(5, 9, 9), level(1))] {
        let outcome = duel((Element::Light, a), (Element::Dark, b));
        assert_eq!(outcome, BattleOutcome::new(Verdict::MutualLoss, Criterion::Element));
        assert_ne!(outcome.verdict, Verdict::Tie);

        let flipped = duel((Element::Dark, b), (Element::Light, a));
        assert_eq!(flipped.verdict, Verdict::MutualLoss);
    }
}

/// Test that health is only compared when enabled.
#[test]
fn test_health_check_toggle() {
    let a = CardStats::new(2, 2, 5);
    let b = CardStats::new(2, 2, 3);

    let off = resolve_stats(Element::None, a, Element::None, b, &ResolverOptions { health_check: false });
    let on = resolve_stats(Element::None, a, Element::None, b, &ResolverOptions { health_check: true });

    assert_eq!(off, BattleOutcome::new(Verdict::Tie, Criterion::None));
    assert_eq!(on, BattleOutcome::new(Verdict::Win, Criterion::Health));
}

// =============================================================================
// Battles in a session
// =============================================================================

fn session(player: CardTemplate, opponent: CardTemplate, config: BattleConfig) -> BattleSession {
    let (player_id, opponent_id) = (player.id, opponent.id);
    let catalog = CardRegistry::from_templates([player, opponent]).unwrap();
    let mut state = BattleState::new(config, 21);
    state.load_deck(Side::Player, "P", &[player_id; 5], &catalog).unwrap();
    state.load_deck(Side::Opponent, "O", &[opponent_id; 5], &catalog).unwrap();
    state.participant_mut(Side::Player).ai = Some(AiBehavior::Strongest);
    state.participant_mut(Side::Opponent).ai = Some(AiBehavior::Strongest);
    BattleSession::new(state, Rc::new(EffectRegistry::new()))
}

/// Test that Light against Dark damages both participants every turn,
/// ending in a tie.
#[test]
fn test_double_ko_ends_in_tie() {
    let light = CardTemplate::new(CardId::new(1), "Seraph").with_element(Element::Light).with_stats(1, 1, 1);
    let dark = CardTemplate::new(CardId::new(2), "Wraith").with_element(Element::Dark).with_stats(9, 9, 9);
    let mut session = session(light, dark, BattleConfig::default().with_health(10));

    let outcome = session.advance_until_input(100).unwrap();

    assert_eq!(outcome, StepOutcome::Finished(MatchResult::Tie));
    let history = session.state().history();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|report| report.outcome.verdict == Verdict::MutualLoss));
    for side in Side::BOTH {
        assert_eq!(session.state().participant(side).health, 0);
    }
}

/// Test that an element advantage wins the match.
#[test]
fn test_element_advantage_wins_match() {
    let fire = CardTemplate::new(CardId::new(1), "Salamander").with_element(Element::Fire).with_stats(1, 1, 1);
    let wind = CardTemplate::new(CardId::new(2), "Sylph").with_element(Element::Wind).with_stats(5, 5, 5);
    let mut session = session(fire, wind, BattleConfig::default());

    let outcome = session.advance_until_input(100).unwrap();

    assert_eq!(outcome, StepOutcome::Finished(MatchResult::Winner(Side::Player)));
    assert_eq!(session.state().participant(Side::Player).health, 20);
    assert_eq!(session.state().participant(Side::Opponent).health, 0);
    assert_eq!(session.state().history().len(), 4);
}
