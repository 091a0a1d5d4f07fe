//! Duel game surface integration tests.
//!
//! Loads a game from JSON, builds decks from opened boosters, plays a
//! battle to the end and records the result.

use card_duel::battle::{AiBehavior, BattleAi};
use card_duel::cards::{CardCatalog, CardId};
use card_duel::core::Side;
use card_duel::decks::Violation;
use card_duel::effects::EffectTrigger;
use card_duel::error::{ConfigError, DeckError};
use card_duel::games::duel::{DuelGameBuilder, GameData};
use card_duel::rules::{MatchResult, StepOutcome};

const GAME: &str = r#"{
    "cards": [
        {"id": 1, "name": "Salamander", "element": "Fire", "level": 2, "power": 3, "rarity": 0},
        {"id": 2, "name": "Undine", "element": "Water", "level": 2, "power": 2, "rarity": 0},
        {"id": 3, "name": "Gnome", "element": "Earth", "level": 1, "power": 4, "rarity": 0},
        {"id": 4, "name": "Sylph", "element": "Wind", "level": 3, "power": 1, "rarity": 1},
        {"id": 5, "name": "Ifrit", "element": "Fire", "level": 5, "power": 8, "rarity": 3}
    ],
    "rulesets": [
        {"name": "Casual", "min_deck_size": 10, "max_deck_size": 20, "max_copies": 4,
         "restrictions": [{"applies_to": {"Rarity": {"min": 3, "max": null}}, "max_copies": 1}]},
        {"name": "Champion", "min_deck_size": 10, "unlock": {"Wins": 3}}
    ],
    "boosters": [
        {"id": 900, "name": "Starter", "cards_per_pack": 5, "pool": [1, 2, 3, 4, 5],
         "rarity_weights": [{"rarity": 0, "weight": 80.0}, {"rarity": 1, "weight": 15.0}, {"rarity": 3, "weight": 5.0}]}
    ],
    "battle": {"starting_health": 15, "max_health": 15, "max_turns": 40},
    "effects": [
        {"card": 5, "trigger": "Win", "effect": {"DamageOpponent": 2}}
    ]
}"#;

/// Test that game data loads with every section.
#[test]
fn test_load_game_data() {
    let data = GameData::from_json(GAME).unwrap();
    let game = DuelGameBuilder::from_data(data).build().unwrap();

    assert_eq!(game.catalog().len(), 5);
    assert_eq!(game.catalog().template(CardId::new(5)).unwrap().stats.power, 8);
    assert_eq!(game.rulesets().len(), 2);
    assert_eq!(game.booster(900).unwrap().rarity_weights.len(), 3);
    assert_eq!(game.battle_config().starting_health, 15);
    assert_eq!(game.battle_config().max_turns, Some(40));
    assert!(game.effects().has(CardId::new(5), EffectTrigger::Win));
    assert_eq!(game.unlocked_rulesets().len(), 1);
}

/// Test that invalid rulesets are rejected at load time.
#[test]
fn test_invalid_ruleset() {
    let json = r#"{"rulesets": [{"name": "Broken", "min_deck_size": 30, "max_deck_size": 20}]}"#;

    assert!(matches!(
        GameData::from_json(json),
        Err(ConfigError::InvalidRuleset { ref name, .. }) if name == "Broken"
    ));
}

/// Test that opened boosters only yield pool cards and feed deck building.
#[test]
fn test_boosters_feed_decks() {
    let mut game = DuelGameBuilder::from_data(GameData::from_json(GAME).unwrap())
        .seed(2024)
        .build()
        .unwrap();
    game.collection_mut().add_boosters(900, 3);

    let opened = game.open_booster(900, 3, true).unwrap();

    assert_eq!(opened.len(), 15);
    assert!(opened.iter().all(|card| (1..=5).contains(&card.raw())));
    assert_eq!(game.collection().total_cards(), 15);
    assert_eq!(game.collection().boosters(900), 0);
    assert!(matches!(
        game.open_booster(900, 1, true),
        Err(DeckError::BoosterUnavailable { owned: 0, .. })
    ));

    let deck = game.new_deck("Casual", "Opened").unwrap();
    for card in opened {
        // Copies beyond the ruleset limits are refused; the rest go in.
        let _ = game.add_card_to_deck(deck, card);
    }
    let report = game.validate_deck(deck).unwrap();
    assert!(report
        .violations
        .iter()
        .all(|v| matches!(v, Violation::TooFewCards { .. })));
}

/// Test that an unplayable deck cannot start a battle.
#[test]
fn test_unplayable_deck_refused() {
    let mut game = DuelGameBuilder::from_data(GameData::from_json(GAME).unwrap()).build().unwrap();
    game.collection_mut().add_card(CardId::new(1), 4);
    let deck = game.new_deck("Casual", "Tiny").unwrap();
    game.add_card_to_deck(deck, CardId::new(1)).unwrap();

    match game.start_battle(deck, deck, AiBehavior::Random) {
        Err(DeckError::Unplayable { name, report }) => {
            assert_eq!(name, "Tiny");
            assert!(report.violations.contains(&Violation::TooFewCards { size: 1, min: 10 }));
        }
        other => panic!("expected unplayable deck, got {:?}", other.map(|_| ())),
    }
    assert!(matches!(game.start_battle(9, deck, AiBehavior::Random), Err(DeckError::UnknownDeck(9))));
}

/// Test that the playable flag follows every deck edit.
#[test]
fn test_deck_edits_update_playable() {
    let mut game = DuelGameBuilder::from_data(GameData::from_json(GAME).unwrap()).build().unwrap();
    for card in 1..=3 {
        game.collection_mut().add_card(CardId::new(card), 4);
    }
    let deck = game.new_deck("Casual", "Builder").unwrap();
    assert!(!game.deck(deck).unwrap().playable);

    for card in 1..=3 {
        for _ in 0..3 {
            game.add_card_to_deck(deck, CardId::new(card)).unwrap();
        }
    }
    assert!(!game.deck(deck).unwrap().playable);
    game.add_card_to_deck(deck, CardId::new(1)).unwrap();
    assert!(game.deck(deck).unwrap().playable);

    game.remove_card_from_deck(deck, CardId::new(2)).unwrap();
    assert!(!game.deck(deck).unwrap().playable);
}

/// Test a full AI-driven battle from deck building to recorded result.
#[test]
fn test_play_and_record() {
    let mut game = DuelGameBuilder::from_data(GameData::from_json(GAME).unwrap())
        .seed(7)
        .build()
        .unwrap();
    for card in 1..=4 {
        game.collection_mut().add_card(CardId::new(card), 4);
    }
    let player = game.new_deck("Casual", "Player").unwrap();
    let opponent = game.new_deck("Casual", "Opponent").unwrap();
    for card in 1..=4 {
        for _ in 0..3 {
            game.add_card_to_deck(player, CardId::new(card)).unwrap();
            game.add_card_to_deck(opponent, CardId::new(card)).unwrap();
        }
    }

    let session = game.start_battle(player, opponent, AiBehavior::Weakest).unwrap();
    let mut session =
        session.with_controller(Side::Player, Some(Box::new(AiBehavior::Strongest) as Box<dyn BattleAi>));
    let outcome = session.advance_until_input(1000).unwrap();

    let StepOutcome::Finished(result) = outcome else {
        panic!("battle did not finish: {outcome:?}");
    };
    assert_eq!(session.result(), Some(result));
    assert!(session.state().is_consistent());
    assert_eq!(session.state().card_count(), 24);

    game.record_result(player, result).unwrap();
    let stats = game.deck(player).unwrap().stats;
    assert_eq!(stats.played, 1);
    assert_eq!(stats.won, u32::from(result == MatchResult::Winner(Side::Player)));
}

/// Test that enough recorded wins unlock a ruleset.
#[test]
fn test_wins_unlock_ruleset() {
    let mut game = DuelGameBuilder::from_data(GameData::from_json(GAME).unwrap()).build().unwrap();
    let deck = game.new_deck("Casual", "Grinder").unwrap();

    assert!(matches!(game.new_deck("Champion", "Too Soon"), Err(DeckError::LockedRuleset(_))));
    for _ in 0..3 {
        game.record_result(deck, MatchResult::Winner(Side::Player)).unwrap();
    }
    game.record_result(deck, MatchResult::Draw).unwrap();

    assert_eq!(game.deck(deck).unwrap().stats.tied, 1);
    assert_eq!(game.unlocked_rulesets().len(), 2);
    assert!(game.new_deck("Champion", "Earned").is_ok());
}
