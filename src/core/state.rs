//! Battle state.
//!
//! `BattleState` is the single owner of everything a duel mutates: both
//! participants, every card instance, the turn and phase counters, the
//! RNG, and the events waiting to be delivered. It is only ever touched
//! through its owning `BattleSession`, so no locking is involved.
//!
//! ## Pile operations
//!
//! The side-aware wrappers (`draw`, `add_card_to`, ...) are the only way
//! to move a card from outside the crate. They apply the house rules (empty library, recycling,
//! cross-side moves) and settle the participants' move journals into
//! `CardMoved` events. Cards that land in a Library are reset to their
//! original stats and turned face-down.
//!
//! ## History
//!
//! Resolved battles are kept in an `im::Vector` so the state can be
//! cloned cheaply for AI look-ahead and replays.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};

use super::config::{BattleConfig, EmptyLibraryRule};
use super::entity::{EntityAllocator, EntityId};
use super::event::{BattleEvent, BattleReport, CardMove};
use super::participant::Participant;
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::battle::SelectionView;
use crate::cards::{Card, CardCatalog, CardId};
use crate::error::BattleError;
use crate::rules::{MatchResult, Phase, ResolverOptions};
use crate::zones::{DrawFrom, PileId};

/// Complete state of one duel.
#[derive(Clone, Debug)]
pub struct BattleState {
    config: BattleConfig,

    phase: Phase,

    /// Turn number. Zero until the first Upkeep.
    turn: u32,

    participants: SideMap<Participant>,

    cards: FxHashMap<EntityId, Card>,

    allocator: EntityAllocator,

    rng: GameRng,

    /// Battle cards an effect sent to Exhaust instead of Discard.
    exhaust_routed: FxHashSet<EntityId>,

    events: Vec<BattleEvent>,

    history: Vector<BattleReport>,

    result: Option<MatchResult>,
}

impl BattleState {
    /// Create an empty duel in the Start phase.
    #[must_use]
    pub fn new(config: BattleConfig, seed: u64) -> Self {
        let participants = SideMap::new(|side| Participant::new(side, &config));
        Self {
            config,
            phase: Phase::Start,
            turn: 0,
            participants,
            cards: FxHashMap::default(),
            allocator: EntityAllocator::default(),
            rng: GameRng::new(seed),
            exhaust_routed: FxHashSet::default(),
            events: Vec::new(),
            history: Vector::new(),
            result: None,
        }
    }

    /// Instantiate a deck's cards into a participant's Library.
    ///
    /// The first card of the list ends up at the bottom. Fails without
    /// creating anything if a card is missing from the catalog.
    pub fn load_deck(
        &mut self,
        side: Side,
        deck_name: impl Into<String>,
        cards: &[CardId],
        catalog: &(impl CardCatalog + ?Sized),
    ) -> Result<usize, BattleError> {
        let templates = cards
            .iter()
            .map(|&id| catalog.template(id).ok_or(BattleError::UnknownTemplate(id)))
            .collect::<Result<Vec<_>, _>>()?;

        for template in templates {
            let entity = self.allocator.alloc();
            self.cards.insert(entity, Card::from_template(entity, template, side));
            self.participants[side].add_card_to(PileId::Library, entity, false);
        }
        self.participants[side].deck_name = Some(deck_name.into());
        self.settle(side);
        Ok(cards.len())
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn participant(&self, side: Side) -> &Participant {
        &self.participants[side]
    }

    /// Direct access to a participant's counters and controller tag.
    ///
    /// Pile moves are crate-private on `Participant`; callers move cards
    /// through the `BattleState` wrappers below, which keep every card in
    /// one pile across both sides.
    pub fn participant_mut(&mut self, side: Side) -> &mut Participant {
        &mut self.participants[side]
    }

    #[must_use]
    pub fn card(&self, entity: EntityId) -> Option<&Card> {
        self.cards.get(&entity)
    }

    pub fn card_mut(&mut self, entity: EntityId) -> Option<&mut Card> {
        self.cards.get_mut(&entity)
    }

    /// Cards of a pile, bottom to top.
    pub fn cards_in(&self, side: Side, pile: PileId) -> impl Iterator<Item = &Card> + '_ {
        self.participants[side]
            .pile(pile)
            .iter()
            .filter_map(move |entity| self.cards.get(entity))
    }

    /// Total number of card instances in the duel.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            health_check: self.config.health_check,
        }
    }

    /// Resolved battles, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<BattleReport> {
        &self.history
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    // === Pile operations ===

    /// Draw from the top of the Library under the empty-library rule.
    pub fn draw(&mut self, side: Side, count: usize) -> usize {
        self.draw_from(side, count, DrawFrom::Top)
    }

    /// Draw up to `count` cards. Returns the number actually drawn.
    ///
    /// A short Library is handled by `BattleConfig::empty_library`:
    /// `Ignore` stops, `Lose` marks the side decked out, `Recycle` returns
    /// the Discard to the Library once, shuffles it, and keeps drawing.
    pub fn draw_from(&mut self, side: Side, count: usize, from: DrawFrom) -> usize {
        let mut drawn = 0;
        let mut recycled = false;
        loop {
            let participant = &mut self.participants[side];
            drawn += participant.draw(count - drawn, from);
            if drawn == count {
                break;
            }
            match self.config.empty_library {
                EmptyLibraryRule::Ignore => break,
                EmptyLibraryRule::Lose => {
                    tracing::debug!(%side, "library empty, side is decked out");
                    participant.decked_out = true;
                    break;
                }
                EmptyLibraryRule::Recycle => {
                    if recycled || participant.discard().is_empty() {
                        break;
                    }
                    participant.return_pile_to_library(PileId::Discard);
                    participant.shuffle(PileId::Library, &mut self.rng);
                    recycled = true;
                }
            }
        }
        self.settle(side);
        drawn
    }

    pub fn shuffle(&mut self, side: Side, pile: PileId) {
        self.participants[side].shuffle(pile, &mut self.rng);
    }

    /// Move a whole pile into the Library. Returns the number moved.
    pub fn return_pile_to_library(&mut self, side: Side, pile: PileId) -> usize {
        let moved = self.participants[side].return_pile_to_library(pile);
        self.settle(side);
        moved
    }

    /// Put a card into one of `side`'s piles.
    ///
    /// A card held by the other participant changes owner. Returns the
    /// pile the card came from within `side`'s piles.
    pub fn add_card_to(
        &mut self,
        side: Side,
        pile: PileId,
        entity: EntityId,
        at_bottom: bool,
    ) -> Result<Option<PileId>, BattleError> {
        let card = self.cards.get_mut(&entity).ok_or(BattleError::UnknownCard(entity))?;
        let owner = card.owner;
        if owner != side {
            let previous = &mut self.participants[owner];
            if let Some(from) = previous.location(entity) {
                previous.remove_card_from(from, entity)?;
            }
            if previous.battle_card == Some(entity) {
                previous.battle_card = None;
            }
            card.owner = side;
            self.settle(owner);
        }
        let from = self.participants[side].add_card_to(pile, entity, at_bottom);
        self.settle(side);
        Ok(from)
    }

    /// Take a card out of a pile, leaving it outside every pile.
    pub fn remove_card_from(&mut self, side: Side, pile: PileId, entity: EntityId) -> Result<(), BattleError> {
        self.participants[side].remove_card_from(pile, entity)?;
        self.settle(side);
        Ok(())
    }

    /// Send a battle card to Exhaust instead of Discard after this battle.
    pub fn route_to_exhaust(&mut self, entity: EntityId) {
        self.exhaust_routed.insert(entity);
    }

    #[must_use]
    pub fn is_routed_to_exhaust(&self, entity: EntityId) -> bool {
        self.exhaust_routed.contains(&entity)
    }

    pub(crate) fn clear_exhaust_route(&mut self, entity: EntityId) -> bool {
        self.exhaust_routed.remove(&entity)
    }

    // === Counters ===

    /// Damage a participant under the configured damage rule. Returns the
    /// health lost.
    pub fn damage(&mut self, side: Side, amount: i64) -> i64 {
        let lost = self.participants[side].take_damage(amount, self.config.damage);
        tracing::debug!(%side, amount, lost, health = self.participants[side].health, "damage");
        lost
    }

    pub fn heal(&mut self, side: Side, amount: i64) {
        self.participants[side].heal(amount);
    }

    pub fn gain_shield(&mut self, side: Side, amount: i64) {
        self.participants[side].gain_shield(amount);
    }

    // === Phases and results ===

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        tracing::debug!(%phase, turn = self.turn, "phase");
        self.events.push(BattleEvent::PhaseChanged { phase, turn: self.turn });
    }

    pub(crate) fn begin_turn(&mut self) {
        self.turn += 1;
    }

    /// Result if a victory condition holds right now.
    ///
    /// A side loses at zero health or when decked out. Both at once is a
    /// tie.
    #[must_use]
    pub fn check_victory(&self) -> Option<MatchResult> {
        let player = self.participants[Side::Player].is_defeated();
        let opponent = self.participants[Side::Opponent].is_defeated();
        match (player, opponent) {
            (true, true) => Some(MatchResult::Tie),
            (true, false) => Some(MatchResult::Winner(Side::Opponent)),
            (false, true) => Some(MatchResult::Winner(Side::Player)),
            (false, false) => None,
        }
    }

    pub(crate) fn finish(&mut self, result: MatchResult) {
        tracing::info!(%result, turn = self.turn, "duel finished");
        self.result = Some(result);
        self.set_phase(Phase::Finished);
        self.events.push(BattleEvent::MatchFinished(result));
    }

    pub(crate) fn record_battle(&mut self, report: BattleReport) {
        self.history.push_back(report);
        self.events.push(BattleEvent::BattleResolved(report));
    }

    /// Everything an AI may look at when picking a battle card, plus the
    /// RNG to pick with.
    ///
    /// The other side's battle card is only included when `reveal_other`
    /// is set.
    pub fn selection_view(&mut self, side: Side, reveal_other: bool) -> (SelectionView<'_>, &mut GameRng) {
        let own = &self.participants[side];
        let other = &self.participants[side.other()];
        let cards = &self.cards;
        let view = SelectionView {
            side,
            turn: self.turn,
            hand: own.hand().iter().filter_map(|e| cards.get(e)).collect(),
            opposing_card: if reveal_other {
                other.battle_card.and_then(|e| cards.get(&e))
            } else {
                None
            },
            own,
            other,
            options: ResolverOptions {
                health_check: self.config.health_check,
            },
        };
        (view, &mut self.rng)
    }

    // === Events ===

    /// Turn a participant's journaled moves into events.
    fn settle(&mut self, side: Side) {
        for mv in self.participants[side].take_moves() {
            let Some(card) = self.cards.get_mut(&mv.entity) else {
                continue;
            };
            if mv.to == Some(PileId::Library) {
                card.reset();
            }
            tracing::trace!(%side, entity = %mv.entity, from = ?mv.from, to = ?mv.to, "card moved");
            self.events.push(BattleEvent::CardMoved(CardMove {
                side,
                entity: mv.entity,
                card_id: card.card_id,
                from: mv.from,
                to: mv.to,
            }));
        }
    }

    /// Drain buffered events, oldest first.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        for side in Side::BOTH {
            self.settle(side);
        }
        std::mem::take(&mut self.events)
    }

    /// Check the one-location invariant for every card.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let held = |entity: &EntityId| {
            Side::BOTH
                .iter()
                .filter(|&&side| self.participants[side].piles().contains(*entity))
                .count()
        };
        Side::BOTH.iter().all(|&side| self.participants[side].piles().is_consistent())
            && self.cards.keys().all(|entity| held(entity) <= 1)
    }
}
