//! Player state and the build / development-card state machine.
//!
//! This module contains:
//! - `TurnState`, the single per-turn record reset when a turn begins
//! - `Player` with its ledger, building lists, cards and point total
//! - Placement actions (settlement, road, city upgrade)
//! - Development card purchase and turn-gated use
//! - `PlayerStatus`, a read-only snapshot for UIs
//!
//! Every action validates first and mutates last, so a failed action leaves
//! the player, the board and the deck exactly as they were.

use crate::actions::GameEvent;
use crate::board::{BoardCells, EdgeBuilding, PlayerId, RoadId, VertexBuilding, VertexId};
use crate::cards::{CardDraw, CardEffect, CardHolder, CardKind, OwnedCard, VictoryPoint};
use crate::costs::{purchase, PurchasableItem};
use crate::game::GameError;
use crate::resources::{ResourceLedger, ResourceType};
use crate::validator::{Placement, Rejection, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Players at or below this many points are still placing their free opening pieces
pub const SETUP_POINT_CEILING: u32 = 2;

/// Flags that only live for one turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub is_current_turn: bool,
    pub purchased_development_card: bool,
    /// Year of Plenty picks consumed in the current activation
    pub year_of_plenty_picks: [bool; 2],
    /// Road placements still owed by a Road Building card
    pub free_roads: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    points: u32,
    resources: ResourceLedger,
    settlements: Vec<VertexId>,
    cities: Vec<VertexId>,
    roads: Vec<RoadId>,
    /// Knights played
    knights: u32,
    /// Victory point cards acquired
    victory_point_cards: u32,
    dev_cards: Vec<OwnedCard>,
    turn: TurnState,
}

impl Player {
    /// Create a new player with nothing
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            points: 0,
            resources: ResourceLedger::new(),
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
            knights: 0,
            victory_point_cards: 0,
            dev_cards: Vec::new(),
            turn: TurnState::default(),
        }
    }

    // ==================== Getters ====================

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn settlements(&self) -> &[VertexId] {
        &self.settlements
    }

    pub fn cities(&self) -> &[VertexId] {
        &self.cities
    }

    pub fn roads(&self) -> &[RoadId] {
        &self.roads
    }

    pub fn settlement_count(&self) -> usize {
        self.settlements.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn knight_count(&self) -> u32 {
        self.knights
    }

    pub fn victory_point_cards(&self) -> u32 {
        self.victory_point_cards
    }

    pub fn development_cards(&self) -> &[OwnedCard] {
        &self.dev_cards
    }

    /// Cards of a kind in hand, playable or not
    pub fn development_card_count(&self, kind: CardKind) -> usize {
        self.dev_cards.iter().filter(|c| c.kind == kind).count()
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Opening placements are free while points are at or below the ceiling
    pub fn is_setup_phase(&self) -> bool {
        self.points <= SETUP_POINT_CEILING
    }

    /// Read-only snapshot for status reporting
    pub fn status(&self) -> PlayerStatus {
        let mut development_cards = BTreeMap::new();
        for card in &self.dev_cards {
            *development_cards.entry(card.kind).or_insert(0) += 1;
        }

        PlayerStatus {
            id: self.id,
            name: self.name.clone(),
            points: self.points,
            resources: self.resources.clone(),
            settlements: self.settlements.len(),
            cities: self.cities.len(),
            roads: self.roads.len(),
            knights: self.knights,
            victory_point_cards: self.victory_point_cards,
            development_cards,
            turn: self.turn,
        }
    }

    // ==================== Turn Management ====================

    /// Start this player's turn: fresh per-turn record, last turn's cards become playable
    pub fn begin_turn(&mut self) {
        self.turn = TurnState {
            is_current_turn: true,
            ..TurnState::default()
        };
        for card in &mut self.dev_cards {
            card.acquired_this_turn = false;
        }
    }

    pub fn end_turn(&mut self) {
        self.turn.is_current_turn = false;
        self.turn.free_roads = 0;
    }

    // ==================== Economy ====================

    /// Credit production (dice rolls, setup grants)
    pub fn collect(&mut self, produced: &ResourceLedger) {
        self.resources.credit_all(produced);
        debug!(player = self.id, %produced, "resources collected");
    }

    /// Pay for an item without granting it
    pub fn purchase(&mut self, item: PurchasableItem) -> Result<(), GameError> {
        purchase(&mut self.resources, item)
    }

    pub(crate) fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }

    // ==================== Building ====================

    /// Place a settlement.
    ///
    /// Free during setup, where every tile around the vertex also grants one
    /// unit of what it produces. Afterwards it costs a Settlement and grants
    /// nothing.
    pub fn place_settlement<B, V>(
        &mut self,
        vertex: VertexId,
        board: &mut B,
        validator: &V,
    ) -> Result<GameEvent, GameError>
    where
        B: BoardCells + ?Sized,
        V: Validator<B> + ?Sized,
    {
        validator.validate(Placement::Settlement(vertex), self, board)?;
        match board.vertex(vertex) {
            Some(VertexBuilding::Empty) => {}
            Some(_) => return Err(Rejection::Occupied.into()),
            None => return Err(Rejection::UnknownVertex(vertex).into()),
        }

        let paid = !self.is_setup_phase();
        let granted = if paid {
            self.purchase(PurchasableItem::Settlement)?;
            ResourceLedger::new()
        } else {
            board
                .tiles_for_vertex(vertex)
                .into_iter()
                .filter_map(|tile| tile.resource())
                .map(|resource| (resource, 1))
                .collect()
        };
        self.resources.credit_all(&granted);

        board.set_vertex(vertex, VertexBuilding::Settlement(self.id));
        self.settlements.push(vertex);
        self.points += 1;

        info!(player = self.id, vertex, paid, %granted, "settlement built");
        Ok(GameEvent::SettlementBuilt {
            player: self.id,
            vertex,
            paid,
            granted,
        })
    }

    /// Place a road: free during setup, then free while a Road Building card
    /// is owed, otherwise paid for
    pub fn place_road<B, V>(
        &mut self,
        road: RoadId,
        board: &mut B,
        validator: &V,
    ) -> Result<GameEvent, GameError>
    where
        B: BoardCells + ?Sized,
        V: Validator<B> + ?Sized,
    {
        validator.validate(Placement::Road(road), self, board)?;
        match board.road(road) {
            Some(EdgeBuilding::Empty) => {}
            Some(_) => return Err(Rejection::Occupied.into()),
            None => return Err(Rejection::UnknownRoad(road).into()),
        }

        let paid = if self.is_setup_phase() {
            false
        } else if self.turn.free_roads > 0 {
            self.turn.free_roads -= 1;
            false
        } else {
            self.purchase(PurchasableItem::Road)?;
            true
        };

        board.set_road(road, EdgeBuilding::Road(self.id));
        self.roads.push(road);

        info!(player = self.id, road, paid, "road built");
        Ok(GameEvent::RoadBuilt {
            player: self.id,
            road,
            paid,
        })
    }

    /// Upgrade an own settlement to a city. Always paid, setup or not.
    pub fn upgrade_settlement_to_city<B, V>(
        &mut self,
        vertex: VertexId,
        board: &mut B,
        validator: &V,
    ) -> Result<GameEvent, GameError>
    where
        B: BoardCells + ?Sized,
        V: Validator<B> + ?Sized,
    {
        validator.validate(Placement::City(vertex), self, board)?;
        if board.vertex(vertex) != Some(VertexBuilding::Settlement(self.id)) {
            return Err(Rejection::NotOwnSettlement.into());
        }

        self.purchase(PurchasableItem::City)?;

        board.set_vertex(vertex, VertexBuilding::City(self.id));
        self.settlements.retain(|v| *v != vertex);
        self.cities.push(vertex);
        // The settlement already counted one
        self.points += 1;

        info!(player = self.id, vertex, "city built");
        Ok(GameEvent::CityBuilt {
            player: self.id,
            vertex,
        })
    }

    // ==================== Development Cards ====================

    /// Buy one development card. At most one purchase per turn.
    pub fn buy_development_card<D>(&mut self, deck: &mut D) -> Result<CardKind, GameError>
    where
        D: CardDraw + ?Sized,
    {
        if self.turn.purchased_development_card {
            return Err(GameError::AlreadyPurchasedThisTurn);
        }
        let cost = PurchasableItem::DevelopmentCard.cost();
        if !self.resources.affordable(&cost) {
            return Err(GameError::InsufficientResources {
                shortfalls: self.resources.shortfalls(&cost),
            });
        }
        if deck.remaining() == 0 {
            return Err(GameError::DeckEmpty);
        }

        let kind = deck.draw().ok_or(GameError::DeckEmpty)?;
        self.purchase(PurchasableItem::DevelopmentCard)?;
        self.dev_cards.push(OwnedCard {
            kind,
            acquired_this_turn: true,
        });
        self.turn.purchased_development_card = true;

        if kind == CardKind::VictoryPoint {
            VictoryPoint.apply(self);
        }

        info!(player = self.id, card = %kind, "development card purchased");
        Ok(kind)
    }

    /// Play a card from hand through its effect.
    ///
    /// The card must be owned and must not have been bought this turn. A
    /// Victory Point card is never played: owning one makes this a no-op and
    /// the card stays in hand.
    pub fn use_development_card(&mut self, effect: &dyn CardEffect) -> Result<(), GameError> {
        let kind = effect.kind();
        if !kind.is_playable() {
            if self.development_card_count(kind) == 0 {
                return Err(GameError::CardNotOwned(kind));
            }
            return Ok(());
        }

        let position = self.playable_card_position(kind)?;
        if kind == CardKind::YearOfPlenty {
            self.turn.year_of_plenty_picks = [false; 2];
        }
        effect.apply(self);
        self.dev_cards.remove(position);

        info!(player = self.id, card = %kind, "development card played");
        Ok(())
    }

    /// Play Monopoly: take every unit of `resource` from each opponent.
    /// Returns how many units were taken.
    pub fn play_monopoly(
        &mut self,
        resource: ResourceType,
        opponents: &mut [&mut Player],
    ) -> Result<u32, GameError> {
        let position = self.playable_card_position(CardKind::Monopoly)?;

        let mut taken = 0;
        for opponent in opponents.iter_mut() {
            taken += opponent.resources.take_all(resource);
        }
        self.resources.credit(resource, taken);
        self.dev_cards.remove(position);

        info!(player = self.id, %resource, taken, "monopoly played");
        Ok(taken)
    }

    /// Index of a card of `kind` that may be played now
    fn playable_card_position(&self, kind: CardKind) -> Result<usize, GameError> {
        if let Some(position) = self
            .dev_cards
            .iter()
            .position(|c| c.kind == kind && !c.acquired_this_turn)
        {
            return Ok(position);
        }
        if self.development_card_count(kind) > 0 {
            Err(GameError::UsedSameTurnAsPurchase(kind))
        } else {
            Err(GameError::CardNotOwned(kind))
        }
    }
}

impl CardHolder for Player {
    fn increment_knight_count(&mut self) {
        self.knights += 1;
    }

    fn increment_victory_points(&mut self) {
        self.victory_point_cards += 1;
    }

    fn increment_points(&mut self) {
        self.points += 1;
    }

    fn claim_plenty_pick(&mut self, slot: usize, resource: ResourceType) -> bool {
        match self.turn.year_of_plenty_picks.get_mut(slot) {
            Some(taken) if !*taken => {
                *taken = true;
                self.resources.credit(resource, 1);
                true
            }
            _ => false,
        }
    }

    fn grant_free_roads(&mut self, count: u8) {
        self.turn.free_roads = self.turn.free_roads.saturating_add(count);
    }
}

/// What a UI may show about a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub resources: ResourceLedger,
    pub settlements: usize,
    pub cities: usize,
    pub roads: usize,
    pub knights: u32,
    pub victory_point_cards: u32,
    pub development_cards: BTreeMap<CardKind, u32>,
    pub turn: TurnState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Tile};
    use crate::cards::{DevelopmentDeck, Knight, RoadBuilding, YearOfPlenty};
    use crate::resources::Shortfall;
    use crate::validator::RuleValidator;
    use pretty_assertions::assert_eq;

    /// Accepts everything; leaves legality to the occupancy guards
    struct AllowAll;

    impl<B: ?Sized> Validator<B> for AllowAll {
        fn validate(&self, _: Placement, _: &Player, _: &B) -> Result<(), Rejection> {
            Ok(())
        }
    }

    /// Two tiles meeting at vertex 1; vertices 0..=5 in a line
    fn small_board() -> Board {
        let tiles = vec![
            Tile::new_resource(ResourceType::Wood, 6, vec![0, 1, 2]),
            Tile::new_resource(ResourceType::Ore, 8, vec![1, 3]),
        ];
        let roads = (0..5).map(|i| [i, i + 1]).collect();
        Board::from_layout(6, tiles, roads).unwrap()
    }

    fn active_player() -> Player {
        let mut player = Player::new(0, "Alice".to_string());
        player.begin_turn();
        player
    }

    fn rich() -> ResourceLedger {
        ResourceLedger::with_amounts(5, 5, 5, 5, 5)
    }

    #[test]
    fn test_new_player_is_empty() {
        let player = Player::new(2, "Carol".to_string());
        assert_eq!(player.points(), 0);
        assert!(player.resources().is_empty());
        assert!(player.is_setup_phase());
        assert_eq!(player.turn(), &TurnState::default());
    }

    #[test]
    fn test_setup_settlement_is_free_and_grants_tiles() {
        let mut board = small_board();
        let mut player = active_player();

        let event = player.place_settlement(1, &mut board, &AllowAll).unwrap();

        assert_eq!(
            event,
            GameEvent::SettlementBuilt {
                player: 0,
                vertex: 1,
                paid: false,
                granted: ResourceLedger::with_amounts(1, 0, 0, 0, 1),
            }
        );
        assert_eq!(player.resources(), &ResourceLedger::with_amounts(1, 0, 0, 0, 1));
        assert_eq!(player.points(), 1);
        assert_eq!(player.settlements(), &[1]);
        assert_eq!(board.vertex(1), Some(VertexBuilding::Settlement(0)));
    }

    #[test]
    fn test_settlement_with_exact_cost_after_setup() {
        let mut board = small_board();
        let mut player = active_player();
        player.points = 3;
        player.collect(&PurchasableItem::Settlement.cost().to_ledger());

        let event = player.place_settlement(4, &mut board, &AllowAll).unwrap();

        assert!(matches!(event, GameEvent::SettlementBuilt { paid: true, .. }));
        assert!(player.resources().is_empty());
        assert_eq!(player.resources().get(ResourceType::Ore), 0);
        assert_eq!(player.points(), 4);
        assert_eq!(board.vertex(4), Some(VertexBuilding::Settlement(0)));
    }

    #[test]
    fn test_paid_settlement_grants_nothing() {
        let mut board = small_board();
        let mut player = active_player();
        player.points = 3;
        player.collect(&rich());

        player.place_settlement(1, &mut board, &AllowAll).unwrap();
        assert_eq!(player.resources(), &ResourceLedger::with_amounts(4, 4, 4, 4, 5));
    }

    #[test]
    fn test_unaffordable_settlement_changes_nothing() {
        let mut board = small_board();
        let mut player = active_player();
        player.points = 3;
        player.collect(&ResourceLedger::with_amounts(1, 1, 0, 1, 0));

        let err = player.place_settlement(4, &mut board, &AllowAll).unwrap_err();

        assert_eq!(
            err,
            GameError::InsufficientResources {
                shortfalls: vec![Shortfall {
                    resource: ResourceType::Sheep,
                    required: 1,
                    available: 0,
                }],
            }
        );
        assert_eq!(player.resources(), &ResourceLedger::with_amounts(1, 1, 0, 1, 0));
        assert_eq!(player.points(), 3);
        assert!(player.settlements().is_empty());
        assert_eq!(board.vertex(4), Some(VertexBuilding::Empty));
    }

    #[test]
    fn test_rejected_placement_costs_nothing() {
        let mut board = small_board();
        let mut player = Player::new(0, "Idle".to_string());
        player.collect(&rich());

        let err = player.place_settlement(1, &mut board, &RuleValidator).unwrap_err();
        assert_eq!(err, GameError::IllegalPlacement(Rejection::NotYourTurn));
        assert_eq!(player.resources(), &rich());
        assert_eq!(board.vertex(1), Some(VertexBuilding::Empty));
    }

    #[test]
    fn test_occupied_vertex_is_refused_even_by_permissive_validator() {
        let mut board = small_board();
        board.set_vertex(3, VertexBuilding::Settlement(1));
        let mut player = active_player();

        assert_eq!(
            player.place_settlement(3, &mut board, &AllowAll),
            Err(GameError::IllegalPlacement(Rejection::Occupied))
        );
        assert_eq!(
            player.place_road(99, &mut board, &AllowAll),
            Err(GameError::IllegalPlacement(Rejection::UnknownRoad(99)))
        );
    }

    #[test]
    fn test_third_settlement_at_two_points_is_still_free() {
        let mut board = small_board();
        let mut player = active_player();
        for vertex in [0, 2, 4] {
            player.place_settlement(vertex, &mut board, &AllowAll).unwrap();
        }
        assert_eq!(player.points(), 3);
        assert!(!player.is_setup_phase());
    }

    #[test]
    fn test_road_costs() {
        let mut board = small_board();
        let mut player = active_player();

        let setup = player.place_road(0, &mut board, &AllowAll).unwrap();
        assert!(matches!(setup, GameEvent::RoadBuilt { paid: false, .. }));

        player.points = 3;
        assert!(matches!(
            player.place_road(1, &mut board, &AllowAll),
            Err(GameError::InsufficientResources { .. })
        ));

        player.collect(&rich());
        let paid = player.place_road(1, &mut board, &AllowAll).unwrap();
        assert!(matches!(paid, GameEvent::RoadBuilt { paid: true, .. }));
        assert_eq!(player.resources(), &ResourceLedger::with_amounts(4, 4, 5, 5, 5));
        assert_eq!(player.roads(), &[0, 1]);
        assert_eq!(board.road(1), Some(EdgeBuilding::Road(0)));
    }

    #[test]
    fn test_city_upgrade() {
        let mut board = small_board();
        let mut player = active_player();
        player.place_settlement(1, &mut board, &AllowAll).unwrap();
        player.collect(&rich());
        let before = player.resources().clone();

        player.upgrade_settlement_to_city(1, &mut board, &AllowAll).unwrap();

        assert_eq!(player.points(), 2);
        assert_eq!(player.city_count(), 1);
        assert_eq!(player.settlement_count(), 0);
        assert_eq!(board.vertex(1), Some(VertexBuilding::City(0)));
        assert_eq!(before.get(ResourceType::Wheat) - player.resources().get(ResourceType::Wheat), 2);
        assert_eq!(before.get(ResourceType::Ore) - player.resources().get(ResourceType::Ore), 3);
    }

    #[test]
    fn test_city_needs_own_settlement() {
        let mut board = small_board();
        board.set_vertex(2, VertexBuilding::Settlement(1));
        let mut player = active_player();
        player.collect(&rich());

        for vertex in [2, 3] {
            assert_eq!(
                player.upgrade_settlement_to_city(vertex, &mut board, &AllowAll),
                Err(GameError::IllegalPlacement(Rejection::NotOwnSettlement))
            );
        }
        assert_eq!(player.resources(), &rich());
    }

    #[test]
    fn test_second_card_purchase_in_a_turn_fails() {
        let mut deck = DevelopmentDeck::from_cards([CardKind::Knight, CardKind::Monopoly]);
        let mut player = active_player();
        player.collect(&rich());

        assert_eq!(player.buy_development_card(&mut deck), Ok(CardKind::Knight));
        assert_eq!(
            player.buy_development_card(&mut deck),
            Err(GameError::AlreadyPurchasedThisTurn)
        );
        assert_eq!(deck.remaining(), 1);
        assert_eq!(player.resources(), &ResourceLedger::with_amounts(5, 5, 4, 4, 4));

        player.end_turn();
        player.begin_turn();
        assert_eq!(player.buy_development_card(&mut deck), Ok(CardKind::Monopoly));
    }

    #[test]
    fn test_card_purchase_failures_leave_state_alone() {
        let mut empty = DevelopmentDeck::default();
        let mut player = active_player();

        assert!(matches!(
            player.buy_development_card(&mut empty),
            Err(GameError::InsufficientResources { .. })
        ));

        player.collect(&rich());
        assert_eq!(player.buy_development_card(&mut empty), Err(GameError::DeckEmpty));
        assert_eq!(player.resources(), &rich());
        assert!(!player.turn().purchased_development_card);
    }

    #[test]
    fn test_card_unusable_in_purchase_turn() {
        let mut deck = DevelopmentDeck::from_cards([CardKind::Knight]);
        let mut player = active_player();
        player.collect(&rich());
        player.buy_development_card(&mut deck).unwrap();

        assert_eq!(
            player.use_development_card(&Knight),
            Err(GameError::UsedSameTurnAsPurchase(CardKind::Knight))
        );

        player.end_turn();
        player.begin_turn();
        player.use_development_card(&Knight).unwrap();
        assert_eq!(player.knight_count(), 1);
        assert_eq!(player.development_card_count(CardKind::Knight), 0);
        assert_eq!(
            player.use_development_card(&Knight),
            Err(GameError::CardNotOwned(CardKind::Knight))
        );
    }

    #[test]
    fn test_victory_point_card_counts_once_and_stays() {
        let mut deck = DevelopmentDeck::from_cards([CardKind::VictoryPoint]);
        let mut player = active_player();
        player.collect(&rich());
        assert_eq!(
            player.use_development_card(&VictoryPoint),
            Err(GameError::CardNotOwned(CardKind::VictoryPoint))
        );

        player.buy_development_card(&mut deck).unwrap();
        assert_eq!(player.points(), 1);
        assert_eq!(player.victory_point_cards(), 1);

        // Never "used", even in the purchase turn
        player.use_development_card(&VictoryPoint).unwrap();
        assert_eq!(player.points(), 1);
        assert_eq!(player.development_card_count(CardKind::VictoryPoint), 1);
    }

    #[test]
    fn test_year_of_plenty_grants_two_picks() {
        let mut player = active_player();
        player.dev_cards.push(OwnedCard {
            kind: CardKind::YearOfPlenty,
            acquired_this_turn: false,
        });

        player
            .use_development_card(&YearOfPlenty::new(ResourceType::Brick, ResourceType::Ore))
            .unwrap();

        assert_eq!(player.resources(), &ResourceLedger::with_amounts(0, 1, 0, 0, 1));
        assert_eq!(player.turn().year_of_plenty_picks, [true, true]);
        // Slots are spent for this activation
        assert!(!player.claim_plenty_pick(0, ResourceType::Wood));
        assert!(!player.claim_plenty_pick(2, ResourceType::Wood));
        assert_eq!(player.resources().total(), 2);
    }

    #[test]
    fn test_road_building_gives_two_free_roads() {
        let mut board = small_board();
        let mut player = active_player();
        player.points = 3;
        player.dev_cards.push(OwnedCard {
            kind: CardKind::RoadBuilding,
            acquired_this_turn: false,
        });

        player.use_development_card(&RoadBuilding).unwrap();
        assert_eq!(player.turn().free_roads, 2);

        for road in [0, 1] {
            let event = player.place_road(road, &mut board, &AllowAll).unwrap();
            assert!(matches!(event, GameEvent::RoadBuilt { paid: false, .. }));
        }
        assert_eq!(player.turn().free_roads, 0);
        assert!(matches!(
            player.place_road(2, &mut board, &AllowAll),
            Err(GameError::InsufficientResources { .. })
        ));
    }

    #[test]
    fn test_monopoly_takes_from_every_opponent() {
        let mut player = active_player();
        player.dev_cards.push(OwnedCard {
            kind: CardKind::Monopoly,
            acquired_this_turn: false,
        });
        let mut bob = Player::new(1, "Bob".to_string());
        bob.collect(&ResourceLedger::with_amounts(0, 0, 3, 1, 0));
        let mut carol = Player::new(2, "Carol".to_string());
        carol.collect(&ResourceLedger::single(ResourceType::Sheep, 2));

        let taken = player
            .play_monopoly(ResourceType::Sheep, &mut [&mut bob, &mut carol])
            .unwrap();

        assert_eq!(taken, 5);
        assert_eq!(player.resources(), &ResourceLedger::single(ResourceType::Sheep, 5));
        assert_eq!(bob.resources(), &ResourceLedger::single(ResourceType::Wheat, 1));
        assert!(carol.resources().is_empty());
        assert_eq!(
            player.play_monopoly(ResourceType::Ore, &mut []),
            Err(GameError::CardNotOwned(CardKind::Monopoly))
        );
    }

    #[test]
    fn test_status_snapshot() {
        let mut deck = DevelopmentDeck::from_cards([CardKind::Knight]);
        let mut player = active_player();
        player.collect(&rich());
        player.buy_development_card(&mut deck).unwrap();

        let status = player.status();
        assert_eq!(status.name, "Alice");
        assert_eq!(status.development_cards.get(&CardKind::Knight), Some(&1));
        assert!(status.turn.purchased_development_card);

        let json = serde_json::to_string(&status).unwrap();
        let back: PlayerStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
