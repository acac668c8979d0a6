//! Game actions that players can take.
//!
//! This module defines the actions a player can submit and the events that
//! result from them.

use crate::board::{PlayerId, RoadId, VertexId};
use crate::resources::{ResourceLedger, ResourceType};
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Building ====================
    /// Place a settlement (free while in the setup phase)
    PlaceSettlement(VertexId),
    /// Place a road (free while in the setup phase or after Road Building)
    PlaceRoad(RoadId),
    /// Upgrade one of your settlements to a city
    UpgradeToCity(VertexId),

    // ==================== Development Cards ====================
    /// Buy a development card from the deck
    BuyDevelopmentCard,
    PlayKnight,
    /// Two free road placements
    PlayRoadBuilding,
    /// Take two resources of your choice
    PlayYearOfPlenty(ResourceType, ResourceType),
    /// Take every unit of one resource from all other players
    PlayMonopoly(ResourceType),

    // ==================== Trading ====================
    /// Exchange one resource for another with a specific player
    Trade {
        with: PlayerId,
        give: ResourceType,
        give_amount: u32,
        take: ResourceType,
        take_amount: u32,
    },
    /// Exchange bundles of resources with the offer's target player
    TradeBundle(TradeOffer),

    // ==================== Turn Management ====================
    /// Roll the dice and distribute production. `fixed` replays a known roll.
    RollDice {
        #[serde(default)]
        fixed: Option<u8>,
    },
    /// End your turn
    EndTurn,
}

/// A trade offer between players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Player making the offer
    pub from: PlayerId,
    /// Player the offer is made to
    pub to: PlayerId,
    /// Resources being offered
    pub offering: ResourceLedger,
    /// Resources being requested
    pub requesting: ResourceLedger,
}

impl TradeOffer {
    pub fn new(
        from: PlayerId,
        to: PlayerId,
        offering: ResourceLedger,
        requesting: ResourceLedger,
    ) -> Self {
        Self {
            from,
            to,
            offering,
            requesting,
        }
    }

    /// One resource type for another
    pub fn simple(
        from: PlayerId,
        to: PlayerId,
        give: ResourceType,
        give_amount: u32,
        take: ResourceType,
        take_amount: u32,
    ) -> Self {
        Self::new(
            from,
            to,
            ResourceLedger::single(give, give_amount),
            ResourceLedger::single(take, take_amount),
        )
    }

    /// Check if offer is valid (non-empty on both sides, two distinct players)
    pub fn is_valid(&self) -> bool {
        self.from != self.to && !self.offering.is_empty() && !self.requesting.is_empty()
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Dice were rolled and production handed out
    DiceRolled {
        player: PlayerId,
        total: u8,
        distributions: Vec<(PlayerId, ResourceType, u32)>,
    },

    /// A settlement was built
    SettlementBuilt {
        player: PlayerId,
        vertex: VertexId,
        /// False during the setup phase
        paid: bool,
        /// Setup-phase production from the surrounding tiles
        granted: ResourceLedger,
    },

    /// A settlement was upgraded to a city
    CityBuilt { player: PlayerId, vertex: VertexId },

    /// A road was built
    RoadBuilt {
        player: PlayerId,
        road: RoadId,
        paid: bool,
    },

    /// A development card was purchased (kind hidden from other players)
    DevelopmentCardPurchased { player: PlayerId },

    KnightPlayed { player: PlayerId, knights: u32 },

    RoadBuildingPlayed { player: PlayerId },

    YearOfPlentyPlayed {
        player: PlayerId,
        resources: (ResourceType, ResourceType),
    },

    MonopolyPlayed {
        player: PlayerId,
        resource: ResourceType,
        total_stolen: u32,
    },

    /// A trade was completed
    TradeCompleted { offer: TradeOffer },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },
}
