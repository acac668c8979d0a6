//! Catan Economy - player economy and build rules for a Catan-style game
//!
//! This crate provides the rules governing what a player may acquire, what it
//! costs, and what a successful action does to points and board state:
//! - Resource ledgers and fixed purchase costs
//! - Settlement, road and city placement behind a pluggable validator
//! - Development card purchase and turn-gated play
//! - Player-to-player trading
//!
//! # Architecture
//!
//! `Player` is the root of the economy. It never owns board cells; placement
//! actions borrow a [`board::BoardCells`] implementation and a
//! [`validator::Validator`] for the duration of the call. Card effects reach
//! the player only through [`cards::CardHolder`]. Every action either applies
//! in full or returns a [`GameError`] with nothing changed.
//!
//! # Modules
//!
//! - [`resources`]: Resource types and the ledger
//! - [`costs`]: Purchasable items and their costs
//! - [`board`]: Index-based board and dice production
//! - [`validator`]: Placement legality
//! - [`cards`]: Development card effects and the deck
//! - [`player`]: Player state and build / card actions
//! - [`trade`]: Player-to-player exchange
//! - [`game`]: Turn dispatcher and error taxonomy

pub mod actions;
pub mod board;
pub mod cards;
pub mod config;
pub mod costs;
pub mod game;
pub mod player;
pub mod resources;
pub mod trade;
pub mod validator;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, TradeOffer};
pub use board::{Board, BoardCells, EdgeBuilding, PlayerId, RoadId, Tile, TileType, VertexBuilding, VertexId};
pub use cards::{CardDraw, CardEffect, CardHolder, CardKind, DevelopmentDeck, OwnedCard};
pub use config::{DeckComposition, GameConfig};
pub use costs::{Cost, PurchasableItem};
pub use game::{GameError, GameState};
pub use player::{Player, PlayerStatus, TurnState, SETUP_POINT_CEILING};
pub use resources::{ResourceError, ResourceLedger, ResourceType, Shortfall};
pub use validator::{Placement, Rejection, RuleValidator, Validator};
