//! Turn dispatcher.
//!
//! This module contains the `GameError` taxonomy shared by every action and
//! `GameState`, which owns the board, the players and the deck, applies a
//! player's `GameAction` and rotates turns.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, PlayerId};
use crate::cards::{CardDraw, CardKind, DevelopmentDeck, Knight, RoadBuilding, YearOfPlenty};
use crate::config::GameConfig;
use crate::player::{Player, PlayerStatus};
use crate::resources::{ResourceError, Shortfall};
use crate::validator::{Rejection, RuleValidator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Insufficient resources ({})", describe(.shortfalls))]
    InsufficientResources { shortfalls: Vec<Shortfall> },

    #[error("Illegal placement: {0}")]
    IllegalPlacement(#[from] Rejection),

    #[error("Already bought a development card this turn")]
    AlreadyPurchasedThisTurn,

    #[error("No {0} card in hand")]
    CardNotOwned(CardKind),

    #[error("{0} card was bought this turn")]
    UsedSameTurnAsPurchase(CardKind),

    #[error("No development cards left in deck")]
    DeckEmpty,

    #[error("Dice already rolled this turn")]
    AlreadyRolled,

    #[error("Invalid dice total {0}")]
    InvalidDiceRoll(u8),

    #[error("Invalid trade")]
    InvalidTrade,

    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unsupported player count {0}")]
    PlayerCount(usize),

    #[error("Player name {0:?} is already taken")]
    DuplicatePlayerName(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

fn describe(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ResourceError> for GameError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::InsufficientResource {
                resource,
                available,
                requested,
            } => GameError::InsufficientResources {
                shortfalls: vec![Shortfall {
                    resource,
                    required: requested,
                    available,
                }],
            },
        }
    }
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    deck: DevelopmentDeck,
    current_player: PlayerId,
    /// Turn number (starts at 1)
    turn_number: u32,
    /// This turn's dice total, once rolled
    dice_roll: Option<u8>,
    rng: StdRng,
    /// Seed for deterministic replays
    rng_seed: u64,
}

impl GameState {
    /// Create a game on a standard board. The first player's turn begins at once.
    pub fn new(player_names: Vec<String>, config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        if !config.allows_player_count(player_names.len()) {
            return Err(GameError::PlayerCount(player_names.len()));
        }

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::standard_with_rng(&mut rng);
        let mut deck = DevelopmentDeck::with_composition(&config.deck);
        deck.shuffle(&mut rng);

        Self::build(board, player_names, deck, rng, seed)
    }

    /// Create a game on a given board and deck, with the default player-count bounds
    pub fn from_parts(
        board: Board,
        player_names: Vec<String>,
        deck: DevelopmentDeck,
        seed: u64,
    ) -> Result<Self, GameError> {
        if !GameConfig::default().allows_player_count(player_names.len()) {
            return Err(GameError::PlayerCount(player_names.len()));
        }
        Self::build(board, player_names, deck, StdRng::seed_from_u64(seed), seed)
    }

    fn build(
        board: Board,
        player_names: Vec<String>,
        deck: DevelopmentDeck,
        rng: StdRng,
        rng_seed: u64,
    ) -> Result<Self, GameError> {
        if player_names.is_empty() || player_names.len() > PlayerId::MAX as usize {
            return Err(GameError::PlayerCount(player_names.len()));
        }
        if let Some(name) = first_duplicate(&player_names) {
            return Err(GameError::DuplicatePlayerName(name));
        }

        let mut players: Vec<Player> = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();
        players[0].begin_turn();

        info!(players = players.len(), seed = rng_seed, "game created");
        Ok(Self {
            board,
            players,
            deck,
            current_player: 0,
            turn_number: 1,
            dice_roll: None,
            rng,
            rng_seed,
        })
    }

    // ==================== Query Methods ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn dice_roll(&self) -> Option<u8> {
        self.dice_roll
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn statuses(&self) -> Vec<PlayerStatus> {
        self.players.iter().map(Player::status).collect()
    }

    // ==================== Actions ====================

    /// Apply an action for a player. On error nothing has changed.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        let result = self.dispatch(player, action);
        if let Err(err) = &result {
            warn!(player, error = %err, "action rejected");
        }
        result
    }

    fn dispatch(&mut self, player: PlayerId, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let idx = player as usize;
        if idx >= self.players.len() {
            return Err(GameError::UnknownPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        let event = match action {
            GameAction::PlaceSettlement(vertex) => {
                self.players[idx].place_settlement(vertex, &mut self.board, &RuleValidator)?
            }
            GameAction::PlaceRoad(road) => {
                self.players[idx].place_road(road, &mut self.board, &RuleValidator)?
            }
            GameAction::UpgradeToCity(vertex) => self.players[idx].upgrade_settlement_to_city(
                vertex,
                &mut self.board,
                &RuleValidator,
            )?,

            GameAction::BuyDevelopmentCard => {
                self.players[idx].buy_development_card(&mut self.deck)?;
                GameEvent::DevelopmentCardPurchased { player }
            }
            GameAction::PlayKnight => {
                let actor = &mut self.players[idx];
                actor.use_development_card(&Knight)?;
                GameEvent::KnightPlayed {
                    player,
                    knights: actor.knight_count(),
                }
            }
            GameAction::PlayRoadBuilding => {
                self.players[idx].use_development_card(&RoadBuilding)?;
                GameEvent::RoadBuildingPlayed { player }
            }
            GameAction::PlayYearOfPlenty(first, second) => {
                self.players[idx].use_development_card(&YearOfPlenty::new(first, second))?;
                GameEvent::YearOfPlentyPlayed {
                    player,
                    resources: (first, second),
                }
            }
            GameAction::PlayMonopoly(resource) => {
                let (actor, mut opponents) = split_actor(&mut self.players, idx)?;
                let total_stolen = actor.play_monopoly(resource, &mut opponents)?;
                GameEvent::MonopolyPlayed {
                    player,
                    resource,
                    total_stolen,
                }
            }

            GameAction::Trade {
                with,
                give,
                give_amount,
                take,
                take_amount,
            } => {
                let (actor, other) = pair_mut(&mut self.players, idx, with)?;
                actor.trade(other, give, give_amount, take, take_amount)?
            }
            GameAction::TradeBundle(offer) => {
                if offer.from != player {
                    return Err(GameError::InvalidTrade);
                }
                let (actor, other) = pair_mut(&mut self.players, idx, offer.to)?;
                actor.exchange(other, &offer)?
            }

            GameAction::RollDice { fixed } => self.roll_dice(player, fixed)?,
            GameAction::EndTurn => self.end_turn(idx),
        };

        Ok(vec![event])
    }

    fn roll_dice(&mut self, player: PlayerId, fixed: Option<u8>) -> Result<GameEvent, GameError> {
        if self.dice_roll.is_some() {
            return Err(GameError::AlreadyRolled);
        }
        let total = match fixed {
            Some(total) if (2..=12).contains(&total) => total,
            Some(total) => return Err(GameError::InvalidDiceRoll(total)),
            None => self.rng.gen_range(1..=6) + self.rng.gen_range(1..=6),
        };
        self.dice_roll = Some(total);

        let mut distributions = Vec::new();
        // No robber: a 7 simply produces nothing
        if total != 7 {
            for (owner, produced) in self.board.distribute(total, &mut self.players) {
                for (resource, amount) in produced.iter() {
                    distributions.push((owner, resource, amount));
                }
            }
        }

        info!(player, total, "dice rolled");
        Ok(GameEvent::DiceRolled {
            player,
            total,
            distributions,
        })
    }

    fn end_turn(&mut self, idx: usize) -> GameEvent {
        self.players[idx].end_turn();
        let next = (idx + 1) % self.players.len();
        self.players[next].begin_turn();

        let player = self.current_player;
        self.current_player = next as PlayerId;
        self.turn_number += 1;
        self.dice_roll = None;

        info!(player, next_player = self.current_player, turn = self.turn_number, "turn ended");
        GameEvent::TurnEnded {
            player,
            next_player: self.current_player,
        }
    }
}

fn first_duplicate(names: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    names.iter().find(|name| !seen.insert(name.as_str())).cloned()
}

/// The acting player and everyone else, mutably
fn split_actor(players: &mut [Player], idx: usize) -> Result<(&mut Player, Vec<&mut Player>), GameError> {
    let (before, rest) = players.split_at_mut(idx);
    let (actor, after) = rest
        .split_first_mut()
        .ok_or(GameError::UnknownPlayer(idx as PlayerId))?;
    let opponents = before.iter_mut().chain(after.iter_mut()).collect();
    Ok((actor, opponents))
}

/// Two distinct players, mutably
fn pair_mut(
    players: &mut [Player],
    idx: usize,
    other: PlayerId,
) -> Result<(&mut Player, &mut Player), GameError> {
    let other_idx = other as usize;
    if other_idx >= players.len() {
        return Err(GameError::UnknownPlayer(other));
    }
    if other_idx == idx {
        return Err(GameError::InvalidTrade);
    }

    if idx < other_idx {
        let (left, right) = players.split_at_mut(other_idx);
        Ok((&mut left[idx], &mut right[0]))
    } else {
        let (left, right) = players.split_at_mut(idx);
        Ok((&mut right[0], &mut left[other_idx]))
    }
}
