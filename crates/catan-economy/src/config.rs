//! Game configuration that is not a cost.
//!
//! Costs are fixed (see [`crate::costs`]); the deck makeup, player-count bounds
//! and the seed used for the board and deck can be set from JSON. Missing
//! fields take the standard values.

use crate::cards::CardKind;
use crate::game::GameError;
use serde::{Deserialize, Serialize};

/// Largest deck a config may ask for
pub const MAX_DECK_CARDS: u32 = 1000;

/// How many of each development card the deck holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckComposition {
    pub knights: u32,
    pub victory_points: u32,
    pub year_of_plenty: u32,
    pub road_building: u32,
    pub monopoly: u32,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            knights: 14,
            victory_points: 5,
            year_of_plenty: 2,
            road_building: 2,
            monopoly: 2,
        }
    }
}

impl DeckComposition {
    pub fn counts(&self) -> [(CardKind, u32); 5] {
        [
            (CardKind::Knight, self.knights),
            (CardKind::VictoryPoint, self.victory_points),
            (CardKind::YearOfPlenty, self.year_of_plenty),
            (CardKind::RoadBuilding, self.road_building),
            (CardKind::Monopoly, self.monopoly),
        ]
    }

    /// Number of cards, or `None` if the counts overflow
    pub fn total(&self) -> Option<u32> {
        self.counts()
            .iter()
            .try_fold(0u32, |sum, (_, n)| sum.checked_add(*n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_players: u8,
    pub max_players: u8,
    pub deck: DeckComposition,
    /// Seed for board and deck shuffling; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 4,
            deck: DeckComposition::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configs no game can be built from
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_players > self.max_players {
            return Err(GameError::InvalidConfig(format!(
                "min_players {} exceeds max_players {}",
                self.min_players, self.max_players
            )));
        }
        match self.deck.total() {
            Some(total) if total <= MAX_DECK_CARDS => Ok(()),
            _ => Err(GameError::InvalidConfig(format!(
                "deck holds more than {MAX_DECK_CARDS} cards"
            ))),
        }
    }

    pub fn allows_player_count(&self, count: usize) -> bool {
        (self.min_players as usize..=self.max_players as usize).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_take_standard_values() {
        let config = GameConfig::from_json(r#"{ "seed": 42, "deck": { "knights": 3 } }"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_players, 4);
        assert_eq!(config.deck.knights, 3);
        assert_eq!(config.deck.monopoly, 2);
        assert_eq!(config.deck.total(), Some(14));
    }

    #[test]
    fn test_standard_deck_total() {
        assert_eq!(DeckComposition::default().total(), Some(25));
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert!(GameConfig::default().allows_player_count(3));
        assert!(!GameConfig::default().allows_player_count(5));
    }

    #[test]
    fn test_overflowing_deck_is_invalid() {
        let config =
            GameConfig::from_json(r#"{ "deck": { "knights": 4294967295, "victory_points": 1 } }"#).unwrap();
        assert_eq!(config.deck.total(), None);
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut big = GameConfig::default();
        big.deck.knights = MAX_DECK_CARDS;
        assert!(big.validate().is_err());

        let mut inverted = GameConfig::default();
        inverted.min_players = 5;
        assert!(inverted.validate().is_err());
    }
}
