//! Development cards: kinds, effects, and the deck they are drawn from.
//!
//! Card effects never touch a `Player` directly. They act through
//! [`CardHolder`], the narrow set of mutations a card is allowed to make.

use crate::config::DeckComposition;
use crate::game::GameError;
use crate::resources::ResourceType;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Development card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Counts toward the knight tally
    Knight,
    /// Worth 1 point, kept hidden in hand
    VictoryPoint,
    /// Take any 2 resources
    YearOfPlenty,
    /// Build 2 roads for free
    RoadBuilding,
    /// Take every unit of one resource from all opponents
    Monopoly,
}

impl CardKind {
    pub const ALL: [CardKind; 5] = [
        CardKind::Knight,
        CardKind::VictoryPoint,
        CardKind::YearOfPlenty,
        CardKind::RoadBuilding,
        CardKind::Monopoly,
    ];

    /// Whether this card can be played (VP cards are never "played")
    pub fn is_playable(&self) -> bool {
        !matches!(self, CardKind::VictoryPoint)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardKind::Knight => "Knight",
            CardKind::VictoryPoint => "VictoryPoint",
            CardKind::YearOfPlenty => "YearOfPlenty",
            CardKind::RoadBuilding => "RoadBuilding",
            CardKind::Monopoly => "Monopoly",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(&[' ', '_', '-'][..], "");
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| GameError::UnknownItem(s.to_string()))
    }
}

/// A card in a player's hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCard {
    pub kind: CardKind,
    /// Bought during the current turn; cleared when the owner's next turn begins
    pub acquired_this_turn: bool,
}

/// Mutations a card effect may make to the player holding it
pub trait CardHolder {
    fn increment_knight_count(&mut self);

    fn increment_victory_points(&mut self);

    fn increment_points(&mut self);

    /// Credit one Year of Plenty pick. Returns false, crediting nothing, if
    /// `slot` was already consumed in the current activation.
    fn claim_plenty_pick(&mut self, slot: usize, resource: ResourceType) -> bool;

    /// Allow `count` road placements without paying for them
    fn grant_free_roads(&mut self, count: u8);
}

/// What a development card does when it takes effect
pub trait CardEffect {
    fn kind(&self) -> CardKind;

    fn apply(&self, holder: &mut dyn CardHolder);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Knight;

impl CardEffect for Knight {
    fn kind(&self) -> CardKind {
        CardKind::Knight
    }

    fn apply(&self, holder: &mut dyn CardHolder) {
        holder.increment_knight_count();
    }
}

/// Credited once, when the card is acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VictoryPoint;

impl CardEffect for VictoryPoint {
    fn kind(&self) -> CardKind {
        CardKind::VictoryPoint
    }

    fn apply(&self, holder: &mut dyn CardHolder) {
        holder.increment_victory_points();
        holder.increment_points();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOfPlenty {
    pub picks: [ResourceType; 2],
}

impl YearOfPlenty {
    pub fn new(first: ResourceType, second: ResourceType) -> Self {
        Self {
            picks: [first, second],
        }
    }
}

impl CardEffect for YearOfPlenty {
    fn kind(&self) -> CardKind {
        CardKind::YearOfPlenty
    }

    fn apply(&self, holder: &mut dyn CardHolder) {
        for (slot, resource) in self.picks.iter().enumerate() {
            holder.claim_plenty_pick(slot, *resource);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoadBuilding;

impl RoadBuilding {
    pub const FREE_ROADS: u8 = 2;
}

impl CardEffect for RoadBuilding {
    fn kind(&self) -> CardKind {
        CardKind::RoadBuilding
    }

    fn apply(&self, holder: &mut dyn CardHolder) {
        holder.grant_free_roads(Self::FREE_ROADS);
    }
}

/// Source of development cards
pub trait CardDraw {
    fn draw(&mut self) -> Option<CardKind>;

    fn remaining(&self) -> usize;
}

/// A development card deck, drawn from the top
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentDeck {
    /// Top of the deck is the end of the vector
    cards: Vec<CardKind>,
}

impl DevelopmentDeck {
    /// A deck that yields `cards` in the given order
    pub fn from_cards(cards: impl IntoIterator<Item = CardKind>) -> Self {
        let mut cards: Vec<CardKind> = cards.into_iter().collect();
        cards.reverse();
        Self { cards }
    }

    /// Unshuffled deck with the given composition
    pub fn with_composition(composition: &DeckComposition) -> Self {
        let mut cards = Vec::with_capacity(composition.total().unwrap_or(0) as usize);
        for (kind, count) in composition.counts() {
            cards.extend(std::iter::repeat(kind).take(count as usize));
        }
        Self { cards }
    }

    /// Shuffled standard deck (25 cards)
    pub fn standard_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::with_composition(&DeckComposition::default());
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// How many cards of a kind are left
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|c| **c == kind).count()
    }
}

impl CardDraw for DevelopmentDeck {
    fn draw(&mut self) -> Option<CardKind> {
        self.cards.pop()
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}
