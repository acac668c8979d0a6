//! Purchasable items and what they cost.
//!
//! Costs are fixed for the whole process; nothing here is configurable.

use crate::game::GameError;
use crate::resources::{ResourceLedger, ResourceType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Things a player can spend resources on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchasableItem {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

const ROAD: &[(ResourceType, u32)] = &[(ResourceType::Wood, 1), (ResourceType::Brick, 1)];

const SETTLEMENT: &[(ResourceType, u32)] = &[
    (ResourceType::Wood, 1),
    (ResourceType::Brick, 1),
    (ResourceType::Sheep, 1),
    (ResourceType::Wheat, 1),
];

const CITY: &[(ResourceType, u32)] = &[(ResourceType::Wheat, 2), (ResourceType::Ore, 3)];

const DEVELOPMENT_CARD: &[(ResourceType, u32)] = &[
    (ResourceType::Sheep, 1),
    (ResourceType::Wheat, 1),
    (ResourceType::Ore, 1),
];

impl PurchasableItem {
    pub const ALL: [PurchasableItem; 4] = [
        PurchasableItem::Road,
        PurchasableItem::Settlement,
        PurchasableItem::City,
        PurchasableItem::DevelopmentCard,
    ];

    /// Resource cost of this item
    pub const fn cost(self) -> Cost {
        let entries = match self {
            PurchasableItem::Road => ROAD,
            PurchasableItem::Settlement => SETTLEMENT,
            PurchasableItem::City => CITY,
            PurchasableItem::DevelopmentCard => DEVELOPMENT_CARD,
        };
        Cost { entries }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PurchasableItem::Road => "Road",
            PurchasableItem::Settlement => "Settlement",
            PurchasableItem::City => "City",
            PurchasableItem::DevelopmentCard => "DevelopmentCard",
        }
    }
}

impl fmt::Display for PurchasableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PurchasableItem {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(&[' ', '_', '-'][..], "");
        PurchasableItem::ALL
            .into_iter()
            .find(|item| item.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| GameError::UnknownItem(s.to_string()))
    }
}

/// An immutable resource cost, entries in resource order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    entries: &'static [(ResourceType, u32)],
}

impl Cost {
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Quantity of a resource this cost asks for
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, qty)| qty)
            .unwrap_or(0)
    }

    /// Total number of resource units
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, qty)| qty).sum()
    }

    pub fn to_ledger(&self) -> ResourceLedger {
        self.iter().collect()
    }
}

/// Pay for `item` out of `ledger`.
///
/// The whole cost is debited or nothing is; on failure the error carries the
/// per-resource shortfalls. Granting the item itself is the caller's job.
pub fn purchase(ledger: &mut ResourceLedger, item: PurchasableItem) -> Result<(), GameError> {
    let cost = item.cost();
    ledger
        .spend(&cost)
        .map_err(|shortfalls| GameError::InsufficientResources { shortfalls })?;
    debug!(%item, remaining = %ledger, "purchase debited");
    Ok(())
}
