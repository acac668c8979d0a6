//! Resource types and the per-player resource ledger.
//!
//! This module contains:
//! - The closed set of resource types, totally ordered for reporting
//! - `ResourceLedger`, the multiset of resource units a player holds
//! - Shortfall diagnostics used when a cost cannot be covered

use crate::costs::Cost;
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Resource types produced by tiles and spent on purchases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
}

impl ResourceType {
    /// All resource types in reporting order
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Wood,
        ResourceType::Brick,
        ResourceType::Sheep,
        ResourceType::Wheat,
        ResourceType::Ore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Wood => "Wood",
            ResourceType::Brick => "Brick",
            ResourceType::Sheep => "Sheep",
            ResourceType::Wheat => "Wheat",
            ResourceType::Ore => "Ore",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownResource(s.to_string()))
    }
}

/// Ledger-level failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResourceError {
    #[error("insufficient {resource}: have {available}, need {requested}")]
    InsufficientResource {
        resource: ResourceType,
        available: u32,
        requested: u32,
    },
}

/// One resource a cost could not be covered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub resource: ResourceType,
    pub required: u32,
    pub available: u32,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: required {}, available {}",
            self.resource, self.required, self.available
        )
    }
}

/// A player's resource units, keyed by type.
///
/// Zero amounts are never stored, so an absent entry and a zero entry are the
/// same thing. Mutation goes through [`credit`](Self::credit) and
/// [`debit`](Self::debit) (or the atomic [`spend`](Self::spend)). Serialized
/// as a plain map; deserializing drops zero entries too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ResourceType, u32>", into = "BTreeMap<ResourceType, u32>")]
pub struct ResourceLedger {
    amounts: BTreeMap<ResourceType, u32>,
}

impl ResourceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with specific amounts, in `ResourceType::ALL` order
    pub fn with_amounts(wood: u32, brick: u32, sheep: u32, wheat: u32, ore: u32) -> Self {
        ResourceType::ALL
            .into_iter()
            .zip([wood, brick, sheep, wheat, ore])
            .collect()
    }

    /// Create a ledger holding a single resource
    pub fn single(resource: ResourceType, amount: u32) -> Self {
        let mut ledger = Self::new();
        ledger.credit(resource, amount);
        ledger
    }

    /// Amount held of a resource
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// Total number of resource units
    pub fn total(&self) -> u32 {
        self.amounts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Non-zero entries in resource order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        self.amounts.iter().map(|(r, n)| (*r, *n))
    }

    /// Add units of a resource
    pub fn credit(&mut self, resource: ResourceType, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.amounts.entry(resource).or_insert(0) += amount;
    }

    /// Add every entry of another ledger
    pub fn credit_all(&mut self, other: &ResourceLedger) {
        for (resource, amount) in other.iter() {
            self.credit(resource, amount);
        }
    }

    /// Remove units of a resource, failing without change if not enough are held
    pub fn debit(&mut self, resource: ResourceType, amount: u32) -> Result<(), ResourceError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.get(resource);
        if available < amount {
            return Err(ResourceError::InsufficientResource {
                resource,
                available,
                requested: amount,
            });
        }
        if available == amount {
            self.amounts.remove(&resource);
        } else {
            self.amounts.insert(resource, available - amount);
        }
        Ok(())
    }

    /// Remove every unit of a resource, returning how many were held
    pub fn take_all(&mut self, resource: ResourceType) -> u32 {
        self.amounts.remove(&resource).unwrap_or(0)
    }

    /// Whether every entry of `cost` is covered
    pub fn affordable(&self, cost: &Cost) -> bool {
        cost.iter().all(|(resource, qty)| self.get(resource) >= qty)
    }

    /// Per-resource report of what `cost` needs beyond what is held
    pub fn shortfalls(&self, cost: &Cost) -> Vec<Shortfall> {
        self.shortfalls_for(cost.iter())
    }

    /// Per-resource report of what another ledger asks for beyond what is held
    pub fn shortfalls_against(&self, other: &ResourceLedger) -> Vec<Shortfall> {
        self.shortfalls_for(other.iter())
    }

    fn shortfalls_for(&self, needs: impl Iterator<Item = (ResourceType, u32)>) -> Vec<Shortfall> {
        needs
            .filter(|(resource, qty)| self.get(*resource) < *qty)
            .map(|(resource, required)| Shortfall {
                resource,
                required,
                available: self.get(resource),
            })
            .collect()
    }

    /// Debit an entire cost, or nothing at all
    pub fn spend(&mut self, cost: &Cost) -> Result<(), Vec<Shortfall>> {
        self.spend_ledger(&cost.to_ledger())
    }

    /// Debit every entry of another ledger, or nothing at all
    pub fn spend_ledger(&mut self, other: &ResourceLedger) -> Result<(), Vec<Shortfall>> {
        let shortfalls = self.shortfalls_against(other);
        if !shortfalls.is_empty() {
            return Err(shortfalls);
        }
        for (resource, qty) in other.iter() {
            let remaining = self.get(resource) - qty;
            if remaining == 0 {
                self.amounts.remove(&resource);
            } else {
                self.amounts.insert(resource, remaining);
            }
        }
        Ok(())
    }
}

impl FromIterator<(ResourceType, u32)> for ResourceLedger {
    fn from_iter<I: IntoIterator<Item = (ResourceType, u32)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (resource, amount) in iter {
            ledger.credit(resource, amount);
        }
        ledger
    }
}

impl From<BTreeMap<ResourceType, u32>> for ResourceLedger {
    fn from(amounts: BTreeMap<ResourceType, u32>) -> Self {
        amounts.into_iter().collect()
    }
}

impl From<ResourceLedger> for BTreeMap<ResourceType, u32> {
    fn from(ledger: ResourceLedger) -> Self {
        ledger.amounts
    }
}

impl fmt::Display for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ResourceType::ALL
            .iter()
            .map(|r| format!("{}: {}", r, self.get(*r)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::PurchasableItem;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_entries_are_not_stored() {
        let mut ledger = ResourceLedger::single(ResourceType::Ore, 2);
        ledger.debit(ResourceType::Ore, 2).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger, ResourceLedger::new());
    }

    #[test]
    fn test_deserialized_zero_entries_are_dropped() {
        let ledger: ResourceLedger = serde_json::from_str(r#"{"Ore":0,"Wood":2}"#).unwrap();
        assert_eq!(ledger, ResourceLedger::single(ResourceType::Wood, 2));

        let empty: ResourceLedger = serde_json::from_str(r#"{"Ore":0}"#).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty, ResourceLedger::new());
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn test_debit_insufficient_leaves_ledger_unchanged() {
        let mut ledger = ResourceLedger::single(ResourceType::Wheat, 1);
        let err = ledger.debit(ResourceType::Wheat, 2).unwrap_err();
        assert_eq!(
            err,
            ResourceError::InsufficientResource {
                resource: ResourceType::Wheat,
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(ledger.get(ResourceType::Wheat), 1);
    }

    #[test]
    fn test_shortfalls_report_required_and_available() {
        let ledger = ResourceLedger::with_amounts(0, 0, 0, 1, 1);
        let shortfalls = ledger.shortfalls(&PurchasableItem::City.cost());
        assert_eq!(
            shortfalls,
            vec![
                Shortfall {
                    resource: ResourceType::Wheat,
                    required: 2,
                    available: 1,
                },
                Shortfall {
                    resource: ResourceType::Ore,
                    required: 3,
                    available: 1,
                },
            ]
        );
    }

    #[test]
    fn test_spend_is_all_or_nothing() {
        let mut ledger = ResourceLedger::with_amounts(1, 1, 1, 0, 0);
        let before = ledger.clone();
        assert!(ledger.spend(&PurchasableItem::Settlement.cost()).is_err());
        assert_eq!(ledger, before);

        ledger.credit(ResourceType::Wheat, 1);
        ledger.spend(&PurchasableItem::Settlement.cost()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_parse_resource_names() {
        assert_eq!("wheat".parse::<ResourceType>().unwrap(), ResourceType::Wheat);
        assert_eq!(" ORE ".parse::<ResourceType>().unwrap(), ResourceType::Ore);
        assert!(matches!(
            "gold".parse::<ResourceType>(),
            Err(GameError::UnknownResource(name)) if name == "gold"
        ));
    }

    #[test]
    fn test_display_lists_every_resource() {
        let ledger = ResourceLedger::with_amounts(1, 0, 2, 0, 3);
        assert_eq!(
            ledger.to_string(),
            "Wood: 1, Brick: 0, Sheep: 2, Wheat: 0, Ore: 3"
        );
    }

    fn resource() -> impl Strategy<Value = ResourceType> {
        prop::sample::select(ResourceType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn credit_then_debit_restores_ledger(
            start in prop::collection::vec((resource(), 0u32..10), 0..8),
            r in resource(),
            amount in 1u32..20,
        ) {
            let original: ResourceLedger = start.into_iter().collect();
            let mut ledger = original.clone();
            ledger.credit(r, amount);
            ledger.debit(r, amount).unwrap();
            prop_assert_eq!(ledger, original);
        }

        #[test]
        fn spend_succeeds_iff_affordable(
            amounts in prop::array::uniform5(0u32..4),
            item in prop::sample::select(PurchasableItem::ALL.to_vec()),
        ) {
            let [wood, brick, sheep, wheat, ore] = amounts;
            let mut ledger = ResourceLedger::with_amounts(wood, brick, sheep, wheat, ore);
            let before = ledger.clone();
            let cost = item.cost();
            let affordable = ledger.affordable(&cost);
            let result = ledger.spend(&cost);
            prop_assert_eq!(result.is_ok(), affordable);
            for r in ResourceType::ALL {
                let expected = if affordable { before.get(r) - cost.get(r) } else { before.get(r) };
                prop_assert_eq!(ledger.get(r), expected);
            }
        }
    }
}
