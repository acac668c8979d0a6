//! Player-to-player resource exchange.
//!
//! Both ledgers are checked before either is touched, so a trade happens in
//! full or not at all.

use crate::actions::{GameEvent, TradeOffer};
use crate::game::GameError;
use crate::player::Player;
use crate::resources::ResourceType;
use tracing::info;

impl Player {
    /// Give `give_amount` of `give` to `other` in exchange for `take_amount` of `take`
    pub fn trade(
        &mut self,
        other: &mut Player,
        give: ResourceType,
        give_amount: u32,
        take: ResourceType,
        take_amount: u32,
    ) -> Result<GameEvent, GameError> {
        let offer = TradeOffer::simple(self.id(), other.id(), give, give_amount, take, take_amount);
        self.exchange(other, &offer)
    }

    /// Carry out `offer`, where `self` is the offering side and `other` the
    /// side it is addressed to
    pub fn exchange(&mut self, other: &mut Player, offer: &TradeOffer) -> Result<GameEvent, GameError> {
        if !offer.is_valid() || offer.from != self.id() || offer.to != other.id() {
            return Err(GameError::InvalidTrade);
        }

        let mut shortfalls = self.resources().shortfalls_against(&offer.offering);
        shortfalls.extend(other.resources().shortfalls_against(&offer.requesting));
        if !shortfalls.is_empty() {
            return Err(GameError::InsufficientResources { shortfalls });
        }

        self.resources_mut()
            .spend_ledger(&offer.offering)
            .map_err(|shortfalls| GameError::InsufficientResources { shortfalls })?;
        other
            .resources_mut()
            .spend_ledger(&offer.requesting)
            .map_err(|shortfalls| GameError::InsufficientResources { shortfalls })?;
        other.resources_mut().credit_all(&offer.offering);
        self.resources_mut().credit_all(&offer.requesting);

        info!(
            from = offer.from,
            to = offer.to,
            offering = %offer.offering,
            requesting = %offer.requesting,
            "trade completed"
        );
        Ok(GameEvent::TradeCompleted {
            offer: offer.clone(),
        })
    }
}
