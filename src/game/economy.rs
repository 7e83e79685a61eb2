//! Shop economy: affordability, purchases and the shop menu loop.
//!
//! A purchase is all-or-nothing. Either every cost line is deducted and the
//! stat boost applied, or nothing changes.

use std::collections::BTreeMap;

use tracing::debug;

use crate::game::{Encounter, GameEvent, Offer, Player, Shop, ShopChoice};

/// Result of trying to buy an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseResult {
    /// Cost deducted and boost applied.
    Bought,
    /// The player lacks at least one cost item. Nothing changed.
    Insufficient,
}

/// Check whether the player holds every item the offer costs.
///
/// Missing inventory entries count as zero. Cost lines naming the same item
/// add up.
#[must_use]
pub fn can_afford(player: &Player, offer: &Offer) -> bool {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for (item, quantity) in &offer.cost {
        *totals.entry(item.as_str()).or_default() += u64::from(*quantity);
    }
    totals
        .into_iter()
        .all(|(item, total)| u64::from(player.quantity(item)) >= total)
}

/// Buy `offer`: deduct its cost and apply its stat boost.
pub fn purchase(player: &mut Player, offer: &Offer) -> PurchaseResult {
    if !can_afford(player, offer) {
        return PurchaseResult::Insufficient;
    }

    for (item, quantity) in &offer.cost {
        // Affordability was checked above, so every removal succeeds.
        let removed = player.remove(item, *quantity);
        debug_assert!(removed, "affordable cost line {item} could not be removed");
    }
    player.apply_boost(offer.boost);
    PurchaseResult::Bought
}

/// Visit a shop: show the menu until the player exits.
///
/// Shops are never consumed and always allow the move.
pub fn visit_shop(shop: &Shop, encounter: &mut Encounter<'_>) -> bool {
    encounter.emit(GameEvent::ShopOpened);

    loop {
        match encounter.controller.shop_choice(&shop.offers, encounter.player) {
            ShopChoice::Exit => break,
            ShopChoice::Buy(index) => {
                let Some(offer) = shop.offers.get(index) else {
                    encounter.emit(GameEvent::InvalidChoice);
                    continue;
                };
                match purchase(encounter.player, offer) {
                    PurchaseResult::Bought => {
                        debug!(item = %offer.name, "purchase");
                        encounter.emit(GameEvent::Purchased {
                            item: offer.name.clone(),
                        });
                    }
                    PurchaseResult::Insufficient => {
                        encounter.emit(GameEvent::InsufficientFunds {
                            item: offer.name.clone(),
                        });
                    }
                }
            }
            ShopChoice::Unrecognized => encounter.emit(GameEvent::InvalidChoice),
        }
    }

    encounter.emit(GameEvent::ShopClosed);
    true
}
