#![no_main]

use arbitrary::Arbitrary;
use delve::game::{can_afford, purchase, Offer, Player, PurchaseResult, Shop, Stat};
use libfuzzer_sys::fuzz_target;

/// Structured input for purchase fuzzing.
#[derive(Arbitrary, Debug)]
struct EconomyInput {
    /// Starting inventory entries.
    inventory: Vec<(u8, u32)>,
    /// Custom offer price entries.
    price: Vec<(u8, u32)>,
    /// Custom offer boost.
    boost: i16,
    /// Which offer to buy: standard ones first, then the custom one.
    choice: u8,
    /// How many times to try buying it.
    attempts: u8,
}

const ITEMS: [&str; 4] = ["Gold", "Wood", "Meat", "Diamond"];

fn item(index: u8) -> &'static str {
    ITEMS[usize::from(index) % ITEMS.len()]
}

fuzz_target!(|input: EconomyInput| {
    let mut player = Player::default();
    for &(index, amount) in input.inventory.iter().take(16) {
        player.add(item(index), amount);
    }

    let price: Vec<(&str, u32)> = input
        .price
        .iter()
        .take(4)
        .map(|&(index, amount)| (item(index), amount))
        .collect();
    let mut offers = Shop::standard().offers;
    offers.push(Offer::new("Charm", &price, Stat::Strength, i32::from(input.boost)));
    let offer = &offers[usize::from(input.choice) % offers.len()];

    for _ in 0..input.attempts.min(32) {
        let before = player.clone();
        let affordable = can_afford(&player, offer);

        match purchase(&mut player, offer) {
            PurchaseResult::Bought => {
                assert!(affordable, "bought an unaffordable offer");
                for (name, _) in &offer.cost {
                    let spent = before.quantity(name) - player.quantity(name);
                    // Repeated price entries are charged in full
                    let total: u32 = offer
                        .cost
                        .iter()
                        .filter(|(n, _)| n == name)
                        .map(|(_, c)| c)
                        .sum();
                    assert_eq!(spent, total, "{name}: charged {spent}, price {total}");
                }
            }
            PurchaseResult::Insufficient => {
                assert!(!affordable, "refused an affordable offer");
                assert_eq!(player, before, "refused purchase changed the player");
            }
        }
    }
});
