//! Property-based tests for the vending machine.
//!
//! These tests use proptest to check that money is conserved and that
//! failed purchases leave no trace, across many random machines.

use std::collections::BTreeMap;

use proptest::prelude::*;
use vendo_core::{make_change, Coin, Money, VendingMachine};

prop_compose! {
    fn arbitrary_coin()(index in 0..Coin::ALL.len()) -> Coin {
        Coin::ALL[index]
    }
}

prop_compose! {
    fn arbitrary_stock()(quantities in prop::collection::vec(0..6i64, Coin::ALL.len())) -> BTreeMap<Coin, i64> {
        Coin::ALL.into_iter().zip(quantities).collect()
    }
}

prop_compose! {
    /// One slot, every coin accepted, random price and stock.
    fn arbitrary_machine()(
        price in 1..1_000i64,
        quantity in 0..3i64,
        stock in arbitrary_stock(),
    ) -> VendingMachine {
        let machine = VendingMachine::with_coins(1, Coin::ALL).unwrap();
        machine.set_product_price(0, price).unwrap();
        machine.set_product_quantity(0, quantity).unwrap();
        for (coin, qty) in stock {
            machine.set_coin_quantity(coin, qty).unwrap();
        }
        machine
    }
}

fn value_of(coins: &[Coin]) -> i64 {
    coins.iter().map(|c| c.pence()).sum()
}

proptest! {
    #[test]
    fn successful_purchase_conserves_money(
        machine in arbitrary_machine(),
        tender in prop::collection::vec(arbitrary_coin(), 0..8),
    ) {
        let before = machine.snapshot();
        let price = machine.product_price(0).unwrap();

        if let Ok(change) = machine.purchase_product(0, &tender) {
            let after = machine.snapshot();
            prop_assert_eq!(value_of(&tender) - value_of(&change), price);
            prop_assert_eq!(
                after.stock_value().unwrap().pence(),
                before.stock_value().unwrap().pence() + value_of(&tender) - value_of(&change)
            );
            prop_assert_eq!(after.slots[0].quantity, before.slots[0].quantity - 1);
            for qty in after.coins.values() {
                prop_assert!(*qty >= 0);
            }
        }
    }

    #[test]
    fn failed_purchase_changes_nothing(
        machine in arbitrary_machine(),
        tender in prop::collection::vec(arbitrary_coin(), 0..8),
    ) {
        let before = machine.snapshot();

        if machine.purchase_product(0, &tender).is_err() {
            prop_assert_eq!(machine.snapshot(), before);
        }
    }

    #[test]
    fn reads_are_idempotent(machine in arbitrary_machine(), coin in arbitrary_coin()) {
        prop_assert_eq!(machine.snapshot(), machine.snapshot());
        prop_assert_eq!(machine.coin_quantity(coin).unwrap(), machine.coin_quantity(coin).unwrap());
        prop_assert_eq!(machine.product(0).unwrap(), machine.product(0).unwrap());
    }

    #[test]
    fn change_sums_to_target_within_stock(stock in arbitrary_stock(), target in 0..2_000i64) {
        if let Ok(change) = make_change(&stock, Money::from_pence(target)) {
            prop_assert_eq!(change.total().pence(), target);
            for (coin, count) in change.counts() {
                prop_assert!(*count > 0);
                prop_assert!(*count <= stock[coin]);
            }
        }
    }

    #[test]
    fn change_search_is_deterministic(stock in arbitrary_stock(), target in 0..2_000i64) {
        let first = make_change(&stock, Money::from_pence(target));
        let second = make_change(&stock, Money::from_pence(target));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn one_pence_coins_always_make_change(target in 0..200i64) {
        let stock = BTreeMap::from([(Coin::OneP, 200)]);
        let change = make_change(&stock, Money::from_pence(target)).unwrap();
        prop_assert_eq!(change.count(Coin::OneP), target);
    }
}
