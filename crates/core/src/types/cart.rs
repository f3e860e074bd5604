//! Session cart.
//!
//! The cart is an ordered list of entries keyed by product ID. It lives in
//! the visitor's session and is never persisted beyond it.
//!
//! # Invariants
//!
//! - At most one entry exists per product ID.
//! - Every entry has a quantity of at least 1.
//! - Count and subtotal are derived on demand, never stored.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price};
use super::product::Product;

/// A product and its requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// The product being purchased.
    pub product: Product,
    /// Requested quantity (always >= 1).
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The items a visitor intends to purchase.
///
/// ```
/// use rust_decimal::Decimal;
/// use solar_direct_core::{Cart, Category, CurrencyCode, Price, Product, ProductId};
///
/// let panel = Product {
///     id: ProductId::from("p1"),
///     name: "Panel".into(),
///     description: String::new(),
///     price: Price::new(Decimal::new(100, 0), CurrencyCode::USD),
///     category: Category::Panels,
///     image: String::new(),
///     efficiency: "21%".into(),
///     warranty: "25 Years".into(),
///     rating: 4.5,
/// };
///
/// let mut cart = Cart::new();
/// cart.add(&panel);
/// cart.add(&panel);
/// assert_eq!(cart.count(), 2);
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.subtotal().amount, Decimal::new(200, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry's quantity, or appends a new entry with
    /// quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(entry) = self.entry_mut(&product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
        } else {
            self.entries.push(CartEntry {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove the entry for a product. Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.product.id != id);
        self.entries.len() != before
    }

    /// Adjust an entry's quantity by `delta`, clamping at 1.
    ///
    /// The quantity can never reach zero through this operation; use
    /// [`Cart::remove`] to drop an entry. Unknown IDs are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        if let Some(entry) = self.entry_mut(id) {
            let target = i64::from(entry.quantity).saturating_add(delta).max(1);
            entry.quantity = u32::try_from(target).unwrap_or(u32::MAX);
        }
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, entry| total.saturating_add(entry.quantity))
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .entries
            .first()
            .map_or(CurrencyCode::default(), |entry| {
                entry.product.price.currency_code
            });

        self.entries
            .iter()
            .fold(Price::zero(currency), |total, entry| {
                Price::new(total.amount + entry.line_total().amount, currency)
            })
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// The entry for a product, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| &entry.product.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: &ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|entry| &entry.product.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::Category;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::new(Decimal::new(price, 0), CurrencyCode::USD),
            category: Category::Panels,
            image: String::new(),
            efficiency: "20%".to_string(),
            warranty: "10 Years".to_string(),
            rating: 4.0,
        }
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal().amount, Decimal::ZERO);
    }

    #[test]
    fn test_add_remove_scenario() {
        let a = product("a", 100);
        let mut cart = Cart::new();

        cart.add(&a);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.subtotal().amount, Decimal::new(100, 0));

        cart.add(&a);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.subtotal().amount, Decimal::new(200, 0));
        assert_eq!(cart.len(), 1);

        cart.update_quantity(&a.id, -5);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 1);
        assert_eq!(cart.subtotal().amount, Decimal::new(100, 0));

        assert!(cart.remove(&a.id));
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal().amount, Decimal::ZERO);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let a = product("a", 100);
        let b = product("b", 50);
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&b);

        assert!(cart.remove(&a.id));
        let snapshot = cart.clone();
        assert!(!cart.remove(&a.id));
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100));
        let snapshot = cart.clone();

        cart.update_quantity(&ProductId::from("missing"), 3);
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_update_quantity_increments() {
        let a = product("a", 10);
        let mut cart = Cart::new();
        cart.add(&a);
        cart.update_quantity(&a.id, 4);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 5);
        cart.update_quantity(&a.id, -1);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 4);
    }

    #[test]
    fn test_update_quantity_extreme_deltas() {
        let a = product("a", 10);
        let mut cart = Cart::new();
        cart.add(&a);

        cart.update_quantity(&a.id, i64::MIN);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 1);

        cart.update_quantity(&a.id, i64::MAX);
        assert_eq!(cart.get(&a.id).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("b", 1));
        cart.add(&product("a", 1));
        cart.add(&product("b", 1));

        let ids: Vec<_> = cart.entries().iter().map(|e| e.product.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_cart_survives_session_serialization() {
        let mut cart = Cart::new();
        cart.add(&product("a", 299));
        cart.update_quantity(&ProductId::from("a"), 2);

        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Update(usize, i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize).prop_map(Op::Add),
            (0..4usize).prop_map(Op::Remove),
            (0..4usize, -50i64..50).prop_map(|(i, d)| Op::Update(i, d)),
        ]
    }

    proptest! {
        #[test]
        fn prop_repeated_add_counts_calls(n in 1u32..200) {
            let p = product("p", 7);
            let mut cart = Cart::new();
            for _ in 0..n {
                cart.add(&p);
            }
            prop_assert_eq!(cart.len(), 1);
            prop_assert_eq!(cart.get(&p.id).map(|e| e.quantity), Some(n));
        }

        #[test]
        fn prop_update_never_below_one(start in 1u32..100, delta in any::<i64>()) {
            let p = product("p", 7);
            let mut cart = Cart::new();
            cart.add(&p);
            cart.update_quantity(&p.id, i64::from(start) - 1);
            cart.update_quantity(&p.id, delta);
            prop_assert!(cart.get(&p.id).map_or(0, |e| e.quantity) >= 1);
        }

        #[test]
        fn prop_invariants_hold_for_any_sequence(ops in proptest::collection::vec(op(), 0..60)) {
            let products: Vec<Product> = (0..4i64)
                .map(|i| product(&format!("p{i}"), 10 * (i + 1)))
                .collect();
            let mut cart = Cart::new();

            for op in ops {
                match op {
                    Op::Add(i) => cart.add(&products[i]),
                    Op::Remove(i) => {
                        cart.remove(&products[i].id);
                    }
                    Op::Update(i, delta) => cart.update_quantity(&products[i].id, delta),
                }
            }

            let mut ids: Vec<_> = cart.entries().iter().map(|e| e.product.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), cart.len());

            prop_assert!(cart.entries().iter().all(|e| e.quantity >= 1));

            let count: u32 = cart.entries().iter().map(|e| e.quantity).sum();
            prop_assert_eq!(cart.count(), count);

            let subtotal: Decimal = cart
                .entries()
                .iter()
                .map(|e| e.product.price.amount * Decimal::from(e.quantity))
                .sum();
            prop_assert_eq!(cart.subtotal().amount, subtotal);
        }
    }
}
