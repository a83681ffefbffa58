//! Shopping cart container.
//!
//! A [`Cart`] is a plain owned value: one per shopper session, created empty
//! and mutated synchronously. Totals are recomputed from the item list on
//! every read, so they can never go stale.
//!
//! Items hold the catalog's `Arc<Product>` rather than a copy, and every
//! quantity is clamped to the product's stock when it is set.
//!
//! Between requests a cart travels as a list of [`CartLine`]s. Rebuilding it
//! with [`Cart::from_lines`] resolves each line against the live catalog.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::product::Product;
use crate::shipping;
use crate::types::ProductId;

/// A quantity of one product held in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product: Arc<Product>,
    quantity: u32,
}

impl CartItem {
    /// The referenced product.
    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Units of the product in the cart, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * self.quantity
    }
}

/// Serializable form of a cart row, stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Derived figures for the cart page and header badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub remaining_for_free_shipping: Decimal,
}

/// The ordered selection of products for one shopper.
///
/// There is at most one [`CartItem`] per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from session lines against the current catalog.
    ///
    /// Lines for unknown or inactive products are dropped, duplicate lines
    /// are merged and quantities are clamped to current stock.
    #[must_use]
    pub fn from_lines(lines: &[CartLine], catalog: &Catalog) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if let Some(product) = catalog.find_by_id(&line.product_id) {
                cart.add_item(Arc::clone(product), line.quantity);
            }
        }
        cart
    }

    /// Session form of the cart.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|item| CartLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity currently held for a product, 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product.id == product_id)
            .map_or(0, CartItem::quantity)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing row is incremented (and re-pointed at `product`);
    /// otherwise a new row is appended. The resulting quantity never
    /// exceeds the product's stock. Adding zero units, or adding a product
    /// with no stock, leaves the cart without a row for it.
    ///
    /// Returns the row's resulting quantity (0 when there is no row).
    pub fn add_item(&mut self, product: Arc<Product>, quantity: u32) -> u32 {
        let stock = product.stock;

        if let Some(index) = self.position(&product.id) {
            let resulting = self
                .items
                .get(index)
                .map_or(0, |item| item.quantity)
                .saturating_add(quantity)
                .min(stock);
            if resulting == 0 {
                self.items.remove(index);
            } else if let Some(item) = self.items.get_mut(index) {
                item.product = product;
                item.quantity = resulting;
            }
            return resulting;
        }

        let resulting = quantity.min(stock);
        if resulting > 0 {
            self.items.push(CartItem {
                product,
                quantity: resulting,
            });
        }
        resulting
    }

    /// Remove the row for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product.id != product_id);
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of zero or less removes the row. Values above stock are
    /// clamped. Absent ids are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let Some(index) = self.position(product_id) else {
            return;
        };

        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let requested = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        let resulting = requested.min(item.product.stock);

        if resulting == 0 {
            self.items.remove(index);
        } else {
            item.quantity = resulting;
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all items.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Subtotal: sum of price times quantity, before shipping.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, |acc, line| {
                acc.checked_add(line).unwrap_or(Decimal::MAX)
            })
    }

    /// Totals including shipping.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.total_price();
        let shipping = shipping::shipping_cost(subtotal);
        CartSummary {
            item_count: self.total_items(),
            subtotal,
            shipping,
            total: subtotal.checked_add(shipping).unwrap_or(Decimal::MAX),
            remaining_for_free_shipping: shipping::remaining_for_free_shipping(subtotal),
        }
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product.id == product_id)
    }
}
