//! # Checkout Pricing
//!
//! The pure half of the checkout workflow: everything that can be decided
//! from the request and a snapshot of the products, before storage commits.
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [{product: 1, qty: 2}, {product: 1, qty: 1}, {product: 4, qty: 1}]     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_items()   empty? bad qty? merge duplicates                   │
//! │       │              → [{1, 3}, {4, 1}]                                 │
//! │       ▼                                                                 │
//! │  price_lines()       stock check + price × qty per line, grand total    │
//! │       │              (snapshots come from storage)                      │
//! │       ▼                                                                 │
//! │  PricedCheckout      handed to kasir-db for the atomic write            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CheckoutItem;
use crate::validation::{validate_id, validate_quantity};

// =============================================================================
// Product Snapshot
// =============================================================================

/// The product fields a checkout line depends on, read at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSnapshot {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

// =============================================================================
// Priced Checkout
// =============================================================================

/// One priced line, ready to be written as a transaction detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub product_name: String,
    pub product_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// All lines of a checkout plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCheckout {
    pub lines: Vec<PricedLine>,
    pub total: Money,
}

// =============================================================================
// Normalization
// =============================================================================

/// Validates a checkout request and merges repeated products.
///
/// ## Rules
/// - At least one item
/// - Every product id positive, every quantity positive
/// - Duplicate product ids are summed into one line, first-seen order kept
/// - A merged quantity that leaves `i64` is `AmountOverflow`
pub fn normalize_items(items: &[CheckoutItem]) -> CoreResult<Vec<CheckoutItem>> {
    if items.is_empty() {
        return Err(CoreError::EmptyCheckout);
    }

    let mut merged: Vec<CheckoutItem> = Vec::with_capacity(items.len());

    for item in items {
        validate_id("product_id", item.product_id)?;
        validate_quantity(item.quantity)?;

        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| CoreError::AmountOverflow {
                        context: format!("quantity for product {}", item.product_id),
                    })?;
            }
            None => merged.push(*item),
        }
    }

    Ok(merged)
}

// =============================================================================
// Availability & Pricing
// =============================================================================

/// Fails with `InsufficientStock` when `requested` exceeds the snapshot's stock.
pub fn check_availability(snapshot: &ProductSnapshot, requested: i64) -> CoreResult<()> {
    if requested > snapshot.stock {
        return Err(CoreError::InsufficientStock {
            product_id: snapshot.product_id,
            available: snapshot.stock,
            requested,
        });
    }
    Ok(())
}

/// Prices normalized items against product snapshots.
///
/// Each item must have a snapshot (`ProductNotFound` otherwise) with enough
/// stock (`InsufficientStock` otherwise). Subtotals and the total use checked
/// arithmetic.
pub fn price_lines(items: &[CheckoutItem], snapshots: &[ProductSnapshot]) -> CoreResult<PricedCheckout> {
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();

    for item in items {
        let snapshot = snapshots
            .iter()
            .find(|s| s.product_id == item.product_id)
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

        check_availability(snapshot, item.quantity)?;

        let line = price_line(snapshot, item.quantity)?;
        total = total
            .checked_add(line.subtotal)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: "checkout total".to_string(),
            })?;
        lines.push(line);
    }

    Ok(PricedCheckout { lines, total })
}

/// Prices a single line without checking stock.
pub fn price_line(snapshot: &ProductSnapshot, quantity: i64) -> CoreResult<PricedLine> {
    let product_price = Money::from_units(snapshot.price);
    let subtotal = product_price
        .checked_mul_quantity(quantity)
        .ok_or_else(|| CoreError::AmountOverflow {
            context: format!("subtotal for product {}", snapshot.product_id),
        })?;

    Ok(PricedLine {
        product_id: snapshot.product_id,
        product_name: snapshot.name.clone(),
        product_price,
        quantity,
        subtotal,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn snapshot(product_id: i64, price: i64, stock: i64) -> ProductSnapshot {
        ProductSnapshot {
            product_id,
            name: format!("Product {}", product_id),
            price,
            stock,
        }
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(normalize_items(&[]), Err(CoreError::EmptyCheckout)));
    }

    #[test]
    fn test_normalize_rejects_bad_quantity_and_id() {
        let err = normalize_items(&[CheckoutItem::new(1, 0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = normalize_items(&[CheckoutItem::new(1, -2)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = normalize_items(&[CheckoutItem::new(0, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_normalize_merges_duplicates_in_order() {
        let items = [
            CheckoutItem::new(4, 1),
            CheckoutItem::new(1, 2),
            CheckoutItem::new(4, 2),
        ];
        let merged = normalize_items(&items).unwrap();
        assert_eq!(merged, vec![CheckoutItem::new(4, 3), CheckoutItem::new(1, 2)]);
    }

    #[test]
    fn test_normalize_accepts_large_carts() {
        let items = [CheckoutItem::new(1, 600), CheckoutItem::new(1, 600)];
        assert_eq!(normalize_items(&items).unwrap(), vec![CheckoutItem::new(1, 1200)]);

        let items: Vec<CheckoutItem> = (1..=150).map(|id| CheckoutItem::new(id, 1)).collect();
        assert_eq!(normalize_items(&items).unwrap().len(), 150);
    }

    #[test]
    fn test_normalize_merged_quantity_overflow() {
        let items = [CheckoutItem::new(1, i64::MAX), CheckoutItem::new(1, 1)];
        let err = normalize_items(&items).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_price_lines_example() {
        // stock=10, price=5000, qty 3 → total 15000
        let items = [CheckoutItem::new(1, 3)];
        let priced = price_lines(&items, &[snapshot(1, 5000, 10)]).unwrap();

        assert_eq!(priced.total.units(), 15000);
        assert_eq!(priced.lines.len(), 1);
        assert_eq!(priced.lines[0].subtotal.units(), 15000);
        assert_eq!(priced.lines[0].product_price.units(), 5000);
    }

    #[test]
    fn test_price_lines_total_is_sum_of_subtotals() {
        let items = [CheckoutItem::new(1, 2), CheckoutItem::new(2, 5)];
        let snapshots = [snapshot(1, 3500, 10), snapshot(2, 1200, 5)];
        let priced = price_lines(&items, &snapshots).unwrap();

        let sum: Money = priced.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(sum, priced.total);
        for line in &priced.lines {
            assert_eq!(
                line.product_price.checked_mul_quantity(line.quantity),
                Some(line.subtotal)
            );
        }
    }

    #[test]
    fn test_price_lines_missing_product() {
        let items = [CheckoutItem::new(9, 1)];
        assert!(matches!(
            price_lines(&items, &[snapshot(1, 100, 1)]),
            Err(CoreError::ProductNotFound(9))
        ));
    }

    #[test]
    fn test_price_lines_insufficient_stock() {
        let items = [CheckoutItem::new(1, 11)];
        match price_lines(&items, &[snapshot(1, 5000, 10)]) {
            Err(CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            }) => {
                assert_eq!(product_id, 1);
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
    }

    #[test]
    fn test_price_line_overflow() {
        let err = price_line(&snapshot(1, i64::MAX, 10), 2).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }
}
