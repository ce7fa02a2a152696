//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │ ProductCategory │◄──│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name           │   │  total_amount       │   │
//! │  │  description    │   │  price          │   │  created_at         │   │
//! │  └─────────────────┘   │  stock          │   └──────────┬──────────┘   │
//! │                        │  category_id    │              │ 1..*         │
//! │                        └────────▲────────┘   ┌──────────▼──────────┐   │
//! │                                 │ weak       │ TransactionDetail   │   │
//! │                                 └────────────│  product_id         │   │
//! │                                              │  product_name  (snap)│  │
//! │                                              │  product_price (snap)│  │
//! │                                              │  quantity, subtotal │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by the store and never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// A grouping of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Category fields embedded in a product read view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, copied into transaction details at sale time.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,

    /// Sellable units currently available. Never negative.
    pub stock: i64,

    /// Optional category reference.
    pub category_id: Option<i64>,

    /// The referenced category, when the read joined it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

/// Input for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default, alias = "categoryId")]
    pub category_id: Option<i64>,
}

// =============================================================================
// Checkout Item
// =============================================================================

/// One requested line of a checkout. Input only, never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    #[serde(alias = "productId")]
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The header of a committed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    /// Sum of the detail subtotals.
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_amount)
    }
}

// =============================================================================
// Transaction Detail
// =============================================================================

/// A line item of a transaction.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    /// Weak reference: the product may since have been deleted.
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Unit price at time of sale (frozen).
    pub product_price: i64,
    pub quantity: i64,
    /// product_price × quantity.
    pub subtotal: i64,
}

impl TransactionDetail {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_units(self.subtotal)
    }
}

/// A transaction together with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWithDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub details: Vec<TransactionDetail>,
}

impl TransactionWithDetails {
    /// Sum of the detail subtotals.
    pub fn details_total(&self) -> Money {
        self.details.iter().map(TransactionDetail::subtotal).sum()
    }

    /// Checks the header total against its lines, and each line against
    /// its snapshotted price.
    pub fn is_consistent(&self) -> bool {
        self.details_total() == self.transaction.total()
            && self
                .details
                .iter()
                .all(|d| d.product_price.checked_mul(d.quantity) == Some(d.subtotal))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64, price: i64, quantity: i64) -> TransactionDetail {
        TransactionDetail {
            id,
            transaction_id: 1,
            product_id: id,
            product_name: format!("Product {}", id),
            product_price: price,
            quantity,
            subtotal: price * quantity,
        }
    }

    #[test]
    fn test_checkout_item_accepts_camel_case_alias() {
        let item: CheckoutItem =
            serde_json::from_str(r#"{"productId": 4, "quantity": 2}"#).unwrap();
        assert_eq!(item, CheckoutItem::new(4, 2));

        let item: CheckoutItem =
            serde_json::from_str(r#"{"product_id": 4, "quantity": 2}"#).unwrap();
        assert_eq!(item, CheckoutItem::new(4, 2));
    }

    #[test]
    fn test_product_omits_missing_category() {
        let product = Product {
            id: 1,
            name: "Teh Botol".to_string(),
            price: 4000,
            stock: 3,
            category_id: None,
            category: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("category").is_none());
        assert!(json["category_id"].is_null());
    }

    #[test]
    fn test_transaction_consistency() {
        let mut tx = TransactionWithDetails {
            transaction: Transaction {
                id: 1,
                total_amount: 15000 + 8000,
                created_at: Utc::now(),
            },
            details: vec![detail(1, 5000, 3), detail(2, 4000, 2)],
        };
        assert_eq!(tx.details_total().units(), 23000);
        assert!(tx.is_consistent());

        tx.transaction.total_amount = 1;
        assert!(!tx.is_consistent());
    }

    #[test]
    fn test_transaction_flattens_header() {
        let tx = TransactionWithDetails {
            transaction: Transaction {
                id: 9,
                total_amount: 5000,
                created_at: Utc::now(),
            },
            details: vec![detail(1, 5000, 1)],
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["total_amount"], 5000);
        assert_eq!(json["details"].as_array().map(Vec::len), Some(1));
    }
}
