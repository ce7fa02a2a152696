//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate holds the domain model and every rule that can be evaluated
//! without touching storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /api/products  /api/checkout  /api/report                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │ normalize │  │ DateRange │  │   │
//! │  │   │Transaction│  │           │  │  price    │  │ SalesRpt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, checkout unit of work        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, TransactionDetail, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`checkout`] - Checkout request normalization and line pricing
//! - [`report`] - Report windows and report shapes
//! - [`error`] - Domain error types and the error taxonomy
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::{normalize_items, price_lines, ProductSnapshot};
//! use kasir_core::CheckoutItem;
//!
//! let items = normalize_items(&[CheckoutItem::new(1, 3)]).unwrap();
//! let snapshot = ProductSnapshot {
//!     product_id: 1,
//!     name: "Indomie Goreng".to_string(),
//!     price: 5000,
//!     stock: 10,
//! };
//!
//! let priced = price_lines(&items, &[snapshot]).unwrap();
//! assert_eq!(priced.total.units(), 15000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use report::{BestSeller, DateRange, SalesReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Date format used on the wire for report windows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
