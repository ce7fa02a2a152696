//! # Repository Module
//!
//! SQLite implementations of the store traits in [`crate::store`].
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.products.list(Some("teh"))                              │
//! │       ▼                                                                 │
//! │  dyn ProductStore ──► ProductRepository                                │
//! │                       ├── list(&self, name_filter)                     │
//! │                       ├── get_by_id(&self, id)                         │
//! │                       ├── create / update / delete                     │
//! │                       └── decrement_stock(conn, id, qty)               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`product::ProductRepository`] - Product CRUD and stock decrement
//! - [`transaction::TransactionRepository`] - Committed sale reads
//! - [`report::ReportEngine`] - Sales aggregation

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;
