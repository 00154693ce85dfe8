//! Inventory stock-card ledger backed by a binary search tree.
//!
//! This crate provides [`StockTree`], an in-memory inventory keyed by an
//! integer derived from each item's unique identifier, with:
//!
//! - [`insert`](StockTree::insert) / [`remove`](StockTree::remove) /
//!   [`search_by`](StockTree::search_by) over the key-ordered tree
//! - [`sort_by_brand`](StockTree::sort_by_brand) - an order-preserving,
//!   stable merge sort by a non-key attribute
//! - [`csv`] - bulk load from and save to a flat comma-delimited file,
//!   with per-row diagnostics instead of hard failures
//!
//! # Example
//!
//! ```
//! use stock_ledger::{Field, StockRecord, StockTree};
//!
//! let mut inventory = StockTree::new();
//! inventory.insert(StockRecord::new("1/1/2024", "New", "Yamaha", "EN002", "On-hand")).unwrap();
//! inventory.insert(StockRecord::new("1/2/2024", "New", "Honda", "EN001", "Sold")).unwrap();
//! assert_eq!(inventory.len(), 2);
//!
//! // Exact-match search over any field.
//! let sold = inventory.search_by(Field::Status, "Sold");
//! assert_eq!(sold.len(), 1);
//! assert_eq!(sold[0].item_id(), "EN001");
//!
//! // A stable merge sort by brand governs subsequent traversals.
//! inventory.sort_by_brand();
//! let brands: Vec<_> = inventory.iter().map(StockRecord::brand).collect();
//! assert_eq!(brands, ["Honda", "Yamaha"]);
//! ```
//!
//! # Implementation
//!
//! Nodes live in a slotted arena and refer to each other by niche-optimized
//! handles, so the tree owns no `Box`-per-node graph and removal never
//! chases parent pointers. Sorting flattens the tree into a separate singly
//! linked sequence, merge sorts it (slow/fast midpoint split, ties keep the
//! first operand for stability), and the tree adopts the sorted sequence as
//! its read order until the next mutation. The tree itself stays intact, so
//! key-based mutation remains correct after a sort.

#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

mod raw;

pub mod csv;
pub mod error;
pub mod key;
pub mod record;
pub mod tree;

pub use error::{DuplicateId, NotFound, StoreError};
pub use key::derive_key;
pub use record::{Field, StockRecord};
pub use tree::StockTree;
