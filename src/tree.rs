//! The public store facade over the raw tree engine.

use core::fmt;
use core::iter::FusedIterator;

use chrono::Local;
use log::debug;

use crate::error::{DuplicateId, NotFound};
use crate::key::derive_key;
use crate::raw::{Chain, Handle, RawStockTree};
use crate::record::{Field, StockRecord};

/// Date format for manually added items: month/day/year without zero
/// padding, matching the file format's date column.
const MANUAL_DATE_FORMAT: &str = "%-m/%-d/%Y";
/// Stock label assigned to manually added items.
const MANUAL_STOCK_LABEL: &str = "New";
/// Lifecycle status assigned to manually added items.
const MANUAL_STATUS: &str = "On-hand";

/// An inventory store ordered by the key derived from each item identifier.
///
/// The store enforces key uniqueness: inserting a record whose identifier
/// derives an already-present key is rejected without mutation. Traversal
/// via [`iter`](StockTree::iter) yields records in ascending key order, or
/// in attribute order after a [`sort_by`](StockTree::sort_by) until the
/// next mutation.
///
/// # Examples
///
/// ```
/// use stock_ledger::{StockRecord, StockTree};
///
/// let mut inventory = StockTree::new();
/// inventory.insert(StockRecord::new("1/1/2024", "New", "Honda", "EN001", "On-hand")).unwrap();
///
/// assert!(inventory.insert(StockRecord::new("2/2/2024", "Used", "Honda", "EN001", "Sold")).is_err());
/// assert_eq!(inventory.len(), 1);
///
/// let removed = inventory.remove("EN001").unwrap();
/// assert_eq!(removed.date(), "1/1/2024");
/// assert!(inventory.is_empty());
/// ```
pub struct StockTree {
    raw: RawStockTree,
    /// Sorted linear view adopted by the last sort; dropped on mutation.
    run: Option<Chain>,
}

impl StockTree {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawStockTree::new(),
            run: None,
        }
    }

    /// Returns the number of records in the store.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Inserts a fully specified record, e.g. one parsed from a CSV row.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateId`] naming the rejected identifier if a record
    /// with an equal derived key is already stored. The store is unchanged.
    pub fn insert(&mut self, record: StockRecord) -> Result<(), DuplicateId> {
        match self.raw.insert(record) {
            Ok(()) => {
                // Any sorted view predates this record; fall back to the tree.
                self.run = None;
                Ok(())
            }
            Err(rejected) => Err(DuplicateId(rejected.item_id().to_owned())),
        }
    }

    /// Adds a manually entered item. Only the brand and identifier are
    /// caller-supplied; the date is today, the stock label `"New"` and the
    /// status `"On-hand"`.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateId`] if the identifier's key is already stored.
    pub fn add_item(&mut self, brand: &str, item_id: &str) -> Result<(), DuplicateId> {
        let date = Local::now().format(MANUAL_DATE_FORMAT).to_string();
        self.insert(StockRecord::new(date, MANUAL_STOCK_LABEL, brand, item_id, MANUAL_STATUS))
    }

    /// Removes the record stored under `item_id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no record derives an equal key. The store is
    /// unchanged.
    pub fn remove(&mut self, item_id: &str) -> Result<StockRecord, NotFound> {
        match self.raw.remove(derive_key(item_id)) {
            Some(record) => {
                self.run = None;
                Ok(record)
            }
            None => Err(NotFound(item_id.to_owned())),
        }
    }

    /// Returns every record whose selected field equals `value` exactly,
    /// in traversal order. An empty result is not an error.
    #[must_use]
    pub fn search_by(&self, field: Field, value: &str) -> Vec<&StockRecord> {
        self.iter().filter(|record| field.value_of(record) == value).collect()
    }

    /// Reorders the store by brand; see [`sort_by`](StockTree::sort_by).
    pub fn sort_by_brand(&mut self) {
        self.sort_by(Field::Brand);
    }

    /// Reorders the store's read order by the selected attribute,
    /// ascending, ties keeping their previous relative order (stable).
    ///
    /// The tree is flattened into a linked sequence, merge sorted, and the
    /// sorted sequence becomes the traversal order for subsequent reads and
    /// exports. The record set is preserved exactly. A later insert or
    /// remove discards the sorted view and traversal reverts to key order.
    ///
    /// Sorting an empty or single-record store is a no-op.
    pub fn sort_by(&mut self, field: Field) {
        if self.len() < 2 {
            return;
        }

        let mut chain = Chain::flatten(&self.raw);
        chain.sort_by(&self.raw, field);
        self.run = Some(chain);
        debug!("sorted {} records by {field:?}", self.len());
    }

    /// Returns a lazy in-order traversal of the store. A fresh traversal
    /// can be started at any time and never mutates the store.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let cursor = match &self.run {
            Some(chain) => Cursor::Run {
                chain,
                next: chain.head(),
            },
            None => {
                let mut stack = Vec::new();
                let mut current = self.raw.root();
                while let Some(handle) = current {
                    stack.push(handle);
                    current = self.raw.node(handle).left;
                }
                Cursor::Tree(stack)
            }
        };

        Iter {
            raw: &self.raw,
            cursor,
            remaining: self.len(),
        }
    }
}

impl Default for StockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StockTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a StockTree {
    type Item = &'a StockRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the records of a [`StockTree`] in traversal order.
///
/// Created by [`StockTree::iter`]. Walks either the tree (ascending key
/// order, explicit stack instead of recursion) or the sorted chain left by
/// the last sort.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    raw: &'a RawStockTree,
    cursor: Cursor<'a>,
    remaining: usize,
}

enum Cursor<'a> {
    /// Pending nodes; the top of the stack is the next node to visit.
    Tree(Vec<Handle>),
    /// Next link in the sorted chain.
    Run { chain: &'a Chain, next: Option<Handle> },
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a StockRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match &mut self.cursor {
            Cursor::Tree(stack) => {
                let handle = stack.pop()?;
                let node = self.raw.node(handle);
                // Queue the left spine of the right subtree.
                let mut current = node.right;
                while let Some(h) = current {
                    stack.push(h);
                    current = self.raw.node(h).left;
                }
                node.record
            }
            Cursor::Run { chain, next } => {
                let link = (*next)?;
                *next = chain.next(link);
                chain.record(link)
            }
        };

        self.remaining -= 1;
        Some(self.raw.record(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}
