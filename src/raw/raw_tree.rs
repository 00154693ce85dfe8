use core::cmp::Ordering;

use crate::record::StockRecord;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The core binary-search-tree engine backing `StockTree`.
///
/// Nodes and records live in separate arenas; nodes refer to records and to
/// each other by handle. Strict ordering invariant: every left descendant's
/// key < node key < every right descendant's key.
pub(crate) struct RawStockTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Arena storing all records (separate from nodes so the sort chain can
    /// refer to records without touching tree links).
    records: Arena<StockRecord>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of records in the tree.
    len: usize,
}

impl RawStockTree {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            records: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn record(&self, handle: Handle) -> &StockRecord {
        self.records.get(handle)
    }

    /// Inserts a record at the position determined by its derived key.
    ///
    /// On a key collision the tree is left untouched and the rejected record
    /// is handed back so the caller can name the offending identifier.
    pub(crate) fn insert(&mut self, record: StockRecord) -> Result<(), StockRecord> {
        let key = record.key();

        let Some(mut current) = self.root else {
            let root = self.new_node(key, record);
            self.root = Some(root);
            return Ok(());
        };

        loop {
            let node = self.nodes.get(current);
            match key.cmp(&node.key) {
                Ordering::Less => match node.left {
                    Some(left) => current = left,
                    None => {
                        let child = self.new_node(key, record);
                        self.nodes.get_mut(current).left = Some(child);
                        return Ok(());
                    }
                },
                Ordering::Greater => match node.right {
                    Some(right) => current = right,
                    None => {
                        let child = self.new_node(key, record);
                        self.nodes.get_mut(current).right = Some(child);
                        return Ok(());
                    }
                },
                Ordering::Equal => return Err(record),
            }
        }
    }

    fn new_node(&mut self, key: i32, record: StockRecord) -> Handle {
        let slot = self.records.alloc(record);
        self.len += 1;
        self.nodes.alloc(Node::new(key, slot))
    }

    /// Removes the record whose derived key equals `key`, if any.
    ///
    /// A node with at most one child is spliced out. A node with two
    /// children swaps payloads with its in-order successor (the leftmost
    /// node of the right subtree), and the successor's node is then removed
    /// from the right subtree by the same procedure.
    pub(crate) fn remove(&mut self, key: i32) -> Option<StockRecord> {
        let (root, removed) = self.remove_at(self.root, key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Removes `key` from the subtree rooted at `node`, returning the new
    /// subtree root and the removed record.
    fn remove_at(&mut self, node: Option<Handle>, key: i32) -> (Option<Handle>, Option<StockRecord>) {
        let Some(handle) = node else {
            return (None, None);
        };

        match key.cmp(&self.nodes.get(handle).key) {
            Ordering::Less => {
                let (left, removed) = self.remove_at(self.nodes.get(handle).left, key);
                self.nodes.get_mut(handle).left = left;
                (Some(handle), removed)
            }
            Ordering::Greater => {
                let (right, removed) = self.remove_at(self.nodes.get(handle).right, key);
                self.nodes.get_mut(handle).right = right;
                (Some(handle), removed)
            }
            Ordering::Equal => {
                let (left, right) = {
                    let n = self.nodes.get(handle);
                    (n.left, n.right)
                };

                match (left, right) {
                    // At most one child: splice the node out.
                    (None, child) | (child, None) => {
                        let node = self.nodes.take(handle);
                        (child, Some(self.records.take(node.record)))
                    }
                    // Two children: promote the in-order successor's payload
                    // into this node, then remove the successor's own node
                    // (which has no left child) from the right subtree. The
                    // doomed record rides out in the successor's old slot.
                    (Some(_), Some(right)) => {
                        let successor = self.leftmost(right);
                        let successor_key = self.nodes.get(successor).key;

                        let doomed = self.nodes.get(handle).record;
                        let promoted = self.nodes.get(successor).record;
                        {
                            let n = self.nodes.get_mut(handle);
                            n.key = successor_key;
                            n.record = promoted;
                        }
                        self.nodes.get_mut(successor).record = doomed;

                        let (new_right, removed) = self.remove_at(Some(right), successor_key);
                        self.nodes.get_mut(handle).right = new_right;
                        (Some(handle), removed)
                    }
                }
            }
        }
    }

    fn leftmost(&self, mut current: Handle) -> Handle {
        while let Some(left) = self.nodes.get(current).left {
            current = left;
        }
        current
    }
}
