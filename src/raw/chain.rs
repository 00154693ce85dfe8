use core::cmp::Ordering;

use crate::record::Field;

use super::arena::Arena;
use super::handle::Handle;
use super::raw_tree::RawStockTree;

/// One link in the flattened sequence: the record slot it refers to and the
/// next link in the chain.
struct Link {
    record: Handle,
    next: Option<Handle>,
}

/// A singly linked sequence over the tree's records, produced by flattening
/// an in-order traversal and reordered in place by merge sort.
///
/// The chain is a second view over the record arena. The tree's own child
/// links are never reinterpreted as sequence links, so the tree stays valid
/// while a sorted chain exists alongside it.
pub(crate) struct Chain {
    links: Arena<Link>,
    head: Option<Handle>,
}

impl Chain {
    /// Flattens `tree` into a chain, visiting nodes in order, so the chain
    /// starts out in ascending key order. Every record appears exactly once.
    pub(crate) fn flatten(tree: &RawStockTree) -> Self {
        let mut chain = Self {
            links: Arena::new(),
            head: None,
        };
        let mut tail = None;
        chain.push_in_order(tree, tree.root(), &mut tail);
        chain
    }

    fn push_in_order(&mut self, tree: &RawStockTree, node: Option<Handle>, tail: &mut Option<Handle>) {
        let Some(handle) = node else { return };
        let node = tree.node(handle);

        self.push_in_order(tree, node.left, tail);
        let link = self.links.alloc(Link {
            record: tree.node(handle).record,
            next: None,
        });
        match *tail {
            Some(t) => self.links.get_mut(t).next = Some(link),
            None => self.head = Some(link),
        }
        *tail = Some(link);
        self.push_in_order(tree, tree.node(handle).right, tail);
    }

    pub(crate) const fn head(&self) -> Option<Handle> {
        self.head
    }

    pub(crate) fn next(&self, link: Handle) -> Option<Handle> {
        self.links.get(link).next
    }

    pub(crate) fn record(&self, link: Handle) -> Handle {
        self.links.get(link).record
    }

    /// Top-down merge sort of the chain by the selected attribute,
    /// ascending and stable: links whose attribute values compare equal
    /// keep their current relative order.
    pub(crate) fn sort_by(&mut self, tree: &RawStockTree, field: Field) {
        self.head = self.sort_run(tree, self.head, field);
    }

    fn sort_run(&mut self, tree: &RawStockTree, head: Option<Handle>, field: Field) -> Option<Handle> {
        let first = head?;
        if self.links.get(first).next.is_none() {
            return head;
        }

        // Split at the midpoint and detach the back half.
        let middle = self.middle(first);
        let back = self.links.get_mut(middle).next.take();

        let front = self.sort_run(tree, Some(first), field);
        let back = self.sort_run(tree, back, field);
        self.merge(tree, front, back, field)
    }

    /// Finds the last link of the front half via a slow/fast pointer walk:
    /// the fast cursor advances two links per step, the slow cursor one.
    fn middle(&self, head: Handle) -> Handle {
        let mut slow = head;
        let mut fast = head;
        loop {
            let Some(step) = self.links.get(fast).next else { break };
            let Some(next_fast) = self.links.get(step).next else { break };
            fast = next_fast;
            if let Some(next_slow) = self.links.get(slow).next {
                slow = next_slow;
            }
        }
        slow
    }

    /// Merges two sorted runs by repeatedly taking the smaller head.
    /// Equal heads take from `front`, which guarantees stability.
    fn merge(
        &mut self,
        tree: &RawStockTree,
        mut front: Option<Handle>,
        mut back: Option<Handle>,
        field: Field,
    ) -> Option<Handle> {
        let mut head = None;
        let mut tail: Option<Handle> = None;

        loop {
            let chosen = match (front, back) {
                (None, None) => break,
                (Some(f), None) => {
                    front = self.links.get(f).next;
                    f
                }
                (None, Some(b)) => {
                    back = self.links.get(b).next;
                    b
                }
                (Some(f), Some(b)) => {
                    if self.compare(tree, f, b, field) == Ordering::Greater {
                        back = self.links.get(b).next;
                        b
                    } else {
                        front = self.links.get(f).next;
                        f
                    }
                }
            };

            self.links.get_mut(chosen).next = None;
            match tail {
                Some(t) => self.links.get_mut(t).next = Some(chosen),
                None => head = Some(chosen),
            }
            tail = Some(chosen);
        }

        head
    }

    fn compare(&self, tree: &RawStockTree, a: Handle, b: Handle, field: Field) -> Ordering {
        let a = field.value_of(tree.record(self.links.get(a).record));
        let b = field.value_of(tree.record(self.links.get(b).record));
        a.cmp(&b)
    }
}
