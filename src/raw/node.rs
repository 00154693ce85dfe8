use super::handle::Handle;

/// A binary-search-tree node: the derived order key, the handle of the
/// record it carries, and child links. Children are owned by exactly one
/// parent; there are no parent links and no cycles.
pub(crate) struct Node {
    pub(crate) key: i32,
    pub(crate) record: Handle,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl Node {
    pub(crate) const fn new(key: i32, record: Handle) -> Self {
        Self {
            key,
            record,
            left: None,
            right: None,
        }
    }
}
