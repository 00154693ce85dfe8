mod arena;
mod chain;
mod handle;
mod node;
mod raw_tree;

pub(crate) use chain::Chain;
pub(crate) use handle::Handle;
pub(crate) use raw_tree::RawStockTree;
