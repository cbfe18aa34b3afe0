pub mod binary_tree;
pub mod linked_list;
pub mod ops;

pub use binary_tree::Tree;
pub use linked_list::{List, NodeRef};
pub use ops::Ops;
