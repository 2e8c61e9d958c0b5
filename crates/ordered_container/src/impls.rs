pub mod array;
pub mod avl;
pub mod binary_search;
pub mod bst;
pub mod hash_table;
pub mod hasher;

mod render;

pub use array::ArrayMap;
pub use avl::AvlTreeMap;
pub use binary_search::BinarySearchMap;
pub use bst::BstMap;
pub use hash_table::HashTableMap;
pub use hasher::{ChainHasher, DefaultHashBuilder};
