//! Path-addressable tree container.
//!
//! The foundation of the twinreg resource model: a validated [`Path`]
//! type and an arena-backed [`PathTree`] with CRUD and traversal
//! primitives. Higher layers store shells, submodels, and elements in a
//! `PathTree` and mirror its shape into endpoint descriptors.
//!
//! # Example
//!
//! ```rust
//! use twinreg_tree::{path, PathTree};
//!
//! let mut tree: PathTree<String> = PathTree::new();
//! tree.insert(&path!("shells/S1"), "Shell One".to_string());
//!
//! assert_eq!(
//!     tree.retrieve(&path!("shells/S1")).map(String::as_str),
//!     Some("Shell One")
//! );
//! ```

mod error;
mod path;
mod tree;

pub use error::{PathError, TreeError};
pub use path::Path;
pub use tree::{Iter, PathTree};
