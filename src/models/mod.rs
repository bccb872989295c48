//! Data models shared by the kernel and the frontend.

pub mod file_tree;
pub mod selection;

pub use file_tree::{
    build_file_tree, load_dir_entries, should_ignore, FileTree, FileTreeError, FileTreeRow,
    LoadState, NodeId, NodeKind,
};
pub use selection::Selection;
