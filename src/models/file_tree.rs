//! Workspace file tree with lazily loaded directories.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
};

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

#[derive(Debug)]
pub enum FileTreeError {
    ParentNotDirectory,
    NameExists,
    InvalidNodeId,
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::ParentNotDirectory => write!(f, "parent is not a directory"),
            FileTreeError::NameExists => write!(f, "name already exists in parent"),
            FileTreeError::InvalidNodeId => write!(f, "invalid node id"),
        }
    }
}

impl std::error::Error for FileTreeError {}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: OsString,
    parent: Option<NodeId>,
    children: Option<BTreeMap<OsString, NodeId>>,
    load_state: LoadState,
}

impl Node {
    fn new(kind: NodeKind, name: OsString, parent: Option<NodeId>) -> Self {
        match kind {
            NodeKind::File => Self {
                kind,
                name,
                parent,
                children: None,
                load_state: LoadState::Loaded,
            },
            NodeKind::Dir => Self {
                kind,
                name,
                parent,
                children: Some(BTreeMap::new()),
                load_state: LoadState::NotLoaded,
            },
        }
    }
}

#[derive(Debug)]
pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    expanded: FxHashSet<NodeId>,
    absolute_root: PathBuf,
}

impl FileTree {
    pub fn new_with_root(root_name: OsString, absolute_root: PathBuf) -> Self {
        let mut arena = SlotMap::with_key();
        let mut node = Node::new(NodeKind::Dir, root_name, None);
        node.load_state = LoadState::Loaded;
        let root = arena.insert(node);

        let mut expanded = FxHashSet::default();
        expanded.insert(root);

        Self {
            arena,
            root,
            expanded,
            absolute_root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn absolute_root(&self) -> &Path {
        &self.absolute_root
    }

    pub fn load_state(&self, id: NodeId) -> Option<LoadState> {
        self.arena.get(id).map(|n| n.load_state)
    }

    pub fn set_load_state(&mut self, id: NodeId, state: LoadState) {
        if let Some(node) = self.arena.get_mut(id) {
            node.load_state = state;
        }
    }

    pub fn insert_child(
        &mut self,
        parent: NodeId,
        name: OsString,
        kind: NodeKind,
    ) -> Result<NodeId, FileTreeError> {
        {
            let parent_ro = self.arena.get(parent).ok_or(FileTreeError::InvalidNodeId)?;
            let children_ro = parent_ro
                .children
                .as_ref()
                .ok_or(FileTreeError::ParentNotDirectory)?;
            if children_ro.contains_key(&name) {
                return Err(FileTreeError::NameExists);
            }
        }

        let id = self
            .arena
            .insert(Node::new(kind, name.clone(), Some(parent)));
        self.arena
            .get_mut(parent)
            .and_then(|n| n.children.as_mut())
            .ok_or(FileTreeError::InvalidNodeId)?
            .insert(name, id);

        Ok(id)
    }

    /// Replaces the children of directory `id` with freshly read entries.
    pub fn set_children(
        &mut self,
        id: NodeId,
        entries: Vec<(OsString, bool)>,
    ) -> Result<(), FileTreeError> {
        let old: Vec<NodeId> = self
            .arena
            .get(id)
            .ok_or(FileTreeError::InvalidNodeId)?
            .children
            .as_ref()
            .ok_or(FileTreeError::ParentNotDirectory)?
            .values()
            .copied()
            .collect();
        for child in old {
            self.remove_subtree(child);
        }
        if let Some(children) = self.arena.get_mut(id).and_then(|n| n.children.as_mut()) {
            children.clear();
        }

        for (name, is_dir) in entries {
            let kind = if is_dir { NodeKind::Dir } else { NodeKind::File };
            let _ = self.insert_child(id, name, kind);
        }
        self.set_load_state(id, LoadState::Loaded);
        Ok(())
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.arena.remove(node_id) {
                if let Some(children) = node.children {
                    stack.extend(children.into_values());
                }
            }
            self.expanded.remove(&node_id);
        }
    }

    pub fn full_path(&self, id: NodeId) -> PathBuf {
        let mut components = Vec::new();
        let mut current = id;
        while let Some(node) = self.arena.get(current) {
            match node.parent {
                Some(parent) => {
                    components.push(node.name.as_os_str());
                    current = parent;
                }
                None => break,
            }
        }

        let mut path = self.absolute_root.clone();
        for comp in components.iter().rev() {
            path.push(comp);
        }
        path
    }

    pub fn find_node_by_path(&self, path: &Path) -> Option<NodeId> {
        let relative = path.strip_prefix(&self.absolute_root).ok()?;
        let mut current = self.root;
        for component in relative.components() {
            let children = self.arena.get(current)?.children.as_ref()?;
            current = *children.get(component.as_os_str())?;
        }
        Some(current)
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.is_expanded(id) {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.is_dir(id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        if id != self.root {
            self.expanded.remove(&id);
        }
    }

    pub fn get_name(&self, id: NodeId) -> Option<&OsString> {
        self.arena.get(id).map(|n| &n.name)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .is_some_and(|n| n.kind == NodeKind::Dir)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }
}

#[derive(Debug, Clone)]
pub struct FileTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: OsString,
    pub is_dir: bool,
    pub is_expanded: bool,
    pub load_state: LoadState,
}

impl FileTree {
    /// Visible rows in display order: directories first, then files, each sorted by name.
    pub fn flatten_for_view(&self) -> Vec<FileTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            if id != self.root {
                result.push(FileTreeRow {
                    id,
                    depth,
                    name: node.name.clone(),
                    is_dir: node.kind == NodeKind::Dir,
                    is_expanded: self.expanded.contains(&id),
                    load_state: node.load_state,
                });
            }

            if !self.expanded.contains(&id) {
                continue;
            }
            let Some(children) = &node.children else {
                continue;
            };

            let (dirs, files): (Vec<NodeId>, Vec<NodeId>) = children
                .values()
                .copied()
                .partition(|child| self.is_dir(*child));
            let child_depth = if id == self.root { 0 } else { depth + 1 };
            for child in files.into_iter().rev() {
                stack.push((child, child_depth));
            }
            for child in dirs.into_iter().rev() {
                stack.push((child, child_depth));
            }
        }

        result
    }
}

pub fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
            | "node_modules"
    )
}

pub fn load_dir_entries(path: &Path) -> io::Result<Vec<(OsString, bool)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        if should_ignore(&name.to_string_lossy()) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    Ok(entries)
}

pub fn build_file_tree(root_path: &Path) -> io::Result<FileTree> {
    let absolute_root = root_path
        .canonicalize()
        .unwrap_or_else(|_| root_path.to_path_buf());

    let root_name = absolute_root
        .file_name()
        .unwrap_or(absolute_root.as_os_str())
        .to_os_string();

    let mut tree = FileTree::new_with_root(root_name, absolute_root.clone());
    let entries = load_dir_entries(&absolute_root)?;
    let root = tree.root();
    if let Err(e) = tree.set_children(root, entries) {
        tracing::warn!(root = %absolute_root.display(), error = %e, "cannot populate workspace root");
    }

    Ok(tree)
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
