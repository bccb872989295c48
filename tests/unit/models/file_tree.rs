use super::*;

use tempfile::tempdir;

fn names(tree: &FileTree) -> Vec<(u16, String)> {
    tree.flatten_for_view()
        .into_iter()
        .map(|r| (r.depth, r.name.to_string_lossy().to_string()))
        .collect()
}

#[test]
fn test_new_tree() {
    let tree = FileTree::new_with_root("test".into(), PathBuf::from("/test"));
    assert!(tree.is_dir(tree.root()));
    assert!(tree.is_expanded(tree.root()));
    assert_eq!(tree.load_state(tree.root()), Some(LoadState::Loaded));
    assert!(tree.flatten_for_view().is_empty());
}

#[test]
fn test_insert_child() {
    let mut tree = FileTree::new_with_root("root".into(), PathBuf::from("/root"));
    let root = tree.root();

    let file_id = tree
        .insert_child(root, "file.asm".into(), NodeKind::File)
        .unwrap();
    let dir_id = tree
        .insert_child(root, "src".into(), NodeKind::Dir)
        .unwrap();

    assert!(!tree.is_dir(file_id));
    assert!(tree.is_dir(dir_id));
    assert_eq!(tree.load_state(dir_id), Some(LoadState::NotLoaded));
    assert!(matches!(
        tree.insert_child(root, "src".into(), NodeKind::File),
        Err(FileTreeError::NameExists)
    ));
    assert!(matches!(
        tree.insert_child(file_id, "x".into(), NodeKind::File),
        Err(FileTreeError::ParentNotDirectory)
    ));
}

#[test]
fn test_paths_round_trip() {
    let mut tree = FileTree::new_with_root("root".into(), PathBuf::from("/root"));
    let src = tree
        .insert_child(tree.root(), "src".into(), NodeKind::Dir)
        .unwrap();
    let boot = tree.insert_child(src, "boot.asm".into(), NodeKind::File).unwrap();

    assert_eq!(tree.full_path(boot), PathBuf::from("/root/src/boot.asm"));
    assert_eq!(tree.find_node_by_path(Path::new("/root/src/boot.asm")), Some(boot));
    assert_eq!(tree.find_node_by_path(Path::new("/root")), Some(tree.root()));
    assert_eq!(tree.find_node_by_path(Path::new("/elsewhere/boot.asm")), None);
}

#[test]
fn test_flatten_orders_dirs_first_and_hides_collapsed() {
    let mut tree = FileTree::new_with_root("root".into(), PathBuf::from("/root"));
    let root = tree.root();
    tree.set_children(
        root,
        vec![
            ("main.asm".into(), false),
            ("lib".into(), true),
            ("boot".into(), true),
        ],
    )
    .unwrap();
    let lib = tree.find_node_by_path(Path::new("/root/lib")).unwrap();
    tree.set_children(lib, vec![("io.asm".into(), false)]).unwrap();

    assert_eq!(
        names(&tree),
        vec![
            (0, "boot".to_string()),
            (0, "lib".to_string()),
            (0, "main.asm".to_string()),
        ]
    );

    tree.toggle_expand(lib);
    assert_eq!(names(&tree)[2], (1, "io.asm".to_string()));

    tree.toggle_expand(lib);
    assert_eq!(names(&tree).len(), 3);
}

#[test]
fn test_set_children_replaces_subtree() {
    let mut tree = FileTree::new_with_root("root".into(), PathBuf::from("/root"));
    let root = tree.root();
    tree.set_children(root, vec![("old".into(), true)]).unwrap();
    let old = tree.find_node_by_path(Path::new("/root/old")).unwrap();
    tree.expand(old);

    tree.set_children(root, vec![("new.asm".into(), false)]).unwrap();
    assert!(tree.get_name(old).is_none());
    assert!(!tree.is_expanded(old));
    assert_eq!(names(&tree), vec![(0, "new.asm".to_string())]);
}

#[test]
fn test_root_never_collapses() {
    let mut tree = FileTree::new_with_root("root".into(), PathBuf::from("/root"));
    let root = tree.root();
    tree.collapse(root);
    assert!(tree.is_expanded(root));
}

#[test]
fn test_build_file_tree_skips_ignored_entries() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("boot.asm"), "").unwrap();
    std::fs::write(dir.path().join(".DS_Store"), "").unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    std::fs::create_dir(dir.path().join("lib")).unwrap();

    let tree = build_file_tree(dir.path()).unwrap();
    assert_eq!(
        names(&tree),
        vec![(0, "lib".to_string()), (0, "boot.asm".to_string())]
    );
    assert_eq!(tree.absolute_root(), dir.path().canonicalize().unwrap());
}
