use docgraph_core::tree::ROOT;
use docgraph_core::{Document, FolderTree, ItemKind, MoveError};

fn tree() -> FolderTree {
    FolderTree::from_documents(&[
        Document::new("readme", "", "Readme"),
        Document::new("intro", "guide", "Intro"),
        Document::new("setup", "guide/install", "Setup"),
        Document::new("api", "reference/api", "API"),
    ])
}

#[test]
fn folders_are_created_for_every_path_prefix() {
    let t = tree();
    for path in ["", "guide", "guide/install", "reference", "reference/api"] {
        let ix = t.folder(path).unwrap();
        assert_eq!(t.item(ix).unwrap().kind, ItemKind::Folder);
    }
    assert_eq!(t.folder("/guide/"), t.folder("guide"));
    assert_eq!(t.folder(""), Some(ROOT));

    let install = t.folder("guide/install").unwrap();
    assert_eq!(t.item(install).unwrap().name, "install");
    let setup = t.document("setup").unwrap();
    assert_eq!(t.item(setup).unwrap().parent, Some(install));
    assert_eq!(t.item(t.document("readme").unwrap()).unwrap().parent, Some(ROOT));
}

#[test]
fn ancestors_walk_up_to_the_root() {
    let t = tree();
    let setup = t.document("setup").unwrap();
    let chain: Vec<String> = t
        .ancestors(setup)
        .map(|ix| t.item(ix).unwrap().key.clone())
        .collect();
    assert_eq!(chain, vec!["guide/install", "guide", ""]);
}

#[test]
fn valid_moves_pass() {
    let t = tree();
    assert_eq!(t.validate_document_move("intro", "reference"), Ok(()));
    assert_eq!(t.validate_folder_move("guide/install", "reference/api"), Ok(()));
    assert_eq!(t.validate_folder_move("reference", "guide"), Ok(()));
}

#[test]
fn invalid_moves_are_rejected() {
    let t = tree();
    assert_eq!(t.validate_document_move("nope", "guide"), Err(MoveError::UnknownItem));
    assert_eq!(t.validate_document_move("intro", "nope"), Err(MoveError::UnknownTarget));
    assert_eq!(t.validate_folder_move("guide", "guide"), Err(MoveError::IntoSelf));
    assert_eq!(
        t.validate_folder_move("guide", "guide/install"),
        Err(MoveError::IntoDescendant)
    );
    assert_eq!(t.validate_document_move("intro", "guide"), Err(MoveError::AlreadyInTarget));

    let intro = t.document("intro").unwrap();
    let api = t.document("api").unwrap();
    assert_eq!(t.validate_move(intro, api), Err(MoveError::TargetNotFolder));
    assert_eq!(t.validate_move(intro, 10_000), Err(MoveError::UnknownTarget));
}

#[test]
fn move_item_reparents_after_validation() {
    let mut t = tree();
    let guide = t.folder("guide").unwrap();
    let reference = t.folder("reference").unwrap();

    t.move_item(reference, guide).unwrap();
    assert_eq!(t.item(reference).unwrap().parent, Some(guide));
    assert!(t.children(guide).contains(&reference));
    assert!(!t.children(ROOT).contains(&reference));

    // `guide` now contains `reference`, so the reverse move would create a cycle.
    assert_eq!(t.move_item(guide, reference), Err(MoveError::IntoDescendant));
}

#[test]
fn deep_trees_do_not_recurse() {
    let path: Vec<String> = (0..5_000).map(|i| format!("f{i}")).collect();
    let path = path.join("/");
    let mut t = FolderTree::new();
    let leaf = t.ensure_folder(&path);
    assert_eq!(t.ancestors(leaf).count(), 5_000);
    let top = t.folder("f0").unwrap();
    assert_eq!(t.validate_move(top, leaf), Err(MoveError::IntoDescendant));
}

#[test]
fn moved_folders_answer_to_their_new_paths() {
    let mut t = tree();
    let guide = t.folder("guide").unwrap();
    let install = t.folder("guide/install").unwrap();
    let reference = t.folder("reference").unwrap();

    t.move_item(guide, reference).unwrap();
    assert_eq!(t.folder("reference/guide"), Some(guide));
    assert_eq!(t.folder("reference/guide/install"), Some(install));
    assert_eq!(t.item(install).unwrap().key, "reference/guide/install");
    assert_eq!(t.folder("guide"), None);
    assert_eq!(t.folder("guide/install"), None);
    assert_eq!(t.validate_folder_move("guide", ""), Err(MoveError::UnknownItem));
    assert_eq!(t.validate_folder_move("reference/guide", ""), Ok(()));

    // Documents keep their ids as keys.
    assert_eq!(t.item(t.document("setup").unwrap()).unwrap().parent, Some(install));
    assert_eq!(t.validate_document_move("setup", "reference/guide"), Ok(()));
}

#[test]
fn folder_moves_onto_an_existing_name_are_rejected() {
    let mut t = FolderTree::from_documents(&[
        Document::new("a", "docs/api", "A"),
        Document::new("b", "api", "B"),
    ]);
    let nested = t.folder("docs/api").unwrap();
    assert_eq!(t.move_item(nested, ROOT), Err(MoveError::NameTaken));
    assert_eq!(t.folder("docs/api"), Some(nested));
}
