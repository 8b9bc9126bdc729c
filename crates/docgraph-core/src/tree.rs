//! Folder tree built from document paths, with move validation for drag-and-drop hosts.
//!
//! Items live in an arena and point at their parent by index; ancestor checks walk parent links
//! in a loop, so tree depth never turns into stack depth.

use crate::Document;
use rustc_hash::FxHashMap;

pub type ItemIx = usize;

/// Index of the root folder.
pub const ROOT: ItemIx = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Folder,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Folder path for folders (empty for the root), document id for documents.
    pub key: String,
    /// Last path segment for folders, title for documents.
    pub name: String,
    pub kind: ItemKind,
    pub parent: Option<ItemIx>,
    pub children: Vec<ItemIx>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the item to move does not exist")]
    UnknownItem,
    #[error("the target folder does not exist")]
    UnknownTarget,
    #[error("the target is not a folder")]
    TargetNotFolder,
    #[error("an item cannot be moved into itself")]
    IntoSelf,
    #[error("a folder cannot be moved into one of its descendants")]
    IntoDescendant,
    #[error("the item is already in the target folder")]
    AlreadyInTarget,
    #[error("the target folder already has a folder with that name")]
    NameTaken,
}

#[derive(Debug, Clone)]
pub struct FolderTree {
    items: Vec<TreeItem>,
    folders: FxHashMap<String, ItemIx>,
    documents: FxHashMap<String, ItemIx>,
}

impl Default for FolderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderTree {
    pub fn new() -> Self {
        let mut folders = FxHashMap::default();
        folders.insert(String::new(), ROOT);
        Self {
            items: vec![TreeItem {
                key: String::new(),
                name: String::new(),
                kind: ItemKind::Folder,
                parent: None,
                children: Vec::new(),
            }],
            folders,
            documents: FxHashMap::default(),
        }
    }

    pub fn from_documents(documents: &[Document]) -> Self {
        let mut tree = Self::new();
        for doc in documents {
            let folder = tree.ensure_folder(&doc.path);
            tree.insert_document(&doc.id, &doc.title, folder);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.len() == 1
    }

    pub fn item(&self, ix: ItemIx) -> Option<&TreeItem> {
        self.items.get(ix)
    }

    pub fn folder(&self, path: &str) -> Option<ItemIx> {
        self.folders.get(normalize_path(path).as_str()).copied()
    }

    pub fn document(&self, id: &str) -> Option<ItemIx> {
        self.documents.get(id).copied()
    }

    pub fn children(&self, ix: ItemIx) -> &[ItemIx] {
        self.items.get(ix).map(|i| i.children.as_slice()).unwrap_or_default()
    }

    /// Parents of `ix`, nearest first, ending at the root.
    pub fn ancestors(&self, ix: ItemIx) -> impl Iterator<Item = ItemIx> + '_ {
        let mut cur = self.items.get(ix).and_then(|i| i.parent);
        std::iter::from_fn(move || {
            let v = cur?;
            cur = self.items.get(v).and_then(|i| i.parent);
            Some(v)
        })
    }

    pub fn is_ancestor(&self, ancestor: ItemIx, of: ItemIx) -> bool {
        self.ancestors(of).any(|a| a == ancestor)
    }

    /// Creates every missing folder along `path` and returns the innermost one.
    pub fn ensure_folder(&mut self, path: &str) -> ItemIx {
        let path = normalize_path(path);
        if let Some(&ix) = self.folders.get(&path) {
            return ix;
        }
        let mut parent = ROOT;
        let mut prefix = String::new();
        for segment in path.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            parent = match self.folders.get(&prefix) {
                Some(&ix) => ix,
                None => {
                    let ix = self.push(TreeItem {
                        key: prefix.clone(),
                        name: segment.to_string(),
                        kind: ItemKind::Folder,
                        parent: Some(parent),
                        children: Vec::new(),
                    });
                    self.folders.insert(prefix.clone(), ix);
                    ix
                }
            };
        }
        parent
    }

    fn insert_document(&mut self, id: &str, title: &str, folder: ItemIx) -> ItemIx {
        if let Some(&ix) = self.documents.get(id) {
            return ix;
        }
        let ix = self.push(TreeItem {
            key: id.to_string(),
            name: title.to_string(),
            kind: ItemKind::Document,
            parent: Some(folder),
            children: Vec::new(),
        });
        self.documents.insert(id.to_string(), ix);
        ix
    }

    fn push(&mut self, item: TreeItem) -> ItemIx {
        let ix = self.items.len();
        if let Some(parent) = item.parent {
            self.items[parent].children.push(ix);
        }
        self.items.push(item);
        ix
    }

    pub fn validate_move(&self, item: ItemIx, target: ItemIx) -> Result<(), MoveError> {
        let moving = self.items.get(item).ok_or(MoveError::UnknownItem)?;
        let dest = self.items.get(target).ok_or(MoveError::UnknownTarget)?;
        if item == target {
            return Err(MoveError::IntoSelf);
        }
        if dest.kind != ItemKind::Folder {
            return Err(MoveError::TargetNotFolder);
        }
        if moving.parent == Some(target) {
            return Err(MoveError::AlreadyInTarget);
        }
        if moving.kind == ItemKind::Folder {
            if self.is_ancestor(item, target) {
                return Err(MoveError::IntoDescendant);
            }
            let taken = dest.children.iter().any(|&c| {
                let child = &self.items[c];
                child.kind == ItemKind::Folder && child.name == moving.name
            });
            if taken {
                return Err(MoveError::NameTaken);
            }
        }
        Ok(())
    }

    pub fn validate_document_move(&self, doc_id: &str, folder_path: &str) -> Result<(), MoveError> {
        let item = self.document(doc_id).ok_or(MoveError::UnknownItem)?;
        let target = self.folder(folder_path).ok_or(MoveError::UnknownTarget)?;
        self.validate_move(item, target)
    }

    pub fn validate_folder_move(&self, path: &str, target_path: &str) -> Result<(), MoveError> {
        let item = self.folder(path).ok_or(MoveError::UnknownItem)?;
        let target = self.folder(target_path).ok_or(MoveError::UnknownTarget)?;
        self.validate_move(item, target)
    }

    /// Validates, then re-parents `item` under `target`. A moved folder and every folder below it
    /// are re-keyed under the target's path.
    pub fn move_item(&mut self, item: ItemIx, target: ItemIx) -> Result<(), MoveError> {
        self.validate_move(item, target)?;
        if let Some(old) = self.items[item].parent {
            self.items[old].children.retain(|&c| c != item);
        }
        self.items[item].parent = Some(target);
        self.items[target].children.push(item);
        if self.items[item].kind == ItemKind::Folder {
            self.rekey_folders(item);
        }
        Ok(())
    }

    fn rekey_folders(&mut self, top: ItemIx) {
        let mut subtree = Vec::new();
        let mut stack = vec![top];
        while let Some(ix) = stack.pop() {
            if self.items[ix].kind != ItemKind::Folder {
                continue;
            }
            subtree.push(ix);
            stack.extend(self.items[ix].children.iter().copied());
        }

        for &ix in &subtree {
            self.folders.remove(&self.items[ix].key);
        }
        // Parents precede their children in `subtree`.
        for &ix in &subtree {
            let parent_key = self.items[ix]
                .parent
                .map(|p| self.items[p].key.as_str())
                .unwrap_or_default();
            let key = if parent_key.is_empty() {
                self.items[ix].name.clone()
            } else {
                format!("{parent_key}/{}", self.items[ix].name)
            };
            self.folders.insert(key.clone(), ix);
            self.items[ix].key = key;
        }
    }
}

fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
