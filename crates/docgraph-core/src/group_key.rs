use crate::Document;

/// Group key of documents at the root folder.
pub const UNGROUPED: &str = "ungrouped";

/// Prefix that turns a group key into a group node id.
pub const GROUP_ID_PREFIX: &str = "group:";

/// The document's folder path, or [`UNGROUPED`] when it has none.
pub fn resolve_group_key(doc: &Document) -> &str {
    group_key_for_path(&doc.path)
}

pub fn group_key_for_path(path: &str) -> &str {
    if path.trim().is_empty() {
        UNGROUPED
    } else {
        path
    }
}

pub fn group_node_id(key: &str) -> String {
    format!("{GROUP_ID_PREFIX}{key}")
}
