use crate::{Emphasis, GraphView, NodeData};
use rustc_hash::FxHashSet;

/// Marks the selected document and its direct neighbors `Focused` and every other document
/// `Dimmed`. With no selection, or a selection that is not in the view, everything is `Normal`.
pub fn apply_selection(view: &mut GraphView, selected: Option<&str>) {
    let selected = selected.filter(|id| {
        view.nodes
            .iter()
            .any(|n| n.id == *id && matches!(n.data, NodeData::Document(_)))
    });

    let focused: Option<FxHashSet<String>> = selected.map(|id| {
        let mut set = FxHashSet::default();
        set.insert(id.to_string());
        for edge in &view.edges {
            if edge.source == id {
                set.insert(edge.target.clone());
            }
            if edge.target == id {
                set.insert(edge.source.clone());
            }
        }
        set
    });

    for node in &mut view.nodes {
        let NodeData::Document(data) = &mut node.data else {
            continue;
        };
        data.emphasis = match &focused {
            None => Emphasis::Normal,
            Some(set) if set.contains(&node.id) => Emphasis::Focused,
            Some(_) => Emphasis::Dimmed,
        };
    }
}
