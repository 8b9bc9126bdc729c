//! Graph container used by `docgraph-layout`.
//!
//! Nodes are addressed by string ids externally and by dense indices internally. Edges live in
//! an arena with tombstones so indices stay stable while the layout pipeline removes, reverses
//! and splits edges. Iteration order is always insertion order, which keeps every consumer
//! deterministic.

use rustc_hash::FxBuildHasher;

pub mod alg;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Dense node index.
pub type NodeIx = usize;

/// Stable edge index (never reused, even after removal).
pub type EdgeIx = usize;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeEntry<E> {
    pub v: NodeIx,
    pub w: NodeIx,
    pub label: E,
}

impl<E> EdgeEntry<E> {
    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }
}

/// Directed multigraph. Parallel edges and self-loops are allowed.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, NodeIx>,
    edges: Vec<Option<EdgeEntry<E>>>,
    out_adj: Vec<Vec<EdgeIx>>,
    in_adj: Vec<Vec<EdgeIx>>,
    live_edges: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
            live_edges: 0,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut node_index = HashMap::default();
        node_index.reserve(nodes);
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index,
            edges: Vec::with_capacity(edges),
            out_adj: Vec::with_capacity(nodes),
            in_adj: Vec::with_capacity(nodes),
            live_edges: 0,
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node, or replaces the label of an existing one. Returns its index either way.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> NodeIx {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self.node_index.insert(id, ix);
        ix
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> NodeIx
    where
        N: Default,
    {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            return ix;
        }
        self.set_node(id, N::default())
    }

    pub fn node_ix(&self, id: &str) -> Option<NodeIx> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, ix: NodeIx) -> &str {
        self.nodes[ix].id.as_str()
    }

    pub fn node(&self, ix: NodeIx) -> Option<&N> {
        self.nodes.get(ix).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, ix: NodeIx) -> Option<&mut N> {
        self.nodes.get_mut(ix).map(|n| &mut n.label)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&N> {
        self.node_ix(id).and_then(|ix| self.node(ix))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_indices(&self) -> std::ops::Range<NodeIx> {
        0..self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &str, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, n)| (ix, n.id.as_str(), &n.label))
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeIx, &mut N),
    {
        for (ix, n) in self.nodes.iter_mut().enumerate() {
            f(ix, &mut n.label);
        }
    }

    pub fn add_edge(&mut self, v: NodeIx, w: NodeIx, label: E) -> EdgeIx {
        assert!(
            v < self.nodes.len() && w < self.nodes.len(),
            "edge endpoint out of range"
        );
        let e = self.edges.len();
        self.edges.push(Some(EdgeEntry { v, w, label }));
        self.out_adj[v].push(e);
        self.in_adj[w].push(e);
        self.live_edges += 1;
        e
    }

    /// Adds an edge between two existing nodes. Returns `None` when either id is unknown.
    pub fn add_edge_by_id(&mut self, v: &str, w: &str, label: E) -> Option<EdgeIx> {
        let v = self.node_ix(v)?;
        let w = self.node_ix(w)?;
        Some(self.add_edge(v, w, label))
    }

    pub fn remove_edge(&mut self, e: EdgeIx) -> Option<EdgeEntry<E>> {
        let entry = self.edges.get_mut(e)?.take()?;
        self.out_adj[entry.v].retain(|&x| x != e);
        self.in_adj[entry.w].retain(|&x| x != e);
        self.live_edges -= 1;
        Some(entry)
    }

    /// Flips an edge in place, keeping its index and label.
    pub fn reverse_edge(&mut self, e: EdgeIx) -> bool {
        let Some(Some(entry)) = self.edges.get_mut(e) else {
            return false;
        };
        let (v, w) = (entry.v, entry.w);
        (entry.v, entry.w) = (w, v);
        self.out_adj[v].retain(|&x| x != e);
        self.in_adj[w].retain(|&x| x != e);
        self.out_adj[w].push(e);
        self.in_adj[v].push(e);
        true
    }

    pub fn edge(&self, e: EdgeIx) -> Option<&EdgeEntry<E>> {
        self.edges.get(e).and_then(Option::as_ref)
    }

    pub fn edge_mut(&mut self, e: EdgeIx) -> Option<&mut EdgeEntry<E>> {
        self.edges.get_mut(e).and_then(Option::as_mut)
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &EdgeEntry<E>)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(e, entry)| entry.as_ref().map(|entry| (e, entry)))
    }

    pub fn edge_indices(&self) -> Vec<EdgeIx> {
        self.edges().map(|(e, _)| e).collect()
    }

    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        &self.out_adj[v]
    }

    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        &self.in_adj[v]
    }

    /// Successor indices in edge insertion order; parallel edges yield repeated entries.
    pub fn successors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.out_adj[v]
            .iter()
            .filter_map(move |&e| self.edge(e).map(|entry| entry.w))
    }

    pub fn predecessors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.in_adj[v]
            .iter()
            .filter_map(move |&e| self.edge(e).map(|entry| entry.v))
    }

    /// Nodes without incoming edges. Self-loops do not count as incoming.
    pub fn sources(&self) -> Vec<NodeIx> {
        self.node_indices()
            .filter(|&v| self.predecessors(v).all(|u| u == v))
            .collect()
    }

    pub fn sinks(&self) -> Vec<NodeIx> {
        self.node_indices()
            .filter(|&v| self.successors(v).all(|w| w == v))
            .collect()
    }
}
