//! Undirected graph container used by `torpedo`.
//!
//! The layout engine only ever asks topology questions (vertex ids, degrees,
//! neighbor sets), so the container is a deliberately small, insertion-ordered
//! arena: simple (no self-loops, no parallel edges) and undirected.

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

/// Undirected simple graph with `String` vertex ids and a generic node label.
///
/// Nodes keep their insertion order; every query that enumerates nodes or
/// neighbors is deterministic for a given build sequence.
pub struct Graph<N>
where
    N: Default + 'static,
{
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    // Adjacency lists parallel to `nodes`; `edges` keeps one (v, w) entry per
    // undirected edge with v < w by node index.
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,

    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
}

impl<N> Default for Graph<N>
where
    N: Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Graph<N>
where
    N: Default + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            adjacency: Vec::new(),
            edges: Vec::new(),
            default_node_label: Box::new(N::default),
        }
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return self;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.adjacency.push(Vec::new());
        self.node_index.insert(id, ix);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&ix| &self.nodes[ix].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |ix| &mut self.nodes[ix].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id_by_ix(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    /// Adds an undirected edge, creating missing endpoints with the default
    /// label. Self-loops and parallel edges are ignored (simple graph).
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let v_ix = self.node_index[&v];
        let w_ix = self.node_index[&w];
        if v_ix == w_ix || self.adjacency[v_ix].contains(&w_ix) {
            return self;
        }

        self.adjacency[v_ix].push(w_ix);
        self.adjacency[w_ix].push(v_ix);
        self.edges.push((v_ix.min(w_ix), v_ix.max(w_ix)));
        self
    }

    /// Chains edges along a node sequence.
    pub fn set_path(&mut self, ids: &[&str]) -> &mut Self {
        for pair in ids.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        let (Some(&v_ix), Some(&w_ix)) = (self.node_index.get(v), self.node_index.get(w)) else {
            return false;
        };
        self.adjacency[v_ix].contains(&w_ix)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(v, w)| (self.nodes[v].id.as_str(), self.nodes[w].id.as_str()))
    }

    /// Number of edges incident to `id`; 0 for unknown vertices.
    pub fn degree(&self, id: &str) -> usize {
        self.node_index
            .get(id)
            .map_or(0, |&ix| self.adjacency[ix].len())
    }

    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        let adjacent: &[usize] = self
            .node_index
            .get(id)
            .map_or(&[][..], |&ix| self.adjacency[ix].as_slice());
        adjacent.iter().map(|&ix| self.nodes[ix].id.as_str())
    }

    /// Neighbor indices of the node at `ix`, in edge insertion order.
    pub fn neighbor_ixs(&self, ix: usize) -> &[usize] {
        self.adjacency.get(ix).map_or(&[], |a| a.as_slice())
    }
}

impl<N> std::fmt::Debug for Graph<N>
where
    N: Default + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}
