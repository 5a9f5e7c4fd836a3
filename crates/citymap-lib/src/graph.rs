use std::collections::TryReserveError;

use thiserror::Error;

/// Numeric identifier for a graph node.
pub type NodeId = u64;

/// Starting capacity of the node collection; it doubles whenever it fills up.
const INITIAL_NODE_CAPACITY: usize = 100;

/// Errors raised by graph store mutations. A failed mutation leaves the graph
/// unchanged.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {id} already exists")]
    DuplicateNode { id: NodeId },

    #[error("node {id} does not exist")]
    MissingNode { id: NodeId },

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("failed to grow graph storage")]
    Allocation(#[from] TryReserveError),
}

/// Directed edge, owned by its source node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<L> {
    pub target: NodeId,
    pub weight: f64,
    pub label: L,
}

/// Graph node with an optional payload and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Node<P, L> {
    id: NodeId,
    payload: Option<P>,
    edges: Vec<Edge<L>>,
}

impl<P, L> Node<P, L> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge<L>] {
        &self.edges
    }

    /// Release the edge list, then hand the payload back.
    pub fn into_payload(mut self) -> Option<P> {
        self.edges.clear();
        self.payload.take()
    }
}

/// Insertion-ordered directed graph with at most one edge per ordered node pair.
///
/// Every lookup by id is a linear scan over the node collection, so `node`,
/// `add_edge` and friends are O(V). City maps are small enough that this is
/// cheaper than keeping an index in sync with `remove_node` compaction.
#[derive(Debug, Clone)]
pub struct Graph<P, L> {
    nodes: Vec<Node<P, L>>,
    edge_count: usize,
}

impl<P, L> Default for Graph<P, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L> Graph<P, L> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(INITIAL_NODE_CAPACITY),
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P, L>> {
        self.nodes.iter()
    }

    /// Position of `id` in the node collection.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn node_at(&self, index: usize) -> Option<&Node<P, L>> {
        self.nodes.get(index)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<P, L>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Outgoing edges of `id`, or an empty slice when the node is absent.
    pub fn neighbours(&self, id: NodeId) -> &[Edge<L>] {
        self.node(id).map(|node| node.edges.as_slice()).unwrap_or(&[])
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge<L>> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    /// Insert a node at the end of the collection.
    pub fn add_node(&mut self, id: NodeId, payload: Option<P>) -> Result<&Node<P, L>, GraphError> {
        if self.contains(id) {
            return Err(GraphError::DuplicateNode { id });
        }

        if self.nodes.len() == self.nodes.capacity() {
            let additional = self.nodes.capacity().max(1);
            self.nodes.try_reserve_exact(additional)?;
        }

        let index = self.nodes.len();
        self.nodes.push(Node {
            id,
            payload,
            edges: Vec::new(),
        });
        Ok(&self.nodes[index])
    }

    /// Insert a directed edge `from -> to`.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        label: L,
    ) -> Result<&Edge<L>, GraphError> {
        let from_index = self
            .index_of(from)
            .ok_or(GraphError::MissingNode { id: from })?;
        if !self.contains(to) {
            return Err(GraphError::MissingNode { id: to });
        }

        let edges = &mut self.nodes[from_index].edges;
        if edges.iter().any(|edge| edge.target == to) {
            return Err(GraphError::DuplicateEdge { from, to });
        }

        edges.try_reserve(1)?;
        edges.push(Edge {
            target: to,
            weight,
            label,
        });
        self.edge_count += 1;

        let last = edges.len() - 1;
        Ok(&self.nodes[from_index].edges[last])
    }

    /// Remove a node along with its outgoing edges and every edge that targets
    /// it. Remaining nodes keep their relative order.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node<P, L>> {
        let index = self.index_of(id)?;
        let mut removed = self.nodes.remove(index);

        self.edge_count -= removed.edges.len();
        removed.edges.clear();

        for node in &mut self.nodes {
            let before = node.edges.len();
            node.edges.retain(|edge| edge.target != id);
            self.edge_count -= before - node.edges.len();
        }

        Some(removed)
    }

    /// Remove the directed edge `from -> to`.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Option<Edge<L>> {
        let index = self.index_of(from)?;
        let edges = &mut self.nodes[index].edges;
        let position = edges.iter().position(|edge| edge.target == to)?;
        self.edge_count -= 1;
        Some(edges.remove(position))
    }

    /// Tear the graph down node by node: each node's edge list is released,
    /// then its payload is handed back to the caller, then the node itself is
    /// dropped.
    pub fn dismantle(self) -> Vec<(NodeId, Option<P>)> {
        self.nodes
            .into_iter()
            .map(|node| (node.id, node.into_payload()))
            .collect()
    }
}
