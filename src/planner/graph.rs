use std::collections::{BTreeSet, HashMap};

use crate::{repository::Repository, shared::geo::Distance};

/// Being at `stop_idx` while riding `route_idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub stop_idx: u32,
    pub route_idx: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Between consecutive stops of one route.
    Ride { to: u32, distance: Distance },
    /// Between two routes at the same physical stop. Free, but counts as a change.
    Transfer { to: u32 },
}

impl Edge {
    pub fn to(&self) -> u32 {
        match self {
            Edge::Ride { to, .. } | Edge::Transfer { to } => *to,
        }
    }

    pub fn distance(&self) -> Distance {
        match self {
            Edge::Ride { distance, .. } => *distance,
            Edge::Transfer { .. } => Distance::ZERO,
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Edge::Transfer { .. })
    }
}

/// Stop-level graph over a pruned set of routes.
#[derive(Debug, Default)]
pub struct RouteGraph {
    pub nodes: Vec<Node>,
    edges: Vec<Vec<Edge>>,
    node_lookup: HashMap<Node, u32>,
    stop_to_nodes: HashMap<u32, Vec<u32>>,
}

impl RouteGraph {
    pub fn build(repository: &Repository, routes: &BTreeSet<u32>) -> Self {
        let mut graph = Self::default();
        for &route_idx in routes.iter() {
            let visits: Vec<_> = repository.visits_by_route_idx(route_idx).collect();
            for visit in visits.iter() {
                graph.insert_node(Node {
                    stop_idx: visit.stop_idx,
                    route_idx,
                });
            }
            for pair in visits.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.stop_idx == b.stop_idx {
                    continue;
                }
                let from = graph.node_lookup[&Node {
                    stop_idx: a.stop_idx,
                    route_idx,
                }];
                let to = graph.node_lookup[&Node {
                    stop_idx: b.stop_idx,
                    route_idx,
                }];
                let distance = a.coordinate.great_circle_distance(&b.coordinate);
                graph.edges[from as usize].push(Edge::Ride { to, distance });
                graph.edges[to as usize].push(Edge::Ride { to: from, distance });
            }
        }

        for nodes in graph.stop_to_nodes.values() {
            for &from in nodes.iter() {
                for &to in nodes.iter().filter(|&&to| to != from) {
                    graph.edges[from as usize].push(Edge::Transfer { to });
                }
            }
        }
        graph
    }

    fn insert_node(&mut self, node: Node) -> u32 {
        if let Some(index) = self.node_lookup.get(&node) {
            return *index;
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.edges.push(Vec::new());
        self.node_lookup.insert(node, index);
        self.stop_to_nodes
            .entry(node.stop_idx)
            .or_default()
            .push(index);
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn node(&self, index: u32) -> Node {
        self.nodes[index as usize]
    }

    pub fn edges(&self, index: u32) -> &[Edge] {
        &self.edges[index as usize]
    }

    /// Every node at the stop, one per route calling there.
    pub fn nodes_at_stop(&self, stop_idx: u32) -> &[u32] {
        self.stop_to_nodes
            .get(&stop_idx)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
