use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    config::Config,
    planner::graph::{Edge, RouteGraph},
    repository::Repository,
    shared::geo::Distance,
};

/// Cost of reaching a node.
///
/// Ordered by transfers first, then by `rank_cost`. `rank_cost` carries the
/// short-route penalty and only guides the search; `distance` is the true
/// ridden distance and is what gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Label {
    pub transfers: u32,
    pub rank_cost: f64,
    pub distance: Distance,
}

impl Label {
    fn rank(&self, other: &Self) -> Ordering {
        self.transfers
            .cmp(&other.transfers)
            .then_with(|| self.rank_cost.total_cmp(&other.rank_cost))
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    node: u32,
    label: Label,
}

impl Eq for QueueEntry {}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for QueueEntry {
    // Reversed so the BinaryHeap pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .label
            .rank(&self.label)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Settled a node at the requested destination.
    Destination(u32),
    /// Never reached the destination; this is the first terminal node settled.
    Terminal(u32),
}

/// Transfer-capped Dijkstra over a [`RouteGraph`].
pub struct Search<'a> {
    repository: &'a Repository,
    graph: &'a RouteGraph,
    config: &'a Config,
    heap: BinaryHeap<QueueEntry>,
    best: Vec<Option<Label>>,
    parents: Vec<Option<(u32, Edge)>>,
    settled: Vec<bool>,
}

impl<'a> Search<'a> {
    pub fn new(repository: &'a Repository, graph: &'a RouteGraph) -> Self {
        Self {
            repository,
            graph,
            config: repository.config(),
            heap: BinaryHeap::new(),
            best: vec![None; graph.len()],
            parents: vec![None; graph.len()],
            settled: vec![false; graph.len()],
        }
    }

    /// Seeds every node at `from` and searches until a node at `to` is settled.
    pub fn run(&mut self, from: u32, to: u32) -> Option<Outcome> {
        for &node in self.graph.nodes_at_stop(from) {
            let label = Label::default();
            self.best[node as usize] = Some(label);
            self.heap.push(QueueEntry { node, label });
        }

        let mut fallback: Option<u32> = None;
        while let Some(QueueEntry { node, label }) = self.heap.pop() {
            if self.settled[node as usize] {
                continue;
            }
            self.settled[node as usize] = true;

            let stop_idx = self.graph.node(node).stop_idx;
            if stop_idx == to {
                return Some(Outcome::Destination(node));
            }
            if fallback.is_none() && stop_idx != from && self.repository.is_terminal(stop_idx) {
                fallback = Some(node);
            }

            for edge in self.graph.edges(node) {
                self.relax(node, &label, edge);
            }
        }
        fallback.map(Outcome::Terminal)
    }

    fn relax(&mut self, from: u32, label: &Label, edge: &Edge) {
        let to = edge.to();
        if self.settled[to as usize] {
            return;
        }
        let transfers = label.transfers + u32::from(edge.is_transfer());
        if transfers > self.config.max_transfers {
            return;
        }

        let route = &self.repository.routes[self.graph.node(to).route_idx as usize];
        let penalty = if route.len() < self.config.short_route_length {
            self.config.short_route_penalty
        } else {
            0.0
        };
        let next = Label {
            transfers,
            rank_cost: label.rank_cost + edge.distance().as_kilometers() + penalty,
            distance: label.distance + edge.distance(),
        };

        let improves = self.best[to as usize]
            .is_none_or(|best| next.rank(&best) == Ordering::Less);
        if improves {
            self.best[to as usize] = Some(next);
            self.parents[to as usize] = Some((from, *edge));
            self.heap.push(QueueEntry {
                node: to,
                label: next,
            });
        }
    }

    pub fn label(&self, node: u32) -> Option<Label> {
        self.best[node as usize]
    }

    /// Nodes from a seed to `node`, paired with the edge used to enter each.
    /// The seed has no entering edge.
    pub fn path(&self, node: u32) -> Vec<(u32, Option<Edge>)> {
        let mut path = vec![];
        let mut current = node;
        loop {
            match self.parents[current as usize] {
                Some((parent, edge)) => {
                    path.push((current, Some(edge)));
                    current = parent;
                }
                None => {
                    path.push((current, None));
                    break;
                }
            }
        }
        path.reverse();
        path
    }
}
