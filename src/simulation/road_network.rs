//! Road network graph
//!
//! Append-only directed graph of intersections. Nodes are created on demand
//! the first time an intersection is named.

use log::debug;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::{IntersectionId, SimRoad};

/// Edge data for the road network graph
#[derive(Debug, Clone, Copy)]
pub struct RoadEdge {
    pub travel_time: i64,
}

/// Directed weighted graph of intersections backed by petgraph
#[derive(Default)]
pub struct SimRoadNetwork {
    /// The underlying petgraph directed graph (one-way roads)
    graph: DiGraph<IntersectionId, RoadEdge>,

    /// Maps intersection IDs to their node indices in the graph
    intersection_to_node: HashMap<IntersectionId, NodeIndex>,
}

impl SimRoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection to the network graph, returning its node
    ///
    /// Existing intersections are left untouched.
    pub fn ensure_intersection(&mut self, intersection: &str) -> NodeIndex {
        if let Some(node) = self.intersection_to_node.get(intersection) {
            return *node;
        }

        let id = IntersectionId::from(intersection);
        let node = self.graph.add_node(id.clone());
        self.intersection_to_node.insert(id, node);
        debug!("Registered intersection {}", intersection);
        node
    }

    /// Adds a one-way road, creating both endpoints if needed
    ///
    /// Parallel roads between the same pair are kept side by side.
    pub fn add_road(&mut self, from: &str, to: &str, travel_time: i64) {
        let start_node = self.ensure_intersection(from);
        let end_node = self.ensure_intersection(to);
        self.graph
            .add_edge(start_node, end_node, RoadEdge { travel_time });
        debug!("Added road {} -> {} ({} min)", from, to, travel_time);
    }

    /// Outgoing roads of an intersection in the order they were added
    ///
    /// Unknown intersections simply have no roads.
    pub fn outgoing_roads(&self, intersection: &str) -> Vec<SimRoad> {
        let Some(node) = self.intersection_to_node.get(intersection) else {
            return Vec::new();
        };

        // petgraph walks adjacency newest-first; edge indices grow with
        // insertion and the graph never removes edges.
        let mut edges: Vec<_> = self.graph.edges(*node).collect();
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .map(|edge| self.road_from_edge(edge))
            .collect()
    }

    /// The first road added out of an intersection, if any
    pub fn first_road(&self, intersection: &str) -> Option<SimRoad> {
        let node = self.intersection_to_node.get(intersection)?;
        let edge = self.graph.edges(*node).min_by_key(|edge| edge.id())?;
        Some(self.road_from_edge(edge))
    }

    fn road_from_edge(&self, edge: EdgeReference<'_, RoadEdge>) -> SimRoad {
        SimRoad {
            from: self.graph[edge.source()].clone(),
            to: self.graph[edge.target()].clone(),
            travel_time: edge.weight().travel_time,
        }
    }

    pub fn contains(&self, intersection: &str) -> bool {
        self.intersection_to_node.contains_key(intersection)
    }

    /// All intersections in the order they were first seen
    pub fn intersections(&self) -> impl Iterator<Item = &IntersectionId> {
        self.graph.node_weights()
    }

    /// Get number of roads
    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get number of intersections
    pub fn intersection_count(&self) -> usize {
        self.graph.node_count()
    }
}
