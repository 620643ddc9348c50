//! Routable-node graph built over the device's raw [`RoutingGraph`].
//!
//! The device model (`aion_arch::types::RoutingGraph`) only knows about
//! wires and PIPs. The router needs a richer view: each wire becomes an
//! [`RNode`] tagged with a [`NodeKind`] (is this a site pin feed, a
//! pass-through wire, a bounce point?), with present/historical congestion
//! state and a lazily-computed, memoized child list. [`RoutingGraphView`]
//! owns that enrichment without mutating the underlying device graph.

use aion_arch::ids::WireId;
use aion_arch::types::{IntentCode, RoutingGraph};
use std::collections::HashMap;

/// The routable-node role a wire plays in the interconnect fabric.
///
/// Distinguishes "this is just a pass-through wire" from "this is where a
/// connection actually starts or ends," which the search uses to decide
/// whether a node may be expanded further or must terminate a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An ordinary interconnect wire; may be expanded in either direction.
    Wire,
    /// A wire that feeds into a site pin (the typical connection sink).
    PinFeedIn,
    /// A wire fed from a site pin (the typical connection source).
    PinFeedOut,
    /// A short wire that bounces back into the switchbox to reach a site
    /// pin not directly reachable from the main interconnect.
    PinBounce,
}

impl NodeKind {
    fn from_intent(intent: IntentCode, is_terminal_in: bool, is_terminal_out: bool) -> Self {
        match intent {
            IntentCode::PinBounce => NodeKind::PinBounce,
            IntentCode::PinFeed if is_terminal_in => NodeKind::PinFeedIn,
            IntentCode::PinFeed if is_terminal_out => NodeKind::PinFeedOut,
            IntentCode::PinFeed => NodeKind::PinFeedIn,
            _ => NodeKind::Wire,
        }
    }
}

/// A routable node: one wire plus the router's negotiated-congestion state
/// and its memoized child list.
#[derive(Debug, Clone)]
pub struct RNode {
    /// The device wire this node wraps.
    pub wire: WireId,
    /// The routable role this node plays.
    pub kind: NodeKind,
    /// Present-congestion cost contribution (PathFinder `present_cost`).
    pub present_cost: f64,
    /// Accumulated historical-congestion cost (PathFinder `historical_cost`).
    pub historical_cost: f64,
    /// Nets currently occupying (using) this node.
    pub users: Vec<crate::ids::PnrNetId>,
    /// Memoized downhill children, computed on first expansion.
    pub children: Option<Vec<WireId>>,
}

impl RNode {
    fn new(wire: WireId, kind: NodeKind) -> Self {
        Self {
            wire,
            kind,
            present_cost: 0.0,
            historical_cost: 1.0,
            users: Vec::new(),
            children: None,
        }
    }

    /// Number of distinct nets sharing this node right now.
    pub fn occupancy(&self) -> usize {
        self.users.len()
    }
}

/// Enriched, memoizing view over a device [`RoutingGraph`] for routing.
///
/// Owns an `RNode` for every wire touched so far (interned lazily by
/// [`RoutingGraphView::node`]/`node_mut`) plus the raw device graph it
/// reads PIP connectivity from. Dropped at the end of a `route()` call —
/// there is no global/static instance.
pub struct RoutingGraphView<'a> {
    graph: &'a RoutingGraph,
    pool: Vec<RNode>,
    index: HashMap<WireId, usize>,
}

impl<'a> RoutingGraphView<'a> {
    /// Creates a view over `graph` with an empty node pool.
    pub fn new(graph: &'a RoutingGraph) -> Self {
        Self {
            graph,
            pool: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Interns `wire`, creating its `RNode` on first touch, and returns its
    /// pool index (the "global rnode id").
    pub fn intern(&mut self, wire: WireId) -> usize {
        if let Some(&idx) = self.index.get(&wire) {
            return idx;
        }
        let intent = self.graph.intent_code(wire);
        let is_downhill_empty = self.graph.downhill(wire).is_empty();
        let is_uphill_empty = self.graph.uphill(wire).is_empty();
        let kind = NodeKind::from_intent(intent, is_downhill_empty, is_uphill_empty);
        let idx = self.pool.len();
        self.pool.push(RNode::new(wire, kind));
        self.index.insert(wire, idx);
        idx
    }

    /// Returns the `RNode` for `wire` if it has been interned.
    pub fn get(&self, wire: WireId) -> Option<&RNode> {
        self.index.get(&wire).map(|&i| &self.pool[i])
    }

    /// Returns a mutable `RNode` for `wire`, interning it first if needed.
    pub fn get_mut(&mut self, wire: WireId) -> &mut RNode {
        let idx = self.intern(wire);
        &mut self.pool[idx]
    }

    /// Returns the children (downhill wires) of `wire`, computing and
    /// memoizing them on first call. Route-through PIPs whose destination
    /// would re-enter a node already marked [`NodeKind::PinBounce`] without
    /// `use_u_turn_nodes` are filtered by the caller (`search`), not here —
    /// this layer only exposes raw connectivity.
    pub fn children(&mut self, wire: WireId) -> Vec<WireId> {
        let idx = self.intern(wire);
        if let Some(children) = &self.pool[idx].children {
            return children.clone();
        }
        let children = self.graph.downhill(wire);
        self.pool[idx].children = Some(children.clone());
        children
    }

    /// Returns the PIP delay between two wires, or `Delay::ZERO` if none
    /// connects them.
    pub fn pip_delay(&self, from: WireId, to: WireId) -> aion_arch::types::Delay {
        self.graph
            .pips_between(from, to)
            .map(|p| p.delay)
            .unwrap_or(aion_arch::types::Delay::ZERO)
    }

    /// Returns whether the PIP from `from` to `to` is a route-through.
    pub fn is_route_thru(&self, from: WireId, to: WireId) -> bool {
        self.graph.is_route_thru(from, to)
    }

    /// Returns the INT-tile coordinates of `wire`.
    pub fn tile_of(&self, wire: WireId) -> (i32, i32) {
        self.graph.tile_of(wire)
    }

    /// Returns the intent code of `wire`.
    pub fn intent_code(&self, wire: WireId) -> IntentCode {
        self.graph.intent_code(wire)
    }

    /// Returns the span (in INT tiles) of `wire`.
    pub fn length_of(&self, wire: WireId) -> u32 {
        self.graph.length_of(wire)
    }

    /// Marks `net` as a user of `wire`'s node, bumping its present cost.
    pub fn claim(&mut self, wire: WireId, net: crate::ids::PnrNetId) {
        let node = self.get_mut(wire);
        if !node.users.contains(&net) {
            node.users.push(net);
        }
    }

    /// Removes `net` from `wire`'s node's user list (rip-up).
    pub fn release(&mut self, wire: WireId, net: crate::ids::PnrNetId) {
        let node = self.get_mut(wire);
        node.users.retain(|&n| n != net);
    }

    /// Returns every interned node whose occupancy exceeds 1 (overused).
    pub fn overused_nodes(&self) -> Vec<WireId> {
        self.pool
            .iter()
            .filter(|n| n.occupancy() > 1)
            .map(|n| n.wire)
            .collect()
    }

    /// Number of nodes interned so far.
    pub fn node_count(&self) -> usize {
        self.pool.len()
    }

    /// Mutable iterator over every interned node, for the per-iteration
    /// present/historical cost update (`CostModel::update_cost_factors`).
    pub fn all_nodes_mut(&mut self) -> impl Iterator<Item = &mut RNode> {
        self.pool.iter_mut()
    }
}
