//! Negotiated-congestion cost model.
//!
//! Implements the PathFinder cost formula: a node's cost combines its base
//! (wirelength) cost, present congestion, accumulated historical congestion,
//! a same-net sharing discount, and — when timing-driven — a bias toward the
//! connection's delay/criticality. `present_cost`/`historical_cost` live on
//! [`crate::routing::graph::RNode`]; this module is the pure function that
//! turns those into a search weight.

use crate::ids::PnrNetId;
use crate::routing::config::RouterConfig;
use crate::routing::graph::RNode;

/// Computes PathFinder-style node and path costs from a [`RouterConfig`].
#[derive(Debug, Clone)]
pub struct CostModel {
    present_factor: f64,
    historical_factor: f64,
    wl_weight: f64,
    timing_weight: f64,
    criticality_exponent: f64,
    share_exponent: f64,
    timing_driven: bool,
}

impl CostModel {
    /// Creates a cost model from `config`, starting present cost at its
    /// configured initial value.
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            present_factor: config.initial_present_factor,
            historical_factor: config.historical_factor,
            wl_weight: config.wl_weight,
            timing_weight: config.timing_weight,
            criticality_exponent: config.criticality_exponent,
            share_exponent: config.share_exponent,
            timing_driven: config.timing_driven,
        }
    }

    /// Current present-congestion factor (grows each iteration via
    /// [`CostModel::grow_present_factor`]).
    pub fn present_factor(&self) -> f64 {
        self.present_factor
    }

    /// Multiplies the present-congestion factor by `multiplier`, called
    /// once per router iteration (iteration 2 onward).
    pub fn grow_present_factor(&mut self, multiplier: f64) {
        self.present_factor *= multiplier;
    }

    /// Criticality as seen by the cost model: the connection's real value
    /// when timing-driven, zero (pure congestion routing) otherwise.
    fn effective_criticality(&self, criticality: f64) -> f64 {
        if self.timing_driven {
            criticality.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Sharing factor: a node already used by `net`'s own fan-out is
    /// *cheaper* to reuse (the discount shrinks as the connection gets more
    /// critical, since critical connections shouldn't detour through a
    /// shared node just to save wirelength). A node with no same-net user
    /// gets no discount — its cost is driven by `present_cost` alone.
    pub fn sharing_factor(&self, node: &RNode, net: PnrNetId, criticality: f64) -> f64 {
        let crit = self.effective_criticality(criticality);
        let share_weight = (1.0 - crit).powf(self.share_exponent);
        let same_net_user = if node.users.contains(&net) { 1.0 } else { 0.0 };
        1.0 + share_weight * same_net_user
    }

    /// Present-congestion cost contribution for `net` expanding into
    /// `node`. A same-net user pays only for its own overuse; any other
    /// node reads its cached `present_cost` field (set once per iteration
    /// by [`CostModel::update_cost_factors`]).
    pub fn present_cost(&self, node: &RNode, net: PnrNetId) -> f64 {
        if node.users.contains(&net) {
            let overuse = (node.occupancy() as f64 - 1.0).max(0.0);
            1.0 + overuse * self.present_factor
        } else {
            1.0 + self.present_factor * node.present_cost
        }
    }

    /// Base per-node cost before congestion: `wl_weight` scaled by the
    /// node's wire length (longer wires are expensive in raw wirelength
    /// terms but amortize better over long detours).
    pub fn base_cost(&self, wire_length: u32) -> f64 {
        self.wl_weight * (1.0 + wire_length as f64)
    }

    /// Full node cost for expanding `node` via a wire of `wire_length`, for
    /// `net` at the given connection `criticality`, with `delay_ps` the
    /// estimated delay (including any cross-long-wire setup penalty) of the
    /// step into `node`. Congestion cost is divided by the sharing factor so
    /// same-net reuse beats an equally congested node used by other nets;
    /// the timing bias is additive, scaling with delay and criticality.
    pub fn node_cost(
        &self,
        node: &RNode,
        wire_length: u32,
        criticality: f64,
        net: PnrNetId,
        delay_ps: f64,
    ) -> f64 {
        let crit = self.effective_criticality(criticality);
        let base = self.base_cost(wire_length);
        let sf = self.sharing_factor(node, net, criticality);
        let congestion = self.present_cost(node, net) + self.historical_factor * node.historical_cost;
        let timing_bias = self.timing_weight * crit.powf(self.criticality_exponent) * delay_ps / 100.0;
        base * congestion / sf + timing_bias
    }

    /// Per-iteration present/historical cost update for one node (PathFinder
    /// `update_cost_factors`): an uncontested node's present cost settles to
    /// `1 + present_factor`; an overused node pays more present cost in
    /// proportion to its overuse and accumulates historical cost so it stays
    /// expensive even after the contention clears.
    pub fn update_cost_factors(&self, node: &mut RNode) {
        let overuse = node.occupancy() as f64 - 1.0;
        if overuse <= 0.0 {
            node.present_cost = 1.0 + self.present_factor;
        } else {
            node.present_cost = 1.0 + (overuse + 1.0) * self.present_factor;
            node.historical_cost += overuse * self.historical_factor;
        }
    }
}
