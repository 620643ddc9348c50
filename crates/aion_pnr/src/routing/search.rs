//! A* path search over the routable-node graph.
//!
//! One connection at a time: expand from the source wire, guided by the
//! [`CostModel`]'s congestion-aware cost plus a Manhattan-distance heuristic
//! to the sink, respecting the connection's bounding box, the node-kind
//! expansion rules, and (when `soft_preserve` is on) the current
//! [`PreservationMap`]. Ties in the priority queue are broken by insertion
//! order so two runs over the same netlist always explore nodes in the same
//! sequence.

use crate::adapters::DelayEstimator;
use crate::routing::config::RouterConfig;
use crate::routing::cost::CostModel;
use crate::routing::graph::{NodeKind, RoutingGraphView};
use crate::routing::net::Connection;
use crate::routing::preserve::PreservationMap;
use aion_arch::ids::WireId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Raw-delay threshold (picoseconds) above which a PIP is treated as a
/// U-turn/cross-RCLK sentinel and masked out of expansion, per
/// `RouterConfig::mask_cross_rclk`.
const CROSS_RCLK_DELAY_SENTINEL_PS: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    total_cost: f64,
    sequence: u64,
    wire: WireId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; break floating-point ties by insertion
        // sequence so exploration order is deterministic across runs.
        other
            .total_cost
            .partial_cmp(&self.total_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a single connection's path search.
pub enum SearchOutcome {
    /// A path was found; wires are ordered source to sink (inclusive).
    Found(Vec<WireId>),
    /// The search exhausted its frontier without reaching the sink.
    Unroutable,
}

/// Runs A* search for individual connections over a [`RoutingGraphView`].
pub struct PathSearch<'g, 'v> {
    graph: &'v mut RoutingGraphView<'g>,
    config: &'v RouterConfig,
    delay_estimator: &'v dyn DelayEstimator,
    preserve: &'v PreservationMap,
}

impl<'g, 'v> PathSearch<'g, 'v> {
    /// Creates a path search bound to a graph view, router configuration,
    /// delay estimator, and the current preservation map.
    pub fn new(
        graph: &'v mut RoutingGraphView<'g>,
        config: &'v RouterConfig,
        delay_estimator: &'v dyn DelayEstimator,
        preserve: &'v PreservationMap,
    ) -> Self {
        Self { graph, config, delay_estimator, preserve }
    }

    fn heuristic(&self, from: WireId, to: WireId) -> f64 {
        let (fx, fy) = self.graph.tile_of(from);
        let (tx, ty) = self.graph.tile_of(to);
        ((fx - tx).unsigned_abs() + (fy - ty).unsigned_abs()) as f64
    }

    /// Finds a path for `connection`, given the current [`CostModel`].
    pub fn find(&mut self, connection: &Connection, cost_model: &CostModel) -> SearchOutcome {
        let source = connection.source_wire;
        let sink = connection.sink_wire;

        let mut open = BinaryHeap::new();
        let mut best_cost: HashMap<WireId, f64> = HashMap::new();
        let mut prev: HashMap<WireId, WireId> = HashMap::new();
        let mut sequence: u64 = 0;

        best_cost.insert(source, 0.0);
        open.push(QueueEntry {
            total_cost: self.heuristic(source, sink),
            sequence,
            wire: source,
        });

        while let Some(entry) = open.pop() {
            if entry.wire == sink {
                return SearchOutcome::Found(reconstruct(&prev, source, sink));
            }
            let current_g = *best_cost.get(&entry.wire).unwrap_or(&f64::INFINITY);

            let children = self.graph.children(entry.wire);
            for child in children {
                if child != sink && self.config.soft_preserve && self.preserve.blocks(child, connection.net) {
                    continue;
                }

                let raw_delay_ps = self.delay_estimator.delay_of(entry.wire, child).typ_ns * 1_000.0;
                if self.config.mask_cross_rclk && raw_delay_ps > CROSS_RCLK_DELAY_SENTINEL_PS {
                    continue;
                }

                if !self.config.use_bounding_box
                    || connection.in_bbox(
                        self.graph.tile_of(child).0,
                        self.graph.tile_of(child).1,
                    )
                    || child == sink
                {
                    if !self.config.use_u_turn_nodes
                        && matches!(
                            self.graph.get(child).map(|n| n.kind),
                            Some(NodeKind::PinBounce)
                        )
                        && child != sink
                    {
                        continue;
                    }
                    if self.graph.is_route_thru(entry.wire, child)
                        && matches!(
                            self.graph.get(child).map(|n| n.kind),
                            Some(NodeKind::PinFeedIn)
                        )
                        && child != sink
                    {
                        // Route-throughs into a sink-only pin feed are
                        // never useful mid-path.
                        continue;
                    }

                    let extra = if self.delay_estimator.is_long(entry.wire) && self.delay_estimator.is_long(child) {
                        self.delay_estimator.extra_delay().typ_ns * 1_000.0
                    } else {
                        0.0
                    };
                    let wire_length = self.graph.length_of(child);
                    let node = self.graph.get_mut(child);
                    let step_cost = cost_model.node_cost(
                        node,
                        wire_length,
                        connection.criticality,
                        connection.net,
                        raw_delay_ps + extra,
                    );
                    let tentative = current_g + step_cost;

                    if tentative < *best_cost.get(&child).unwrap_or(&f64::INFINITY) {
                        best_cost.insert(child, tentative);
                        prev.insert(child, entry.wire);
                        sequence += 1;
                        open.push(QueueEntry {
                            total_cost: tentative + self.heuristic(child, sink),
                            sequence,
                            wire: child,
                        });
                    }
                }
            }
        }

        SearchOutcome::Unroutable
    }
}

fn reconstruct(prev: &HashMap<WireId, WireId>, source: WireId, sink: WireId) -> Vec<WireId> {
    let mut path = vec![sink];
    let mut cur = sink;
    while cur != source {
        match prev.get(&cur) {
            Some(&p) => {
                path.push(p);
                cur = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{PnrNetId, PnrPinId};
    use crate::routing::graph::RoutingGraphView;
    use aion_arch::ids::PipId;
    use aion_arch::types::{Delay, Pip, RoutingGraph, Wire};

    struct ZeroDelay;
    impl DelayEstimator for ZeroDelay {
        fn delay_of(&self, _from: WireId, _to: WireId) -> Delay {
            Delay::ZERO
        }
        fn is_long(&self, _wire: WireId) -> bool {
            false
        }
        fn extra_delay(&self) -> Delay {
            Delay::ZERO
        }
    }

    fn linear_graph() -> RoutingGraph {
        RoutingGraph {
            wires: vec![
                Wire::local(WireId::from_raw(0), "a", 0, 0),
                Wire::local(WireId::from_raw(1), "b", 1, 0),
                Wire::local(WireId::from_raw(2), "c", 2, 0),
            ],
            pips: vec![
                Pip::new(PipId::from_raw(0), WireId::from_raw(0), WireId::from_raw(1), Delay::ZERO),
                Pip::new(PipId::from_raw(1), WireId::from_raw(1), WireId::from_raw(2), Delay::ZERO),
            ],
        }
    }

    fn connection(source: WireId, sink: WireId) -> Connection {
        Connection::new(
            PnrNetId::from_raw(0),
            PnrPinId::from_raw(0),
            PnrPinId::from_raw(1),
            source,
            sink,
            10,
        )
    }

    #[test]
    fn finds_direct_path() {
        let g = linear_graph();
        let cfg = RouterConfig::default();
        let mut view = RoutingGraphView::new(&g);
        let mut conn = connection(WireId::from_raw(0), WireId::from_raw(2));
        conn.set_bbox_from_tiles((0, 0), (2, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let preserve = PreservationMap::new();
        let mut search = PathSearch::new(&mut view, &cfg, &estimator, &preserve);
        match search.find(&conn, &cost_model) {
            SearchOutcome::Found(path) => {
                assert_eq!(path.first(), Some(&WireId::from_raw(0)));
                assert_eq!(path.last(), Some(&WireId::from_raw(2)));
            }
            SearchOutcome::Unroutable => panic!("expected a path"),
        }
    }

    #[test]
    fn unreachable_sink_is_unroutable() {
        let g = linear_graph();
        let cfg = RouterConfig::default();
        let mut view = RoutingGraphView::new(&g);
        let mut conn = connection(WireId::from_raw(2), WireId::from_raw(0));
        conn.set_bbox_from_tiles((2, 0), (0, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let preserve = PreservationMap::new();
        let mut search = PathSearch::new(&mut view, &cfg, &estimator, &preserve);
        assert!(matches!(
            search.find(&conn, &cost_model),
            SearchOutcome::Unroutable
        ));
    }

    #[test]
    fn congested_node_raises_cost_but_still_routes() {
        let g = linear_graph();
        let cfg = RouterConfig::default();
        let mut view = RoutingGraphView::new(&g);
        view.claim(WireId::from_raw(1), PnrNetId::from_raw(5));
        view.claim(WireId::from_raw(1), PnrNetId::from_raw(6));
        let mut conn = connection(WireId::from_raw(0), WireId::from_raw(2));
        conn.set_bbox_from_tiles((0, 0), (2, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let preserve = PreservationMap::new();
        let mut search = PathSearch::new(&mut view, &cfg, &estimator, &preserve);
        assert!(matches!(
            search.find(&conn, &cost_model),
            SearchOutcome::Found(_)
        ));
    }

    #[test]
    fn preserved_wire_blocks_other_nets() {
        let g = linear_graph();
        let mut cfg = RouterConfig::default();
        cfg.soft_preserve = true;
        let mut view = RoutingGraphView::new(&g);
        let mut conn = connection(WireId::from_raw(0), WireId::from_raw(2));
        conn.set_bbox_from_tiles((0, 0), (2, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let mut preserve = PreservationMap::new();
        preserve.preserve(PnrNetId::from_raw(9), [WireId::from_raw(1)]);
        let mut search = PathSearch::new(&mut view, &cfg, &estimator, &preserve);
        assert!(matches!(
            search.find(&conn, &cost_model),
            SearchOutcome::Unroutable
        ));
    }

    #[test]
    fn own_net_preservation_does_not_block_itself() {
        let g = linear_graph();
        let mut cfg = RouterConfig::default();
        cfg.soft_preserve = true;
        let mut view = RoutingGraphView::new(&g);
        let mut conn = connection(WireId::from_raw(0), WireId::from_raw(2));
        conn.set_bbox_from_tiles((0, 0), (2, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let mut preserve = PreservationMap::new();
        preserve.preserve(conn.net, [WireId::from_raw(1)]);
        let mut search = PathSearch::new(&mut view, &cfg, &estimator, &preserve);
        assert!(matches!(
            search.find(&conn, &cost_model),
            SearchOutcome::Found(_)
        ));
    }

    #[test]
    fn cross_rclk_sentinel_masks_high_delay_pip() {
        let g = RoutingGraph {
            wires: linear_graph().wires,
            pips: vec![
                Pip::new(
                    PipId::from_raw(0),
                    WireId::from_raw(0),
                    WireId::from_raw(1),
                    Delay::new(11.0, 11.0, 11.0),
                ),
                Pip::new(PipId::from_raw(1), WireId::from_raw(1), WireId::from_raw(2), Delay::ZERO),
            ],
        };
        let cfg = RouterConfig::default();
        let mut view = RoutingGraphView::new(&g);
        let mut conn = connection(WireId::from_raw(0), WireId::from_raw(2));
        conn.set_bbox_from_tiles((0, 0), (2, 0), cfg.bounding_box_extension);
        let cost_model = CostModel::new(&cfg);
        let estimator = ZeroDelay;
        let preserve = PreservationMap::new();
        // ZeroDelay always returns Delay::ZERO regardless of the graph's
        // own PIP delay, so exercise the real arch-backed estimator instead.
        struct ArchLikeDelay<'a>(&'a RoutingGraph);
        impl<'a> DelayEstimator for ArchLikeDelay<'a> {
            fn delay_of(&self, from: WireId, to: WireId) -> Delay {
                self.0.pips_between(from, to).map(|p| p.delay).unwrap_or(Delay::ZERO)
            }
            fn is_long(&self, _wire: WireId) -> bool {
                false
            }
            fn extra_delay(&self) -> Delay {
                Delay::ZERO
            }
        }
        let arch_estimator = ArchLikeDelay(&g);
        let mut search = PathSearch::new(&mut view, &cfg, &arch_estimator, &preserve);
        assert!(matches!(
            search.find(&conn, &cost_model),
            SearchOutcome::Unroutable
        ));
        let _ = estimator;
    }
}
