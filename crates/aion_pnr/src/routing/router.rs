//! The negotiated-congestion router loop.
//!
//! Implements rip-up-and-reroute: route every connection once, then repeat
//! — ripping up and rerouting only the connections that still need it
//! (newly congested, never routed, or probing for a cheaper path once
//! critical), growing the present-congestion penalty each pass — until
//! either no node is overused (converged) or the iteration budget runs out.
//! When `soft_preserve` is set, already-legal routes keep their wires
//! claimed in a [`PreservationMap`] across iterations instead of being
//! ripped up wholesale; a later connection that needs one of those wires
//! rips up the preserving net instead of failing to route around it.

use crate::adapters::DelayEstimator;
use crate::ids::PnrNetId;
use crate::routing::config::RouterConfig;
use crate::routing::cost::CostModel;
use crate::routing::graph::RoutingGraphView;
use crate::routing::net::NetWrapper;
use crate::routing::preserve::PreservationMap;
use crate::routing::search::{PathSearch, SearchOutcome};
use aion_diagnostics::{Category, Diagnostic, DiagnosticSink};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Outcome of a full router run.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteReport {
    /// Every connection routed with no overused nodes.
    Converged {
        /// Number of rip-up-and-reroute iterations performed.
        iterations: u32,
    },
    /// The iteration budget was exhausted with connections still unrouted.
    UnroutablesRemaining {
        /// Nets with at least one unrouted connection.
        nets: Vec<PnrNetId>,
    },
    /// The iteration budget was exhausted with nodes still overused.
    ConflictsRemaining {
        /// Nets touching at least one still-overused node.
        overused: Vec<PnrNetId>,
    },
}

/// Drives the negotiated-congestion router loop over a set of net wrappers.
pub struct RouterLoop<'g, 'c> {
    graph: RoutingGraphView<'g>,
    config: &'c RouterConfig,
    cost_model: CostModel,
    preserve: PreservationMap,
}

impl<'g, 'c> RouterLoop<'g, 'c> {
    /// Creates a router loop over `graph`, configured by `config`.
    pub fn new(graph: RoutingGraphView<'g>, config: &'c RouterConfig) -> Self {
        Self {
            graph,
            cost_model: CostModel::new(config),
            config,
            preserve: PreservationMap::new(),
        }
    }

    /// Decides whether `connection` needs (re)routing this iteration, per
    /// the negotiated-congestion schedule: always on the first pass, always
    /// if it has no legal route yet, always if any node on its current path
    /// is overused, and otherwise only if it's critical enough to be worth
    /// probing for a cheaper alternative.
    fn should_route(&self, connection: &crate::routing::net::Connection, iteration: u32) -> bool {
        if iteration == 1 || !connection.routed {
            return true;
        }
        let congested = connection
            .path
            .iter()
            .any(|&wire| self.graph.get(wire).is_some_and(|n| n.occupancy() > 1));
        if congested {
            return true;
        }
        self.config.timing_driven && connection.criticality > self.config.min_reroute_criticality
    }

    /// Releases `net`'s preserved wires from both the graph and the
    /// preservation map, and marks every one of its connections unrouted.
    fn rip_up_net(&mut self, net: PnrNetId, nets: &mut [NetWrapper]) {
        for wire in self.preserve.wires_of(net) {
            self.graph.release(wire, net);
        }
        self.preserve.rip_up(net);
        for wrapper in nets.iter_mut() {
            if wrapper.net == net {
                for connection in &mut wrapper.connections {
                    connection.routed = false;
                }
            }
        }
    }

    /// Finds every preserved net whose wires fall inside the bounding box
    /// of a connection that still needs a route, and rips those nets up so
    /// the unrouted connection has somewhere to go. A safe superset of the
    /// conflict: it may rip up a preserved net that the search would not
    /// actually have needed, but never leaves a genuine conflict preserved.
    fn unroute_conflicting_preserved_nets(&mut self, nets: &mut [NetWrapper]) {
        if self.preserve.is_empty() {
            return;
        }
        let mut victims: HashSet<PnrNetId> = HashSet::new();
        for wrapper in nets.iter() {
            for connection in &wrapper.connections {
                if connection.routed {
                    continue;
                }
                for (wire, owner) in self.preserve.entries() {
                    if owner == connection.net {
                        continue;
                    }
                    let (x, y) = self.graph.tile_of(wire);
                    if connection.in_bbox(x, y) {
                        victims.insert(owner);
                    }
                }
            }
        }
        for victim in victims {
            self.rip_up_net(victim, nets);
        }
    }

    /// Runs the rip-up-and-reroute loop over `nets` until convergence or
    /// the iteration budget is exhausted, emitting one progress
    /// [`Diagnostic`] per iteration to `sink`.
    pub fn run(
        &mut self,
        nets: &mut [NetWrapper],
        delay_estimator: &dyn DelayEstimator,
        sink: &DiagnosticSink,
    ) -> RouteReport {
        for iteration in 1..=self.config.max_iterations {
            let mut any_unroutable = false;

            if self.config.soft_preserve {
                self.unroute_conflicting_preserved_nets(nets);
            }

            for wrapper in nets.iter_mut() {
                let allowed_optional_reroutes =
                    select_optional_reroutes(wrapper, self.config, &self.graph, iteration);

                for (idx, connection) in wrapper.connections.iter_mut().enumerate() {
                    let needs_route = self.should_route(connection, iteration)
                        || allowed_optional_reroutes.contains(&idx);
                    if !needs_route {
                        continue;
                    }

                    let congested = connection
                        .path
                        .iter()
                        .any(|&wire| self.graph.get(wire).is_some_and(|n| n.occupancy() > 1));
                    if congested && self.config.use_bounding_box {
                        connection.grow_bbox(
                            self.config.enlarge_bbox_horizontal,
                            self.config.enlarge_bbox_vertical,
                        );
                    }

                    if connection.routed {
                        for &wire in &connection.path {
                            self.graph.release(wire, connection.net);
                        }
                    }
                    if self.config.soft_preserve {
                        self.preserve.rip_up(connection.net);
                    }

                    let outcome = {
                        let mut search = PathSearch::new(
                            &mut self.graph,
                            self.config,
                            delay_estimator,
                            &self.preserve,
                        );
                        search.find(connection, &self.cost_model)
                    };

                    match outcome {
                        SearchOutcome::Found(path) => {
                            for &wire in &path {
                                self.graph.claim(wire, connection.net);
                            }
                            connection.path = path;
                            connection.routed = true;
                            if self.config.soft_preserve {
                                self.preserve.preserve(connection.net, connection.path.clone());
                            }
                        }
                        SearchOutcome::Unroutable => {
                            connection.routed = false;
                            any_unroutable = true;
                        }
                    }
                }
                wrapper.refresh_status();
            }

            let overused = self.graph.overused_nodes();
            let overused_count = overused.len();

            sink.emit(Diagnostic::warning(
                aion_diagnostics::DiagnosticCode::new(Category::Timing, 1),
                format!(
                    "route iteration {iteration}: {overused_count} overused node(s), \
                     present factor {:.3}",
                    self.cost_model.present_factor()
                ),
                aion_source::Span::DUMMY,
            ));

            if overused.is_empty() && !any_unroutable {
                return RouteReport::Converged { iterations: iteration };
            }

            for node in self.graph.all_nodes_mut() {
                self.cost_model.update_cost_factors(node);
            }

            if iteration > 1 {
                self.cost_model.grow_present_factor(self.config.present_multiplier);
            }
        }

        let unroutable_nets: Vec<PnrNetId> = nets
            .iter()
            .filter(|w| !w.fully_routed)
            .map(|w| w.net)
            .collect();

        if !unroutable_nets.is_empty() {
            return RouteReport::UnroutablesRemaining { nets: unroutable_nets };
        }

        let overused_nets: Vec<PnrNetId> = nets
            .iter()
            .filter(|w| {
                w.used_wires()
                    .iter()
                    .any(|wire| self.graph.get(*wire).is_some_and(|n| n.occupancy() > 1))
            })
            .map(|w| w.net)
            .collect();
        RouteReport::ConflictsRemaining { overused: overused_nets }
    }

    /// Consumes the loop, returning the underlying graph view (so callers
    /// can read back final congestion state or node usage for legalization).
    pub fn into_graph(self) -> RoutingGraphView<'g> {
        self.graph
    }
}

/// Picks which already-routed, uncongested, sufficiently-critical
/// connections in `wrapper` get an optional reroute probe this iteration,
/// capped at `reroute_percentage` of the net's connection count and biased
/// toward the most critical ones first.
fn select_optional_reroutes(
    wrapper: &NetWrapper,
    config: &RouterConfig,
    graph: &RoutingGraphView<'_>,
    iteration: u32,
) -> HashSet<usize> {
    if iteration == 1 || !config.timing_driven {
        return HashSet::new();
    }
    let mut candidates: Vec<(usize, f64)> = wrapper
        .connections
        .iter()
        .enumerate()
        .filter(|(_, c)| c.routed)
        .filter(|(_, c)| c.criticality > config.min_reroute_criticality)
        .filter(|(_, c)| {
            !c.path
                .iter()
                .any(|&wire| graph.get(wire).is_some_and(|n| n.occupancy() > 1))
        })
        .map(|(idx, c)| (idx, c.criticality))
        .collect();
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let quota = ((wrapper.connections.len() as f64) * config.reroute_percentage).ceil() as usize;
    candidates.into_iter().take(quota).map(|(idx, _)| idx).collect()
}
