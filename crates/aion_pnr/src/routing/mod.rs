//! Negotiated-congestion routing engine.
//!
//! Routes every net in a placed [`PnrNetlist`] through the device's
//! interconnect fabric. Clock and static (GND/VCC) nets are claimed by
//! their respective [`adapters::ClockRouter`]/[`adapters::StaticNetRouter`]
//! (both out of scope here, see `crate::adapters`); everything else is
//! handed to the PathFinder-style [`RouterLoop`], then legalized into a
//! clean per-net [`RouteTree`] via [`legalize::legalize_net`].

pub mod config;
pub mod cost;
pub mod graph;
pub mod legalize;
pub mod net;
pub mod preserve;
pub mod router;
pub mod search;

use crate::adapters::{ArchDelayEstimator, ClockRouter, NullClockRouter, NullStaticNetRouter, StaticNetRouter};
use crate::data::PnrNetlist;
use crate::ids::PnrNetId;
use crate::route_tree::RouteTree;
use config::RouterConfig;
use graph::RoutingGraphView;
use legalize::legalize_net;
use net::{Connection, NetWrapper};
use router::{RouteReport, RouterLoop};
use aion_arch::ids::WireId;
use aion_arch::Architecture;
use aion_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::{HashMap, HashSet};

/// Resolves the device wire a placed pin enters the fabric through.
///
/// The device model has no BEL-pin-to-wire mapping yet (`aion_arch`'s
/// `RoutingGraph` only models the INT-tile interconnect), so a site's
/// logical pins are resolved to a single synthetic wire keyed on the
/// site's raw index. This is deliberately coarse — every pin on a site
/// shares one entry wire — and is documented as an open design decision
/// pending a real site-pin-to-wire table.
fn wire_for_site(site: aion_arch::ids::SiteId) -> WireId {
    WireId::from_raw(site.as_raw())
}

/// Routes every net in `netlist` through `arch`'s routing fabric.
///
/// Clock and static nets are skipped by the negotiated-congestion loop and
/// instead handed to [`NullClockRouter`]/[`NullStaticNetRouter`] (both
/// claim-but-don't-route placeholders — see `crate::adapters`). Signal nets
/// are split into one [`Connection`] per sink, routed by [`RouterLoop`],
/// and legalized into each net's [`RouteTree`].
pub fn route(
    netlist: &mut PnrNetlist,
    arch: &dyn Architecture,
    config: &RouterConfig,
    sink: &DiagnosticSink,
) -> RouteReport {
    let mut clock_router = NullClockRouter;
    let mut static_router = NullStaticNetRouter;

    let net_ids: Vec<PnrNetId> = (0..netlist.nets.len())
        .map(|i| PnrNetId::from_raw(i as u32))
        .filter(|&id| !netlist.net(id).removed)
        .collect();

    let mut signal_nets = Vec::new();
    for id in net_ids {
        if clock_router.claims(netlist, id) {
            clock_router.route(netlist, id);
            continue;
        }
        if static_router.claims(netlist, id) {
            static_router.route(netlist, id);
            netlist.net_mut(id).routing = Some(RouteTree::stub());
            continue;
        }
        signal_nets.push(id);
    }

    let graph = arch.routing_graph();
    let mut view = RoutingGraphView::new(graph);
    let mut wrappers = Vec::new();

    for net_id in signal_nets {
        let net = netlist.net(net_id);
        if net.sinks.is_empty() {
            netlist.net_mut(net_id).routing = Some(RouteTree::stub());
            continue;
        }

        let driver = netlist.pin(net.driver);
        let Some(source_site) = netlist.cell(driver.cell).placement else {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Error, 1),
                format!("net {} has no placed driver, skipping routing", net.name),
                aion_source::Span::DUMMY,
            ));
            continue;
        };
        let source_wire = wire_for_site(source_site);

        let mut connections = Vec::new();
        for &sink_pin_id in &net.sinks {
            let sink_pin = netlist.pin(sink_pin_id);
            let Some(sink_site) = netlist.cell(sink_pin.cell).placement else {
                sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Error, 2),
                    format!("net {} has an unplaced sink, skipping that connection", net.name),
                    aion_source::Span::DUMMY,
                ));
                continue;
            };
            let sink_wire = wire_for_site(sink_site);

            let mut conn = Connection::new(
                net_id,
                net.driver,
                sink_pin_id,
                source_wire,
                sink_wire,
                config.bounding_box_extension,
            );
            let source_xy = view.tile_of(source_wire);
            let sink_xy = view.tile_of(sink_wire);
            conn.set_bbox_from_tiles(source_xy, sink_xy, config.bounding_box_extension);
            connections.push(conn);
        }

        if !connections.is_empty() {
            wrappers.push(NetWrapper::new(net_id, connections));
        }
    }

    let mut loop_ = RouterLoop::new(view, config);
    let estimator = ArchDelayEstimator::new(arch);
    let report = loop_.run(&mut wrappers, &estimator, sink);
    let mut view = loop_.into_graph();

    for wrapper in &wrappers {
        if !wrapper.fully_routed {
            continue;
        }
        let Some(source_wire) = wrapper.connections.first().map(|c| c.source_wire) else {
            continue;
        };
        let used: HashSet<WireId> = wrapper.used_wires().into_iter().collect();
        let edges = induced_edges(&mut view, &used, &estimator);

        match legalize_net(source_wire, &used, &edges) {
            Some(tree) => netlist.net_mut(wrapper.net).routing = Some(tree),
            None => sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Error, 3),
                format!("net {} failed legalization", netlist.net(wrapper.net).name),
                aion_source::Span::DUMMY,
            )),
        }
    }

    report
}

/// Builds the adjacency restricted to `used` wires that [`legalize_net`]
/// needs, by asking the graph view for each used wire's children and
/// weighting each edge by `estimator`'s delay estimate (plus the
/// cross-long-wire setup penalty when both ends are long routing
/// resources), so legalization picks the lowest-delay route rather than
/// merely the fewest-hop one.
fn induced_edges(
    view: &mut RoutingGraphView<'_>,
    used: &HashSet<WireId>,
    estimator: &dyn crate::adapters::DelayEstimator,
) -> HashMap<WireId, Vec<(WireId, f64)>> {
    let mut edges = HashMap::new();
    for &wire in used {
        let children: Vec<(WireId, f64)> = view
            .children(wire)
            .into_iter()
            .filter(|c| used.contains(c))
            .map(|c| {
                let extra = if estimator.is_long(wire) && estimator.is_long(c) {
                    estimator.extra_delay().typ_ns * 1_000.0
                } else {
                    0.0
                };
                (c, estimator.delay_of(wire, c).typ_ns * 1_000.0 + extra)
            })
            .collect();
        edges.insert(wire, children);
    }
    edges
}
