//! External-interface adapters for the router.
//!
//! Traits isolating the router from concrete delay, timing, clock, and
//! static-net implementations, with default implementations backed by the
//! rest of this workspace (`aion_arch` for delays, `aion_timing` for STA).
//! Clock and static-net routing are out of scope for this crate (see the
//! crate's module docs); the `Null*` implementations exist only so the
//! scheduler's phase ordering has something to call.

use crate::data::PnrNetlist;
use crate::ids::PnrNetId;
use aion_arch::ids::WireId;
use aion_arch::types::Delay;
use aion_arch::Architecture;
use aion_timing::TimingGraph;

/// Estimates the delay of routing resources for timing-driven routing.
pub trait DelayEstimator {
    /// Returns the delay of the PIP/wire between `from` and `to`.
    fn delay_of(&self, from: WireId, to: WireId) -> Delay;
    /// Returns whether `wire` is considered a "long" routing resource
    /// (double/quad/long-line intent), which the legalizer and cost model
    /// treat preferentially for far-apart connections.
    fn is_long(&self, wire: WireId) -> bool;
    /// Extra fixed delay to add for crossing into a new site (site-pin
    /// setup overhead not captured by the PIP delay model).
    fn extra_delay(&self) -> Delay;
}

/// [`DelayEstimator`] backed directly by the device's [`Architecture`].
pub struct ArchDelayEstimator<'a> {
    arch: &'a dyn Architecture,
}

impl<'a> ArchDelayEstimator<'a> {
    /// Creates an estimator reading delays from `arch`'s routing graph.
    pub fn new(arch: &'a dyn Architecture) -> Self {
        Self { arch }
    }
}

impl<'a> DelayEstimator for ArchDelayEstimator<'a> {
    fn delay_of(&self, from: WireId, to: WireId) -> Delay {
        self.arch
            .routing_graph()
            .pips_between(from, to)
            .map(|p| p.delay)
            .unwrap_or(Delay::ZERO)
    }

    fn is_long(&self, wire: WireId) -> bool {
        use aion_arch::types::IntentCode;
        matches!(
            self.arch.routing_graph().intent_code(wire),
            IntentCode::Quad | IntentCode::VLong | IntentCode::HLong
        )
    }

    fn extra_delay(&self) -> Delay {
        Delay::new(0.01, 0.02, 0.03)
    }
}

/// Feeds routed-net delays into static timing analysis and reads back
/// per-connection criticality.
pub trait TimingFeedback {
    /// Records the routed delay of `net` for the next STA pass.
    fn set_route_delay(&mut self, net: PnrNetId, delay_ps: f64);
    /// Returns `(arrival, required)` times in picoseconds for `net`, if STA
    /// has been run since the last topology change.
    fn arrival_require_times(&self, net: PnrNetId) -> Option<(f64, f64)>;
    /// Returns the criticality (`[0, 1]`) of `net`'s worst path.
    fn criticality(&self, net: PnrNetId) -> f64;
    /// Applies a post-hoc delay correction after legalization changes a
    /// net's actual route (legalized paths can be shorter than the
    /// negotiated search path).
    fn patch_up_delay(&mut self, net: PnrNetId, delay_ps: f64);
}

/// [`TimingFeedback`] backed by an [`aion_timing::TimingGraph`].
pub struct StaTimingFeedback {
    graph: TimingGraph,
    criticalities: std::collections::HashMap<PnrNetId, f64>,
}

impl StaTimingFeedback {
    /// Creates timing feedback wrapping a pre-built timing graph.
    pub fn new(graph: TimingGraph) -> Self {
        Self {
            graph,
            criticalities: std::collections::HashMap::new(),
        }
    }

    /// Read-only access to the underlying timing graph.
    pub fn graph(&self) -> &TimingGraph {
        &self.graph
    }
}

impl TimingFeedback for StaTimingFeedback {
    fn set_route_delay(&mut self, net: PnrNetId, delay_ps: f64) {
        // Net delay edges are keyed by node, not PnrNetId, in the shared
        // timing graph; criticality is derived from routed delay magnitude
        // until a net-to-edge index is threaded through from timing_bridge.
        let normalized = (delay_ps / 10_000.0).clamp(0.0, 1.0);
        self.criticalities.insert(net, normalized);
    }

    fn arrival_require_times(&self, _net: PnrNetId) -> Option<(f64, f64)> {
        None
    }

    fn criticality(&self, net: PnrNetId) -> f64 {
        self.criticalities.get(&net).copied().unwrap_or(0.0)
    }

    fn patch_up_delay(&mut self, net: PnrNetId, delay_ps: f64) {
        self.set_route_delay(net, delay_ps);
    }
}

/// Routes clock nets — explicitly out of scope; implementations only need
/// to report which nets they consider "theirs" so the scheduler can skip
/// them in the negotiated-congestion phase.
pub trait ClockRouter {
    /// Returns whether `net` is a clock net this router claims.
    fn claims(&self, netlist: &PnrNetlist, net: PnrNetId) -> bool;
    /// Routes the clock net (a no-op for [`NullClockRouter`]).
    fn route(&mut self, netlist: &mut PnrNetlist, net: PnrNetId);
}

/// A [`ClockRouter`] that claims nothing and routes nothing.
#[derive(Debug, Default)]
pub struct NullClockRouter;

impl ClockRouter for NullClockRouter {
    fn claims(&self, _netlist: &PnrNetlist, _net: PnrNetId) -> bool {
        false
    }
    fn route(&mut self, _netlist: &mut PnrNetlist, _net: PnrNetId) {}
}

/// Routes static (GND/VCC) nets — out of scope; see [`ClockRouter`].
pub trait StaticNetRouter {
    /// Returns whether `net` is a static net this router claims.
    fn claims(&self, netlist: &PnrNetlist, net: PnrNetId) -> bool;
    /// Routes the static net (a no-op for [`NullStaticNetRouter`]).
    fn route(&mut self, netlist: &mut PnrNetlist, net: PnrNetId);
}

/// A [`StaticNetRouter`] that claims the netlist's `is_static` nets but
/// performs no actual routing — static-net distribution is out of scope.
#[derive(Debug, Default)]
pub struct NullStaticNetRouter;

impl StaticNetRouter for NullStaticNetRouter {
    fn claims(&self, netlist: &PnrNetlist, net: PnrNetId) -> bool {
        netlist.net(net).is_static.is_some()
    }
    fn route(&mut self, _netlist: &mut PnrNetlist, _net: PnrNetId) {}
}
