//! Per-net and per-connection routing state.
//!
//! A [`NetWrapper`] groups a `PnrNet`'s driver-to-sink fanout into
//! individually routable [`Connection`]s (one per sink), each carrying its
//! own bounding box, timing criticality, and current path. This is the unit
//! the router loop iterates and reroutes.

use aion_arch::ids::WireId;
use crate::ids::{PnrNetId, PnrPinId};

/// A single driver-to-sink connection within a net's fanout.
#[derive(Debug, Clone)]
pub struct Connection {
    /// The net this connection belongs to.
    pub net: PnrNetId,
    /// Source pin (the net's driver).
    pub source_pin: PnrPinId,
    /// Sink pin this connection terminates at.
    pub sink_pin: PnrPinId,
    /// Source wire (device-level entry point for the driver).
    pub source_wire: WireId,
    /// Sink wire (device-level entry point for the sink).
    pub sink_wire: WireId,
    /// Timing criticality in `[0, 1]`, 0 if not timing-driven.
    pub criticality: f64,
    /// Half-perimeter wirelength bounding box: `(min_x, min_y, max_x, max_y)`.
    pub bbox: (i32, i32, i32, i32),
    /// The current routed path, as a chain of wires from source to sink
    /// (empty until first successfully routed).
    pub path: Vec<WireId>,
    /// Whether this connection's current `path` is known-legal and not
    /// scheduled for rip-up this iteration.
    pub routed: bool,
}

impl Connection {
    /// Creates a new, unrouted connection with the given endpoints.
    pub fn new(
        net: PnrNetId,
        source_pin: PnrPinId,
        sink_pin: PnrPinId,
        source_wire: WireId,
        sink_wire: WireId,
        bbox_extension: i32,
    ) -> Self {
        let (sx, sy) = wire_xy(source_wire);
        let (tx, ty) = wire_xy(sink_wire);
        let bbox = (
            sx.min(tx) - bbox_extension,
            sy.min(ty) - bbox_extension,
            sx.max(tx) + bbox_extension,
            sy.max(ty) + bbox_extension,
        );
        Self {
            net,
            source_pin,
            sink_pin,
            source_wire,
            sink_wire,
            criticality: 0.0,
            bbox,
            path: Vec::new(),
            routed: false,
        }
    }

    /// Recomputes `bbox` from arbitrary endpoint coordinates (used once the
    /// search has real tile coordinates from the routing graph).
    pub fn set_bbox_from_tiles(
        &mut self,
        source_xy: (i32, i32),
        sink_xy: (i32, i32),
        extension: i32,
    ) {
        let (sx, sy) = source_xy;
        let (tx, ty) = sink_xy;
        self.bbox = (
            sx.min(tx) - extension,
            sy.min(ty) - extension,
            sx.max(tx) + extension,
            sy.max(ty) + extension,
        );
    }

    /// Returns whether `(x, y)` falls inside this connection's bounding box.
    pub fn in_bbox(&self, x: i32, y: i32) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bbox;
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }

    /// Half-perimeter wirelength of the bounding box.
    pub fn hpwl(&self) -> i64 {
        let (min_x, min_y, max_x, max_y) = self.bbox;
        (max_x - min_x) as i64 + (max_y - min_y) as i64
    }

    /// Grows the bounding box by `dx`/`dy` on every side, used when a
    /// congested reroute needs more room to detour around the conflict.
    pub fn grow_bbox(&mut self, dx: i32, dy: i32) {
        let (min_x, min_y, max_x, max_y) = self.bbox;
        self.bbox = (min_x - dx, min_y - dy, max_x + dx, max_y + dy);
    }
}

/// Placeholder coordinate extraction used before a connection's real tile
/// coordinates are known (wire IDs alone carry no position); replaced via
/// [`Connection::set_bbox_from_tiles`] once the routing graph is consulted.
fn wire_xy(_wire: WireId) -> (i32, i32) {
    (0, 0)
}

/// Groups a net's fanout into individually routable connections.
#[derive(Debug, Clone)]
pub struct NetWrapper {
    /// The net being wrapped.
    pub net: PnrNetId,
    /// One connection per sink pin.
    pub connections: Vec<Connection>,
    /// Whether every connection in this net is currently routed and legal.
    pub fully_routed: bool,
}

impl NetWrapper {
    /// Creates a new net wrapper with the given connections.
    pub fn new(net: PnrNetId, connections: Vec<Connection>) -> Self {
        Self {
            net,
            connections,
            fully_routed: false,
        }
    }

    /// Recomputes `fully_routed` from the current connection states.
    pub fn refresh_status(&mut self) {
        self.fully_routed = self.connections.iter().all(|c| c.routed);
    }

    /// Returns every wire used across all of this net's connections.
    pub fn used_wires(&self) -> Vec<WireId> {
        let mut wires: Vec<WireId> = self.connections.iter().flat_map(|c| c.path.clone()).collect();
        wires.dedup();
        wires
    }

    /// Returns the net's worst-case (maximum) connection criticality.
    pub fn max_criticality(&self) -> f64 {
        self.connections
            .iter()
            .map(|c| c.criticality)
            .fold(0.0, f64::max)
    }
}
