//! Shared data types for FPGA device architecture models.
//!
//! This module defines the structural elements of an FPGA device: tiles, sites,
//! BELs, wires, PIPs, timing delays, and resource usage summaries. These types
//! are used by the [`Architecture`](crate::Architecture) trait implementations
//! for specific device families.

use crate::ids::{BelId, PipId, SiteId, WireId};
use serde::{Deserialize, Serialize};

/// The type of a tile in the FPGA grid.
///
/// Each tile occupies one position in the device grid and contains zero or more
/// sites of a specific function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// A tile containing configurable logic blocks (LUTs, FFs, carry chains).
    Logic,
    /// A tile containing block RAM resources.
    Bram,
    /// A tile containing DSP multiply-accumulate blocks.
    Dsp,
    /// A tile providing I/O pad connections to the package pins.
    Io,
    /// A tile containing clock management resources (PLLs, MMCMs).
    Clock,
    /// An empty tile with no programmable resources.
    Empty,
}

/// A single tile in the FPGA device grid.
///
/// Tiles are the coarse-grained building blocks of the device, arranged in a
/// regular grid. Each tile has a type that determines what resources it contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Column index in the device grid (0-based, left to right).
    pub col: u32,
    /// Row index in the device grid (0-based, bottom to top).
    pub row: u32,
    /// The functional type of this tile.
    pub tile_type: TileType,
    /// The sites (placement locations) contained in this tile.
    pub sites: Vec<SiteId>,
}

/// The functional type of a site within a tile.
///
/// Sites are the fine-grained placement locations where BELs reside.
/// A single tile may contain multiple sites of the same or different types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    /// A site containing a single look-up table.
    Lut,
    /// A site containing a single flip-flop.
    Ff,
    /// A site containing a paired LUT and flip-flop (Xilinx SLICEL/SLICEM style).
    LutFf,
    /// An adaptive logic module (Intel ALM style, contains 2 LUTs + 2 FFs).
    Alm,
    /// A block RAM site.
    BramSite,
    /// A DSP multiply-accumulate site.
    DspSite,
    /// An I/O pad site for external pin connections.
    IoPad,
    /// A PLL/MMCM clock management site.
    Pll,
}

/// The type of a basic element of logic (BEL) within a site.
///
/// BELs are the atomic programmable resources that cells are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BelType {
    /// A look-up table BEL, implementing arbitrary Boolean functions.
    Lut,
    /// A flip-flop BEL for sequential storage.
    Ff,
    /// A carry-chain BEL for arithmetic operations.
    Carry,
    /// A multiplexer BEL for routing within a site.
    Mux,
    /// A block RAM primitive BEL.
    BramPrimitive,
    /// A DSP multiply-accumulate primitive BEL.
    DspPrimitive,
    /// An I/O buffer BEL connecting to a package pin.
    IoBuf,
    /// A PLL/MMCM primitive BEL for clock synthesis.
    PllPrimitive,
}

/// A basic element of logic (BEL) within a site.
///
/// BELs are the smallest addressable resources in the FPGA fabric. During
/// placement, each technology-mapped cell is assigned to exactly one BEL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bel {
    /// The unique ID of this BEL.
    pub id: BelId,
    /// The instance name of this BEL (e.g., "A6LUT", "AFF").
    pub name: String,
    /// The functional type of this BEL.
    pub bel_type: BelType,
}

/// A site (placement location) within a tile.
///
/// Sites group related BELs together. For example, a Xilinx SLICEL site
/// contains 4 LUT BELs, 8 FF BELs, and carry chain BELs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// The unique ID of this site.
    pub id: SiteId,
    /// The functional type of this site.
    pub site_type: SiteType,
    /// The BELs contained in this site.
    pub bels: Vec<Bel>,
    /// The column of the tile containing this site.
    pub tile_col: u32,
    /// The row of the tile containing this site.
    pub tile_row: u32,
}

/// The device-supplied type tag for a routing-resource wire.
///
/// Intent codes describe the electrical character of a wire segment and
/// drive routing heuristics (e.g. preferring long wires for far-apart
/// connections, masking U-turn nodes near PINBOUNCE points).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentCode {
    /// Spans one interconnect tile.
    Single,
    /// Spans two interconnect tiles.
    Double,
    /// Spans four interconnect tiles.
    Quad,
    /// A long vertical wire spanning many tiles.
    VLong,
    /// A long horizontal wire spanning many tiles.
    HLong,
    /// A wire local to a single tile's switchbox.
    Local,
    /// A short wire that bounces a signal back into the switchbox,
    /// used to reach site pins that aren't directly reachable.
    PinBounce,
    /// A wire that terminates at (or originates from) a site pin.
    PinFeed,
}

/// A routing wire segment in the device interconnect fabric.
///
/// Wires connect between PIPs and site pins, forming the routing network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// The unique ID of this wire.
    pub id: WireId,
    /// The name of this wire (e.g., "CLB_LL_N3LUT_0").
    pub name: String,
    /// The device-supplied intent code for this wire.
    pub intent: IntentCode,
    /// Column on the INT-tile grid.
    pub x: i32,
    /// Row on the INT-tile grid.
    pub y: i32,
    /// Span of this wire, in INT tiles (0 for site-local wires).
    pub length: u32,
}

impl Wire {
    /// Creates a single-tile local wire at the given coordinates.
    ///
    /// Convenience constructor for the common case (most wires in a real
    /// device are `Local`/`Single` with `length` 0 or 1).
    pub fn local(id: WireId, name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id,
            name: name.into(),
            intent: IntentCode::Local,
            x,
            y,
            length: 0,
        }
    }
}

/// A programmable interconnect point (PIP) connecting two wires.
///
/// PIPs are the switches in the routing fabric that can be turned on to
/// connect one wire to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pip {
    /// The unique ID of this PIP.
    pub id: PipId,
    /// The source wire that drives this PIP.
    pub src_wire: WireId,
    /// The destination wire that this PIP drives.
    pub dst_wire: WireId,
    /// The delay through this PIP when enabled.
    pub delay: Delay,
    /// Whether this PIP is a route-through (passes through a BEL rather
    /// than a dedicated routing switch) — some routers forbid these
    /// unless the BEL is unused by the design.
    pub is_route_thru: bool,
}

impl Pip {
    /// Creates a regular (non-route-through) PIP.
    pub fn new(id: PipId, src_wire: WireId, dst_wire: WireId, delay: Delay) -> Self {
        Self {
            id,
            src_wire,
            dst_wire,
            delay,
            is_route_thru: false,
        }
    }
}

/// A minimal routing graph for the device interconnect.
///
/// This is a placeholder for Phase 3 (place & route). Currently empty,
/// it will be populated with the full wire and PIP connectivity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingGraph {
    /// All routing wires in the device.
    pub wires: Vec<Wire>,
    /// All programmable interconnect points in the device.
    pub pips: Vec<Pip>,
}

impl RoutingGraph {
    /// Returns the wires immediately downhill of (driven by a PIP from) `wire`.
    pub fn downhill(&self, wire: WireId) -> Vec<WireId> {
        self.pips
            .iter()
            .filter(|p| p.src_wire == wire)
            .map(|p| p.dst_wire)
            .collect()
    }

    /// Returns the wires immediately uphill of (driving a PIP into) `wire`.
    pub fn uphill(&self, wire: WireId) -> Vec<WireId> {
        self.pips
            .iter()
            .filter(|p| p.dst_wire == wire)
            .map(|p| p.src_wire)
            .collect()
    }

    /// Returns the PIP connecting `from` to `to`, if one exists.
    pub fn pips_between(&self, from: WireId, to: WireId) -> Option<&Pip> {
        self.pips
            .iter()
            .find(|p| p.src_wire == from && p.dst_wire == to)
    }

    /// Returns the [`Wire`] record for the given ID, if known.
    pub fn wire(&self, wire: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == wire)
    }

    /// Returns the INT-tile coordinates of a wire.
    ///
    /// Returns `(0, 0)` for an unknown wire id (treated the same as a
    /// zero-length stub wire).
    pub fn tile_of(&self, wire: WireId) -> (i32, i32) {
        self.wire(wire).map(|w| (w.x, w.y)).unwrap_or((0, 0))
    }

    /// Returns the span (in INT tiles) of a wire.
    pub fn length_of(&self, wire: WireId) -> u32 {
        self.wire(wire).map(|w| w.length).unwrap_or(0)
    }

    /// Returns the intent code of a wire, defaulting to [`IntentCode::Local`]
    /// for an unknown wire id.
    pub fn intent_code(&self, wire: WireId) -> IntentCode {
        self.wire(wire).map(|w| w.intent).unwrap_or(IntentCode::Local)
    }

    /// Returns whether the PIP from `from` to `to` is a route-through.
    pub fn is_route_thru(&self, from: WireId, to: WireId) -> bool {
        self.pips_between(from, to)
            .map(|p| p.is_route_thru)
            .unwrap_or(false)
    }
}

/// A timing delay with min/typical/max corners.
///
/// Represents the propagation delay through a device element across
/// different process/voltage/temperature corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    /// Minimum delay in nanoseconds (fast corner).
    pub min_ns: f64,
    /// Typical delay in nanoseconds (nominal corner).
    pub typ_ns: f64,
    /// Maximum delay in nanoseconds (slow corner).
    pub max_ns: f64,
}

impl Delay {
    /// A zero delay (no propagation time).
    pub const ZERO: Self = Self {
        min_ns: 0.0,
        typ_ns: 0.0,
        max_ns: 0.0,
    };

    /// Creates a new delay with the given min/typ/max values.
    pub fn new(min_ns: f64, typ_ns: f64, max_ns: f64) -> Self {
        Self {
            min_ns,
            typ_ns,
            max_ns,
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A summary of FPGA resource usage for a design or device.
///
/// Tracks how many of each major resource type are used or available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Number of look-up tables used.
    pub luts: u32,
    /// Number of flip-flops used.
    pub ffs: u32,
    /// Number of block RAM tiles used.
    pub bram: u32,
    /// Number of DSP blocks used.
    pub dsp: u32,
    /// Number of I/O pads used.
    pub io: u32,
    /// Number of PLL/MMCM blocks used.
    pub pll: u32,
}

impl ResourceUsage {
    /// Returns the total number of logic resources (LUTs + FFs).
    pub fn total_logic(&self) -> u32 {
        self.luts + self.ffs
    }
}
