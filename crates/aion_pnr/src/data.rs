//! Core PnR netlist data structures.
//!
//! Defines the physical netlist used during routing and ECO mutation: cells
//! (with a placement assigned by an external placer), nets (driver + sinks,
//! possibly static), and pins (cell connections to nets). The [`PnrNetlist`]
//! is the central data structure that the routing engine and the ECO
//! operators both read and mutate.

use crate::ids::{PnrCellId, PnrNetId, PnrPinId};
use crate::route_tree::RouteTree;
use aion_arch::ids::SiteId;
use aion_common::LogicVec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The direction of a pin relative to its owning cell.
///
/// Mirrors the synthesis-level port direction but is defined locally so
/// this crate has no dependency on the front-end IR — a cell's pins are
/// a purely physical-netlist concern once placement has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// An input pin (a sink of its net).
    Input,
    /// An output pin (the driver of its net).
    Output,
    /// A bidirectional pin.
    InOut,
}

/// The physical netlist for routing and ECO.
///
/// Contains all cells, nets, and pins in the design after technology mapping
/// and placement. Each cell has an optional placement (site assignment), and
/// each net has an optional routing solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnrNetlist {
    /// All cells in the netlist.
    pub cells: Vec<PnrCell>,
    /// All nets in the netlist.
    pub nets: Vec<PnrNet>,
    /// All pins in the netlist.
    pub pins: Vec<PnrPin>,
    /// Auxiliary index: cell name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub cell_by_name: HashMap<String, PnrCellId>,
    /// Auxiliary index: net name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub net_by_name: HashMap<String, PnrNetId>,
}

impl PnrNetlist {
    /// Creates an empty PnR netlist.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            nets: Vec::new(),
            pins: Vec::new(),
            cell_by_name: HashMap::new(),
            net_by_name: HashMap::new(),
        }
    }

    /// Adds a cell and returns its ID.
    pub fn add_cell(&mut self, mut cell: PnrCell) -> PnrCellId {
        let id = PnrCellId::from_raw(self.cells.len() as u32);
        cell.id = id;
        self.cell_by_name.insert(cell.name.clone(), id);
        self.cells.push(cell);
        id
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, mut net: PnrNet) -> PnrNetId {
        let id = PnrNetId::from_raw(self.nets.len() as u32);
        net.id = id;
        self.net_by_name.insert(net.name.clone(), id);
        self.nets.push(net);
        id
    }

    /// Adds a pin and returns its ID.
    pub fn add_pin(&mut self, mut pin: PnrPin) -> PnrPinId {
        let id = PnrPinId::from_raw(self.pins.len() as u32);
        pin.id = id;
        self.pins.push(pin);
        id
    }

    /// Tombstones a cell by ID, removing it from the name index.
    ///
    /// Does not compact `self.cells`: the slot keeps its `PnrCellId` (so
    /// other structures referencing it don't dangle) but is marked
    /// `removed` and excluded from counts, lookups, and routing.
    pub fn tombstone_cell(&mut self, id: PnrCellId) {
        if let Some(cell) = self.cells.get_mut(id.as_raw() as usize) {
            self.cell_by_name.remove(&cell.name);
            cell.name = format!("__removed_{}", id.as_raw());
            cell.placement = None;
            cell.removed = true;
        }
    }

    /// Tombstones a net by ID, removing it from the name index.
    pub fn tombstone_net(&mut self, id: PnrNetId) {
        if let Some(net) = self.nets.get_mut(id.as_raw() as usize) {
            self.net_by_name.remove(&net.name);
            net.name = format!("__removed_{}", id.as_raw());
            net.routing = None;
            net.removed = true;
        }
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: PnrCellId) -> &PnrCell {
        &self.cells[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the cell with the given ID.
    pub fn cell_mut(&mut self, id: PnrCellId) -> &mut PnrCell {
        &mut self.cells[id.as_raw() as usize]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: PnrNetId) -> &PnrNet {
        &self.nets[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the net with the given ID.
    pub fn net_mut(&mut self, id: PnrNetId) -> &mut PnrNet {
        &mut self.nets[id.as_raw() as usize]
    }

    /// Returns the pin with the given ID.
    pub fn pin(&self, id: PnrPinId) -> &PnrPin {
        &self.pins[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the pin with the given ID.
    pub fn pin_mut(&mut self, id: PnrPinId) -> &mut PnrPin {
        &mut self.pins[id.as_raw() as usize]
    }

    /// Finds a cell by its hierarchical instance path (e.g.
    /// `"processor/t_state1_flop"`).
    pub fn find_cell(&self, path: &str) -> Option<PnrCellId> {
        self.cell_by_name.get(path).copied()
    }

    /// Finds a net by name.
    pub fn find_net(&self, name: &str) -> Option<PnrNetId> {
        self.net_by_name.get(name).copied()
    }

    /// Finds a pin given a hierarchical `"cell_path/pin_name"` reference.
    pub fn find_pin(&self, pin_ref: &str) -> Option<PnrPinId> {
        let (cell_path, pin_name) = pin_ref.rsplit_once('/')?;
        let cell_id = self.find_cell(cell_path)?;
        self.pins
            .iter()
            .find(|p| p.cell == cell_id && p.name == pin_name && !p.removed)
            .map(|p| p.id)
    }

    /// Returns every non-removed pin attached to `cell`.
    pub fn pins_of_cell(&self, cell: PnrCellId) -> Vec<PnrPinId> {
        self.pins
            .iter()
            .filter(|p| p.cell == cell && !p.removed)
            .map(|p| p.id)
            .collect()
    }

    /// Returns the number of non-removed cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.removed).count()
    }

    /// Returns the number of non-removed nets.
    pub fn net_count(&self) -> usize {
        self.nets.iter().filter(|n| !n.removed).count()
    }

    /// Returns the number of non-removed pins.
    pub fn pin_count(&self) -> usize {
        self.pins.iter().filter(|p| !p.removed).count()
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.cell_by_name.clear();
        for (i, cell) in self.cells.iter().enumerate() {
            if !cell.removed {
                self.cell_by_name
                    .insert(cell.name.clone(), PnrCellId::from_raw(i as u32));
            }
        }
        self.net_by_name.clear();
        for (i, net) in self.nets.iter().enumerate() {
            if !net.removed {
                self.net_by_name
                    .insert(net.name.clone(), PnrNetId::from_raw(i as u32));
            }
        }
    }

    /// Returns whether every non-removed cell has a placement.
    pub fn is_fully_placed(&self) -> bool {
        self.cells
            .iter()
            .filter(|c| !c.removed)
            .all(|c| c.placement.is_some())
    }

    /// Returns whether every non-removed net with at least one sink is routed.
    pub fn is_fully_routed(&self) -> bool {
        self.nets
            .iter()
            .filter(|n| !n.removed && !n.sinks.is_empty())
            .all(|n| n.routing.is_some())
    }

    /// Returns the number of placed cells.
    pub fn placed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.removed && c.placement.is_some())
            .count()
    }

    /// Returns the number of routed nets.
    pub fn routed_count(&self) -> usize {
        self.nets
            .iter()
            .filter(|n| !n.removed && n.routing.is_some())
            .count()
    }
}

impl Default for PnrNetlist {
    fn default() -> Self {
        Self::new()
    }
}

/// The type of a PnR cell, determining what physical resource it maps to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PnrCellType {
    /// A look-up table with the given number of inputs and initialization vector.
    Lut {
        /// Number of inputs to the LUT (typically 4 or 6).
        inputs: u8,
        /// LUT initialization bits (truth table).
        init: LogicVec,
    },
    /// A D flip-flop (edge-triggered register).
    Dff,
    /// A carry chain cell for arithmetic operations.
    Carry,
    /// A block RAM configured with the given parameters.
    Bram(BramConfig),
    /// A DSP block configured with the given parameters.
    Dsp(DspConfig),
    /// An I/O buffer connecting to a package pin.
    Iobuf {
        /// Direction of the I/O buffer.
        direction: PortDirection,
        /// I/O standard (e.g., "LVCMOS33", "LVDS").
        standard: String,
    },
    /// A PLL/MMCM clock management block.
    Pll(PllConfig),
    /// A constant driver feeding the design's static (GND/VCC) distribution.
    StaticSource(StaticNetKind),
}

/// Configuration for a block RAM cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BramConfig {
    /// Data width in bits.
    pub width: u32,
    /// Memory depth (number of entries).
    pub depth: u32,
}

/// Configuration for a DSP block cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DspConfig {
    /// Width of the A operand in bits.
    pub width_a: u32,
    /// Width of the B operand in bits.
    pub width_b: u32,
}

/// Configuration for a PLL/MMCM clock management cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PllConfig {
    /// Input frequency in MHz.
    pub input_freq_mhz: f64,
    /// Output frequency in MHz.
    pub output_freq_mhz: f64,
}

/// A static (constant-valued) net kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticNetKind {
    /// The design-wide ground (logic 0) net.
    Gnd,
    /// The design-wide VCC (logic 1) net.
    Vcc,
}

impl StaticNetKind {
    /// Returns the canonical net name for this static kind (`"GND"`/`"VCC"`).
    pub fn net_name(self) -> &'static str {
        match self {
            StaticNetKind::Gnd => "GND",
            StaticNetKind::Vcc => "VCC",
        }
    }
}

/// A cell in the PnR netlist.
///
/// Represents a single physical resource (LUT, FF, BRAM, DSP, I/O) that needs
/// to be placed onto a device site and connected via routing. `name` is a
/// `/`-separated hierarchical instance path (e.g. `"processor/t_state1_flop"`),
/// matching the hierarchical pin references the ECO operators consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnrCell {
    /// The unique ID of this cell.
    pub id: PnrCellId,
    /// Hierarchical instance path (e.g. "lut_0", "processor/t_state1_flop").
    pub name: String,
    /// The physical cell type.
    pub cell_type: PnrCellType,
    /// The site this cell is placed on (`None` = unplaced).
    pub placement: Option<SiteId>,
    /// Whether this cell's placement is fixed (e.g., I/O pads).
    pub is_fixed: bool,
    /// Set by [`PnrNetlist::tombstone_cell`]. A removed cell keeps its ID
    /// allocated but no longer participates in routing or name lookup.
    #[serde(default)]
    pub removed: bool,
}

/// A net in the PnR netlist.
///
/// Represents a signal connecting one driver pin to one or more sink pins.
/// After routing, the net has a [`RouteTree`] describing the physical wiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnrNet {
    /// The unique ID of this net.
    pub id: PnrNetId,
    /// Human-readable net name (e.g., "clk", "data_bus[3]").
    pub name: String,
    /// The driver pin (source) of this net.
    pub driver: PnrPinId,
    /// The sink pins (destinations) of this net.
    pub sinks: Vec<PnrPinId>,
    /// The routing solution for this net (`None` = unrouted).
    pub routing: Option<RouteTree>,
    /// Whether this net is on the critical timing path.
    pub timing_critical: bool,
    /// Whether this net's current route is preserved across a reroute
    /// (see `routing::preserve`).
    #[serde(default)]
    pub preserved: bool,
    /// Set if this net is a static (GND/VCC) net, routed by the static-net
    /// router rather than the negotiated-congestion router.
    #[serde(default)]
    pub is_static: Option<StaticNetKind>,
    /// Set by [`PnrNetlist::tombstone_net`]; see [`PnrCell::removed`].
    #[serde(default)]
    pub removed: bool,
}

/// A pin on a cell in the PnR netlist.
///
/// Pins connect cells to nets. Each pin belongs to exactly one cell and
/// is optionally connected to one net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnrPin {
    /// The unique ID of this pin.
    pub id: PnrPinId,
    /// Human-readable pin name (e.g., "I0", "O", "D", "Q").
    pub name: String,
    /// Direction of the pin relative to the cell.
    pub direction: PortDirection,
    /// The cell that owns this pin.
    pub cell: PnrCellId,
    /// The net this pin is connected to (`None` = unconnected).
    pub net: Option<PnrNetId>,
    /// Set when the pin is detached by `eco::disconnect`/`eco::remove_cell`;
    /// mirrors [`PnrCell::removed`].
    #[serde(default)]
    pub removed: bool,
}
