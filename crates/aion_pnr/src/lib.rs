//! Routing and ECO engine for the Aion FPGA toolchain.
//!
//! This crate operates on an already placed [`PnrNetlist`] (produced
//! upstream by a placer this crate does not own): it routes every net
//! through the device's interconnect fabric using a PathFinder-style
//! negotiated-congestion router ([`routing::route`]), and exposes a set of
//! small, surgical netlist mutations — the [`eco`] operators — for
//! Engineering Change Orders applied to a design that has already been
//! placed and routed.
//!
//! # Modules
//!
//! - [`data`] — the physical netlist (`PnrCell`/`PnrNet`/`PnrPin`).
//! - [`routing`] — the negotiated-congestion router and its cost model.
//! - [`eco`] — `connect`/`disconnect`/`create_cell`/`remove_cell`/`create_net`.
//! - [`timing_bridge`] — converts a routed netlist into a `TimingGraph` for STA.
//! - [`adapters`] — seams for clock routing, static-net routing, delay
//!   estimation, and timing feedback that this crate calls but does not
//!   itself implement.
//!
//! # Usage
//!
//! ```ignore
//! use aion_pnr::routing::{self, config::RouterConfig};
//!
//! let config = RouterConfig::default();
//! let report = routing::route(&mut netlist, &*arch, &config, &sink);
//! assert!(netlist.is_fully_routed());
//! ```

#![warn(missing_docs)]

pub mod adapters;
pub mod data;
pub mod eco;
pub mod ids;
pub mod route_tree;
pub mod routing;
pub mod timing_bridge;

pub use data::{
    BramConfig, DspConfig, PllConfig, PnrCell, PnrCellType, PnrNet, PnrNetlist, PnrPin,
    PortDirection, StaticNetKind,
};
pub use eco::{
    connect, create_cell, create_net, create_static_net, disconnect, remove_cell, DeferredRemovals,
    EcoError, SitePinInst,
};
pub use ids::{PnrCellId, PnrNetId, PnrPinId};
pub use route_tree::{RouteNode, RouteResource, RouteTree};
pub use routing::config::RouterConfig;
pub use routing::router::RouteReport;
pub use timing_bridge::build_timing_graph;
