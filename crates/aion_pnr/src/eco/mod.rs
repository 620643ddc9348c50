//! Netlist and physical-coherence ECO (Engineering Change Order) operators.
//!
//! An ECO is a small, surgical mutation of an already placed-and-routed
//! design: disconnecting a pin, rewiring it to a different net, swapping a
//! cell, adding a scratch gate. Each operator here keeps the logical
//! netlist (`crate::data::PnrNetlist`) and the physical routing/placement
//! view consistent, deferring the actual teardown of freed physical
//! resources via [`DeferredRemovals`] so a disconnect immediately followed
//! by a reconnect to the same site pin costs nothing extra.

mod cells;
mod connect;
mod deferred;
mod disconnect;
mod error;

pub use cells::{create_cell, create_net, create_static_net, remove_cell};
pub use connect::connect;
pub use deferred::{DeferredRemovals, SitePinInst};
pub use disconnect::disconnect;
pub use error::EcoError;
