//! ECO operator errors.
//!
//! User-actionable failures from the ECO operators (bad references, policy
//! conflicts) are reported as [`EcoError`], distinct from
//! [`aion_common::InternalError`], which is reserved for conditions that
//! indicate a bug in this crate rather than an invalid ECO request.

use thiserror::Error;

/// An error raised by an ECO operator (`disconnect`, `connect`,
/// `create_cell`, `remove_cell`, `create_net`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcoError {
    /// No pin exists at the given hierarchical path.
    #[error("pin not found: {path}")]
    PinNotFound {
        /// The hierarchical `cell/pin` path that was looked up.
        path: String,
    },
    /// No net exists with the given name.
    #[error("net not found: {name}")]
    NetNotFound {
        /// The net name that was looked up.
        name: String,
    },
    /// No cell exists at the given hierarchical path.
    #[error("cell not found: {path}")]
    CellNotFound {
        /// The hierarchical instance path that was looked up.
        path: String,
    },
    /// A site pin is already driven by a different net than the one being
    /// connected, and no wider escape hatch allows sharing it.
    #[error(
        "site pin {site_pin} is already used by net {owner_net}, cannot also drive {requested_net}"
    )]
    SharedSitePinConflict {
        /// The contested site pin, formatted like `"IN SLICE_X13Y237.E_I"`.
        site_pin: String,
        /// The net currently occupying the site pin.
        owner_net: String,
        /// The net that tried to claim the same site pin.
        requested_net: String,
    },
    /// A second driver was connected to a net that isn't a static
    /// (GND/VCC) net — only static nets may legally have more than one
    /// source.
    #[error("net {net} already has a driver; only static nets may have multiple sources")]
    SecondSourceOnNonStaticNet {
        /// The net that already had a driver.
        net: String,
    },
    /// A cell exists in the logical netlist but has no corresponding
    /// physical placement, so an ECO operator touching its physical view
    /// cannot proceed.
    #[error("cell {path} has no physical placement")]
    MissingPhysicalCell {
        /// The hierarchical instance path of the unplaced cell.
        path: String,
    },
}
