//! The `create_cell`, `remove_cell`, and `create_net` ECO operators.

use crate::data::{PnrCell, PnrCellType, PnrNet, PnrNetlist, StaticNetKind};
use crate::eco::deferred::DeferredRemovals;
use crate::eco::disconnect::detach;
use crate::eco::error::EcoError;
use crate::ids::{PnrCellId, PnrNetId};

/// Creates a new unplaced cell at hierarchical path `path` with the given
/// type, returning its ID.
///
/// Callers are responsible for placing the cell (via whatever placer is
/// driving the ECO) and wiring its pins with `connect` before routing.
pub fn create_cell(netlist: &mut PnrNetlist, path: &str, cell_type: PnrCellType) -> PnrCellId {
    netlist.add_cell(PnrCell {
        id: PnrCellId::from_raw(0),
        name: path.to_string(),
        cell_type,
        placement: None,
        is_fixed: false,
        removed: false,
    })
}

/// Creates a new, driverless net named `name`, returning its ID.
///
/// The net has no driver pin until a subsequent `connect` attaches an
/// output pin to it; `is_fully_routed` on a netlist containing such a net
/// treats it as trivially satisfied (no sinks yet). Driver is initialized
/// to pin `0`, a placeholder overwritten by the first `connect`; nothing
/// reads it before then since the net has no sinks to route.
pub fn create_net(netlist: &mut PnrNetlist, name: &str) -> PnrNetId {
    netlist.add_net(PnrNet {
        id: PnrNetId::from_raw(0),
        name: name.to_string(),
        driver: crate::ids::PnrPinId::from_raw(0),
        sinks: vec![],
        routing: None,
        timing_critical: false,
        preserved: false,
        is_static: None,
        removed: false,
    })
}

/// Creates a new, driverless static (GND/VCC) net.
pub fn create_static_net(netlist: &mut PnrNetlist, kind: StaticNetKind) -> PnrNetId {
    let id = create_net(netlist, kind.net_name());
    netlist.net_mut(id).is_static = Some(kind);
    id
}

/// Removes the cell at hierarchical path `path`: disconnects and tombstones
/// every one of its pins, then tombstones the cell itself.
///
/// Each disconnected pin's former net is marked for deferred removal the
/// same way `disconnect` does, so a net left driverless or sinkless by this
/// removal is reroute-eligible rather than silently left with a stale
/// [`crate::route_tree::RouteTree`].
pub fn remove_cell(
    netlist: &mut PnrNetlist,
    path: &str,
    deferred: &mut DeferredRemovals,
) -> Result<(), EcoError> {
    let cell_id = netlist
        .find_cell(path)
        .ok_or_else(|| EcoError::CellNotFound { path: path.to_string() })?;

    for pin_id in netlist.pins_of_cell(cell_id) {
        if let Some(net_id) = netlist.pin(pin_id).net {
            detach(netlist, pin_id, deferred);
            deferred.mark_net_unroute(net_id);
        }
        netlist.pin_mut(pin_id).removed = true;
    }

    netlist.tombstone_cell(cell_id);
    Ok(())
}
