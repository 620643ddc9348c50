//! The `disconnect` ECO operator.

use crate::data::PnrNetlist;
use crate::eco::deferred::{DeferredRemovals, SitePinInst};
use crate::eco::error::EcoError;
use crate::ids::PnrPinId;
use aion_arch::ids::SiteId;

/// Disconnects the pin at `pin_ref` (a `"cell/pin"` hierarchical path) from
/// whatever net it is currently wired to.
///
/// Clears the pin's `net` field, removes it from its former net's driver or
/// sinks list, and records the affected net and (if the pin is placed) its
/// site pin as deferred-removal candidates: the net's route is stale and
/// needs rerouting, and the site pin may be reclaimed by a subsequent
/// `connect` in the same ECO transaction without ever being physically torn
/// down.
pub fn disconnect(
    netlist: &mut PnrNetlist,
    pin_ref: &str,
    deferred: &mut DeferredRemovals,
) -> Result<(), EcoError> {
    let pin_id = netlist
        .find_pin(pin_ref)
        .ok_or_else(|| EcoError::PinNotFound { path: pin_ref.to_string() })?;

    let Some(net_id) = netlist.pin(pin_id).net else {
        return Ok(());
    };

    detach(netlist, pin_id, deferred);
    deferred.mark_net_unroute(net_id);
    Ok(())
}

/// Shared by `disconnect` and `connect` (which disconnects a pin's previous
/// net before attaching it to a new one): removes `pin_id` from its current
/// net's driver/sinks and clears `pin.net`, without touching the deferred
/// net-unroute set (the caller decides whether that's needed).
///
/// Detaching a net's driver invalidates the physical route to every sink
/// that the signal actually leaves the driver's site to reach — a sink
/// sharing the driver's site was never routed through a site pin in the
/// first place, so detaching the driver doesn't touch it. A driver-less net
/// is left with its sinks intact; `connect` or `create_net` callers are
/// responsible for giving it a new driver if needed.
pub(crate) fn detach(netlist: &mut PnrNetlist, pin_id: PnrPinId, deferred: &mut DeferredRemovals) {
    let Some(net_id) = netlist.pin(pin_id).net else {
        return;
    };

    let driver_id = netlist.net(net_id).driver;
    let driver_site = driver_site_of(netlist, net_id);
    let is_driver = driver_id == pin_id;

    if is_driver {
        for sink_id in netlist.net(net_id).sinks.clone() {
            if pin_differs_from_site(netlist, driver_site, sink_id) {
                if let Some(site_pin) = site_pin_of(netlist, sink_id) {
                    deferred.mark_site_pin(site_pin);
                }
            }
        }
    }

    let net = netlist.net_mut(net_id);
    net.sinks.retain(|&s| s != pin_id);

    netlist.pin_mut(pin_id).net = None;

    // The driver's own site pin is only consumed once the net reaches
    // outside its site through at least one remaining sink; a sink's site
    // pin is consumed iff that sink itself sits on a different site than
    // the driver.
    let defer_this_pin = if is_driver {
        netlist
            .net(net_id)
            .sinks
            .iter()
            .any(|&s| pin_differs_from_site(netlist, driver_site, s))
    } else {
        pin_differs_from_site(netlist, driver_site, pin_id)
    };

    if defer_this_pin {
        if let Some(site_pin) = site_pin_of(netlist, pin_id) {
            deferred.mark_site_pin(site_pin);
        }
    }
}

/// Returns the driver's placed site for `net_id`, if placed.
fn driver_site_of(netlist: &PnrNetlist, net_id: crate::ids::PnrNetId) -> Option<SiteId> {
    let driver = netlist.pin(netlist.net(net_id).driver);
    netlist.cell(driver.cell).placement
}

/// Returns whether `pin_id`'s cell sits on a different site than `site`
/// (or either end is unplaced, which is conservatively treated as "differs"
/// since there is then no intra-site guarantee).
fn pin_differs_from_site(netlist: &PnrNetlist, site: Option<SiteId>, pin_id: PnrPinId) -> bool {
    match site {
        None => true,
        Some(site) => netlist.cell(netlist.pin(pin_id).cell).placement != Some(site),
    }
}

/// Derives the physical site pin a logical pin resolves to, if its owning
/// cell is placed.
pub(crate) fn site_pin_of(netlist: &PnrNetlist, pin_id: PnrPinId) -> Option<SitePinInst> {
    let pin = netlist.pin(pin_id);
    let cell = netlist.cell(pin.cell);
    let site = cell.placement?;
    // Device-level site coordinates aren't available without an
    // `Architecture` handle here; site pin identity for conflict-detection
    // purposes only needs to be unique per (site, pin name), so col/row are
    // filled in by callers that have architecture access via
    // `SitePinInst::new` directly when precise display text matters.
    Some(SitePinInst::new(pin.direction, site, 0, 0, pin.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PnrCell, PnrCellType, PnrNet, PnrPin, PortDirection};
    use crate::ids::{PnrCellId, PnrNetId};
    use aion_arch::ids::SiteId;
    use aion_common::LogicVec;

    fn fixture() -> (PnrNetlist, PnrPinId, PnrNetId) {
        let mut nl = PnrNetlist::new();
        let cell = nl.add_cell(PnrCell {
            id: PnrCellId::from_raw(0),
            name: "lut_0".into(),
            cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
            placement: Some(SiteId::from_raw(0)),
            is_fixed: false,
            removed: false,
        });
        let pin = nl.add_pin(PnrPin {
            id: PnrPinId::from_raw(0),
            name: "O".into(),
            direction: PortDirection::Output,
            cell,
            net: None,
            removed: false,
        });
        let net = nl.add_net(PnrNet {
            id: PnrNetId::from_raw(0),
            name: "net_0".into(),
            driver: pin,
            sinks: vec![],
            routing: None,
            timing_critical: false,
            preserved: false,
            is_static: None,
            removed: false,
        });
        nl.pin_mut(pin).net = Some(net);
        (nl, pin, net)
    }

    #[test]
    fn disconnect_clears_pin_net() {
        let (mut nl, pin, _net) = fixture();
        let mut deferred = DeferredRemovals::new();
        disconnect(&mut nl, "lut_0/O", &mut deferred).unwrap();
        assert!(nl.pin(pin).net.is_none());
        assert!(!deferred.is_empty());
    }

    #[test]
    fn disconnect_unknown_pin_errors() {
        let (mut nl, _pin, _net) = fixture();
        let mut deferred = DeferredRemovals::new();
        let err = disconnect(&mut nl, "nope/O", &mut deferred).unwrap_err();
        assert_eq!(err, EcoError::PinNotFound { path: "nope/O".into() });
    }

    #[test]
    fn disconnect_already_unconnected_pin_is_a_noop() {
        let (mut nl, pin, _net) = fixture();
        nl.pin_mut(pin).net = None;
        let mut deferred = DeferredRemovals::new();
        disconnect(&mut nl, "lut_0/O", &mut deferred).unwrap();
        assert!(deferred.is_empty());
    }

    #[test]
    fn disconnect_removes_sink_from_net() {
        let (mut nl, _driver, net) = fixture();
        let cell2 = nl.add_cell(PnrCell {
            id: PnrCellId::from_raw(0),
            name: "lut_1".into(),
            cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
            placement: Some(SiteId::from_raw(1)),
            is_fixed: false,
            removed: false,
        });
        let sink = nl.add_pin(PnrPin {
            id: PnrPinId::from_raw(0),
            name: "I0".into(),
            direction: PortDirection::Input,
            cell: cell2,
            net: Some(net),
            removed: false,
        });
        nl.net_mut(net).sinks.push(sink);

        let mut deferred = DeferredRemovals::new();
        disconnect(&mut nl, "lut_1/I0", &mut deferred).unwrap();
        assert!(!nl.net(net).sinks.contains(&sink));
    }

    #[test]
    fn disconnect_intra_site_sink_defers_nothing() {
        let (mut nl, _driver, net) = fixture();
        // Same site as the driver (lut_0 is placed at site 0 in `fixture`):
        // the signal never leaves the site, so neither end should get a
        // deferred site pin when the sink is detached.
        let cell2 = nl.add_cell(PnrCell {
            id: PnrCellId::from_raw(0),
            name: "lut_1".into(),
            cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
            placement: Some(SiteId::from_raw(0)),
            is_fixed: false,
            removed: false,
        });
        let sink = nl.add_pin(PnrPin {
            id: PnrPinId::from_raw(0),
            name: "I0".into(),
            direction: PortDirection::Input,
            cell: cell2,
            net: Some(net),
            removed: false,
        });
        nl.net_mut(net).sinks.push(sink);

        let mut deferred = DeferredRemovals::new();
        disconnect(&mut nl, "lut_1/I0", &mut deferred).unwrap();
        assert_eq!(deferred.pending_site_pins().count(), 0);
    }

    #[test]
    fn disconnect_driver_defers_every_sink_site_pin() {
        let (mut nl, _driver, net) = fixture();
        let cell2 = nl.add_cell(PnrCell {
            id: PnrCellId::from_raw(0),
            name: "lut_1".into(),
            cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
            placement: Some(SiteId::from_raw(1)),
            is_fixed: false,
            removed: false,
        });
        let cell3 = nl.add_cell(PnrCell {
            id: PnrCellId::from_raw(0),
            name: "lut_2".into(),
            cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
            placement: Some(SiteId::from_raw(2)),
            is_fixed: false,
            removed: false,
        });
        let sink_a = nl.add_pin(PnrPin {
            id: PnrPinId::from_raw(0),
            name: "G6".into(),
            direction: PortDirection::Input,
            cell: cell2,
            net: Some(net),
            removed: false,
        });
        let sink_b = nl.add_pin(PnrPin {
            id: PnrPinId::from_raw(0),
            name: "B6".into(),
            direction: PortDirection::Input,
            cell: cell3,
            net: Some(net),
            removed: false,
        });
        nl.net_mut(net).sinks.extend([sink_a, sink_b]);

        let mut deferred = DeferredRemovals::new();
        disconnect(&mut nl, "lut_0/O", &mut deferred).unwrap();

        // The driver's own site pin plus both sinks' site pins are deferred.
        assert_eq!(deferred.pending_site_pins().count(), 3);
        // Logically the sinks are still wired; only the driver was detached.
        assert_eq!(nl.net(net).sinks, vec![sink_a, sink_b]);
    }
}
