//! The `connect` ECO operator.

use crate::data::{PnrNetlist, PortDirection};
use crate::eco::deferred::{DeferredRemovals, SitePinInst};
use crate::eco::disconnect::{detach, site_pin_of};
use crate::eco::error::EcoError;
use crate::ids::PnrPinId;
use crate::routing::config::RouterConfig;
use aion_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

/// Connects the pin at `pin_ref` to `net_name`, detaching it from any prior
/// net first.
///
/// An output pin becoming a net's second driver is rejected with
/// [`EcoError::SecondSourceOnNonStaticNet`] unless the net is static
/// (GND/VCC), which may legally have multiple sources. If the pin's site
/// pin is already claimed by a different net, the conflict is a hard
/// [`EcoError::SharedSitePinConflict`] unless `config` names a matching
/// [`RouterConfig::allows_shared_site_pin`] prefix, in which case it is
/// downgraded to a warning and the connection proceeds.
///
/// Reclaims a matching pending removal in `deferred` (e.g. a `disconnect`
/// earlier in the same ECO transaction freed this exact site pin) rather
/// than leaving it to be physically torn down and rebuilt, and marks the
/// net for reroute.
pub fn connect(
    netlist: &mut PnrNetlist,
    pin_ref: &str,
    net_name: &str,
    config: &RouterConfig,
    deferred: &mut DeferredRemovals,
    sink: &DiagnosticSink,
) -> Result<(), EcoError> {
    let pin_id = netlist
        .find_pin(pin_ref)
        .ok_or_else(|| EcoError::PinNotFound { path: pin_ref.to_string() })?;
    let net_id = netlist
        .find_net(net_name)
        .ok_or_else(|| EcoError::NetNotFound { name: net_name.to_string() })?;

    let pin = netlist.pin(pin_id);
    let direction = pin.direction;
    let cell_path = netlist.cell(pin.cell).name.clone();

    if matches!(direction, PortDirection::Output | PortDirection::InOut) {
        let net = netlist.net(net_id);
        // `net.driver` is a placeholder pin ID on a net created by
        // `create_net` that has never had a real driver attached; only
        // treat it as occupied if that pin is actually wired to this net.
        let has_driver = net.driver != pin_id
            && netlist
                .pins
                .get(net.driver.as_raw() as usize)
                .is_some_and(|p| !p.removed && p.net == Some(net_id));
        if has_driver && net.is_static.is_none() {
            return Err(EcoError::SecondSourceOnNonStaticNet { net: net_name.to_string() });
        }
    }

    if let Some(candidate) = site_pin_of(netlist, pin_id) {
        if let Some(conflict) = conflicting_owner(netlist, &candidate, pin_id, net_id) {
            let (owner_net, requested_net) = (conflict, net_name.to_string());
            if config.allows_shared_site_pin(&cell_path) {
                sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Convention, 1),
                    format!(
                        "site pin {candidate} shared between net {owner_net} and {requested_net} \
                         (allowed by escape hatch for {cell_path})"
                    ),
                    aion_source::Span::DUMMY,
                ));
            } else {
                return Err(EcoError::SharedSitePinConflict {
                    site_pin: candidate.to_string(),
                    owner_net,
                    requested_net,
                });
            }
        }
    }

    detach(netlist, pin_id, deferred);

    let net = netlist.net_mut(net_id);
    match direction {
        PortDirection::Output => net.driver = pin_id,
        PortDirection::Input | PortDirection::InOut => {
            if !net.sinks.contains(&pin_id) {
                net.sinks.push(pin_id);
            }
        }
    }
    netlist.pin_mut(pin_id).net = Some(net_id);

    if let Some(site_pin) = site_pin_of(netlist, pin_id) {
        deferred.unmark_site_pin(&site_pin);
    }
    deferred.mark_net_unroute(net_id);
    Ok(())
}

/// Returns the name of the net already occupying `candidate`'s physical
/// site pin, if it's a net other than `net_id` and the pin isn't `pin_id`
/// itself.
fn conflicting_owner(
    netlist: &PnrNetlist,
    candidate: &SitePinInst,
    pin_id: PnrPinId,
    net_id: crate::ids::PnrNetId,
) -> Option<String> {
    netlist
        .pins
        .iter()
        .filter(|p| !p.removed && p.id != pin_id)
        .filter_map(|p| p.net.map(|n| (p, n)))
        .filter(|&(_, n)| n != net_id)
        .find_map(|(p, n)| {
            let other = site_pin_of(netlist, p.id)?;
            if &other == candidate {
                Some(netlist.net(n).name.clone())
            } else {
                None
            }
        })
}
