//! End-to-end ECO scenarios against a synthetic netlist fixture.
//!
//! There is no EDIF/checkpoint reader in this workspace, so these tests
//! build small `PnrNetlist` fixtures directly rather than loading a real
//! design; fixture cell/net/pin names mirror the hierarchical paths a real
//! design would use so the scenarios read the same way a checkpoint-driven
//! test would.

use aion_arch::ids::SiteId;
use aion_common::LogicVec;
use aion_pnr::{
    connect, create_cell, create_net, create_static_net, disconnect, remove_cell, DeferredRemovals,
    EcoError, PnrCell, PnrCellId, PnrCellType, PnrNet, PnrNetId, PnrNetlist, PnrPin, PnrPinId,
    PortDirection, RouterConfig, StaticNetKind,
};

fn lut_cell(name: &str, site: u32) -> PnrCell {
    PnrCell {
        id: PnrCellId::from_raw(0),
        name: name.into(),
        cell_type: PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) },
        placement: Some(SiteId::from_raw(site)),
        is_fixed: false,
        removed: false,
    }
}

fn flop_cell(name: &str, site: u32) -> PnrCell {
    PnrCell {
        id: PnrCellId::from_raw(0),
        name: name.into(),
        cell_type: PnrCellType::Dff,
        placement: Some(SiteId::from_raw(site)),
        is_fixed: false,
        removed: false,
    }
}

fn pin(name: &str, direction: PortDirection, cell: PnrCellId) -> PnrPin {
    PnrPin { id: PnrPinId::from_raw(0), name: name.into(), direction, cell, net: None, removed: false }
}

fn net(name: &str, driver: PnrPinId) -> PnrNet {
    PnrNet {
        id: PnrNetId::from_raw(0),
        name: name.into(),
        driver,
        sinks: vec![],
        routing: None,
        timing_critical: false,
        preserved: false,
        is_static: None,
        removed: false,
    }
}

/// Scenario 1: disconnecting an internal sink (both ends unplaced, so the
/// net never touches the physical fabric) drops the sink from the net and
/// leaves the site-pin deferred set empty.
#[test]
fn disconnect_internal_sink_leaves_deferred_site_pins_empty() {
    let mut nl = PnrNetlist::new();
    let carry = nl.add_cell(PnrCell { placement: None, ..lut_cell("processor/parity_muxcy_CARRY4_CARRY8", 0) });
    let out = nl.add_pin(pin("CO0", PortDirection::Output, carry));
    let n = nl.add_net(net("processor/parity_net", out));
    nl.pin_mut(out).net = Some(n);

    let sink_cell = nl.add_cell(PnrCell { placement: None, ..lut_cell("processor/parity_muxcy_CARRY4_CARRY8_sink", 1) });
    let sink = nl.add_pin(pin("S1", PortDirection::Input, sink_cell));
    nl.pin_mut(sink).net = Some(n);
    nl.net_mut(n).sinks.push(sink);

    let sinks_before = nl.net(n).sinks.len();
    let mut deferred = DeferredRemovals::new();
    disconnect(&mut nl, "processor/parity_muxcy_CARRY4_CARRY8_sink/S1", &mut deferred).unwrap();

    assert_eq!(nl.net(n).sinks.len(), sinks_before - 1);
    assert_eq!(deferred.pending_site_pins().count(), 0);
}

/// Scenario 2: disconnecting an externally routed 2-pin input detaches the
/// sink and defers exactly its own site pin.
#[test]
fn disconnect_externally_routed_input_defers_one_site_pin() {
    let mut nl = PnrNetlist::new();
    let driver_cell = nl.add_cell(lut_cell("processor/driver", 0));
    let driver_pin = nl.add_pin(pin("Q", PortDirection::Output, driver_cell));
    let n = nl.add_net(net("processor/clk_net", driver_pin));
    nl.pin_mut(driver_pin).net = Some(n);

    let flop = nl.add_cell(flop_cell("processor/t_state1_flop", 13));
    let d_pin = nl.add_pin(pin("D", PortDirection::Input, flop));
    nl.pin_mut(d_pin).net = Some(n);
    nl.net_mut(n).sinks.push(d_pin);

    let mut deferred = DeferredRemovals::new();
    disconnect(&mut nl, "processor/t_state1_flop/D", &mut deferred).unwrap();

    assert!(nl.pin(d_pin).net.is_none());
    assert_eq!(deferred.pending_site_pins().count(), 1);
}

/// Scenario 3: disconnecting an externally routed multi-sink driver defers
/// the driver's own site pin plus every one of its sinks' site pins, since
/// the whole net's physical route is now stale.
#[test]
fn disconnect_multi_sink_driver_defers_driver_and_every_sink() {
    let mut nl = PnrNetlist::new();
    let mux_cell = nl.add_cell(lut_cell("processor/alu_mux_sel0_flop", 16));
    let q_pin = nl.add_pin(pin("Q", PortDirection::Output, mux_cell));
    let n = nl.add_net(net("processor/alu_mux_sel0", q_pin));
    nl.pin_mut(q_pin).net = Some(n);

    let sink_names_and_sites = [("processor/sink_a", 15u32, "G6"), ("processor/sink_b", 17u32, "B6")];
    for (path, site, pin_name) in sink_names_and_sites {
        let cell = nl.add_cell(lut_cell(path, site));
        let sink_pin = nl.add_pin(pin(pin_name, PortDirection::Input, cell));
        nl.pin_mut(sink_pin).net = Some(n);
        nl.net_mut(n).sinks.push(sink_pin);
    }
    let sinks_before = nl.net(n).sinks.clone();

    let mut deferred = DeferredRemovals::new();
    disconnect(&mut nl, "processor/alu_mux_sel0_flop/Q", &mut deferred).unwrap();

    // Driver's own site pin + both sinks' site pins.
    assert_eq!(deferred.pending_site_pins().count(), 3);
    // The sinks are still logically wired to the net; only the driver left.
    assert_eq!(nl.net(n).sinks, sinks_before);
    assert!(nl.pin(q_pin).net.is_none());
}

/// Scenario 4: disconnecting a pin against a static (GND) net defers
/// exactly that pin's site pin under the static net's own identity.
#[test]
fn disconnect_against_static_net() {
    let mut nl = PnrNetlist::new();
    let gnd_cell = nl.add_cell(PnrCell {
        cell_type: PnrCellType::StaticSource(StaticNetKind::Gnd),
        ..lut_cell("processor/gnd_src", 0)
    });
    let gnd_driver = nl.add_pin(pin("O", PortDirection::Output, gnd_cell));
    let gnd = create_static_net(&mut nl, StaticNetKind::Gnd);
    nl.net_mut(gnd).driver = gnd_driver;
    nl.pin_mut(gnd_driver).net = Some(gnd);

    let mux_cell = nl.add_cell(lut_cell("processor/address_loop[10].output_data.pc_vector_mux_lut", 13));
    let i0 = nl.add_pin(pin("I0", PortDirection::Input, mux_cell));
    nl.pin_mut(i0).net = Some(gnd);
    nl.net_mut(gnd).sinks.push(i0);

    let mut deferred = DeferredRemovals::new();
    disconnect(&mut nl, "processor/address_loop[10].output_data.pc_vector_mux_lut/I0", &mut deferred)
        .unwrap();

    assert_eq!(deferred.pending_site_pins().count(), 1);
    assert!(!nl.net(gnd).sinks.contains(&i0));
}

/// Scenario 5: connecting many previously-disconnected inputs to new nets
/// leaves each new net's leaf set equal to the single pin it was just
/// given, and each net remains reroute-eligible (unrouted) afterward.
#[test]
fn connect_many_disconnected_inputs_to_new_nets() {
    let mut nl = PnrNetlist::new();
    let ila_cell = nl.add_cell(lut_cell("base_mb_i/ila_0", 20));

    const COUNT: usize = 14;
    let mut input_pins = Vec::with_capacity(COUNT);
    for i in 0..COUNT {
        input_pins.push(nl.add_pin(pin(&format!("PROBE{i}"), PortDirection::Input, ila_cell)));
    }

    let driver_cell = nl.add_cell(lut_cell("base_mb_i/data_addr_driver", 21));
    let driver_pin = nl.add_pin(pin("O", PortDirection::Output, driver_cell));

    let config = RouterConfig::default();
    let mut deferred = DeferredRemovals::new();
    let mut new_nets = Vec::with_capacity(COUNT);
    for (i, &input_pin) in input_pins.iter().enumerate() {
        let net_name = format!("base_mb_i/data_addr_net_{}", 74 + i);
        let net_id = create_net(&mut nl, &net_name);
        nl.net_mut(net_id).driver = driver_pin;
        nl.pin_mut(driver_pin).net = Some(net_id);

        let pin_ref = format!("base_mb_i/ila_0/PROBE{i}");
        connect(&mut nl, &pin_ref, &net_name, &config, &mut deferred, &aion_diagnostics::DiagnosticSink::new())
            .unwrap();
        new_nets.push(net_id);
    }

    for (net_id, &input_pin) in new_nets.iter().zip(&input_pins) {
        assert_eq!(nl.net(*net_id).sinks, vec![input_pin]);
        assert!(nl.net(*net_id).routing.is_none());
    }

    let unrouted = nl.nets.iter().filter(|n| !n.removed && !n.sinks.is_empty() && n.routing.is_none()).count();
    assert_eq!(unrouted, COUNT);
}

/// Round-trip: `disconnect` followed by `connect` back to the same net
/// leaves that net's leaf pin set unchanged.
#[test]
fn disconnect_then_reconnect_is_idempotent_on_leaf_set() {
    let mut nl = PnrNetlist::new();
    let driver_cell = nl.add_cell(lut_cell("lut_0", 0));
    let driver_pin = nl.add_pin(pin("O", PortDirection::Output, driver_cell));
    let n = nl.add_net(net("net_0", driver_pin));
    nl.pin_mut(driver_pin).net = Some(n);

    let sink_cell = nl.add_cell(lut_cell("lut_1", 1));
    let sink_pin = nl.add_pin(pin("I0", PortDirection::Input, sink_cell));
    nl.pin_mut(sink_pin).net = Some(n);
    nl.net_mut(n).sinks.push(sink_pin);

    let leaves_before = nl.net(n).sinks.clone();

    let config = RouterConfig::default();
    let sink = aion_diagnostics::DiagnosticSink::new();
    let mut deferred = DeferredRemovals::new();
    disconnect(&mut nl, "lut_1/I0", &mut deferred).unwrap();
    connect(&mut nl, "lut_1/I0", "net_0", &config, &mut deferred, &sink).unwrap();

    assert_eq!(nl.net(n).sinks, leaves_before);
}

/// `create_cell`/`remove_cell` is an identity on the set of hierarchical
/// cell instances: creating then removing a cell returns the instance
/// count to what it was before.
#[test]
fn create_then_remove_cell_is_identity_on_instance_count() {
    let mut nl = PnrNetlist::new();
    nl.add_cell(lut_cell("lut_0", 0));
    let before = nl.cell_count();

    let id = create_cell(&mut nl, "lut_new", PnrCellType::Lut { inputs: 4, init: LogicVec::from_bool(false) });
    assert_eq!(nl.cell_count(), before + 1);

    let mut deferred = DeferredRemovals::new();
    remove_cell(&mut nl, "lut_new", &mut deferred).unwrap();
    assert_eq!(nl.cell_count(), before);
    assert!(nl.find_cell("lut_new").is_none());
    let _ = id;
}

/// `remove_cell` on an instance that doesn't exist is a `CellNotFound`
/// error, not a panic.
#[test]
fn remove_cell_unknown_path_is_an_error_not_a_panic() {
    let mut nl = PnrNetlist::new();
    let mut deferred = DeferredRemovals::new();
    let err = remove_cell(&mut nl, "processor/does_not_exist", &mut deferred).unwrap_err();
    assert_eq!(err, EcoError::CellNotFound { path: "processor/does_not_exist".into() });
}
