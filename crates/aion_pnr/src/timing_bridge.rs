//! Converts a placed-and-routed [`PnrNetlist`] into a [`TimingGraph`] for STA.
//!
//! The timing bridge creates timing graph nodes for cell pins and primary I/O,
//! and edges for cell delays, net delays, and setup/hold checks. This allows
//! the timing analysis engine (in `aion_timing`) to analyze the design without
//! depending on PnR data structures.

use crate::data::{PnrCellType, PnrNetlist, PortDirection};
use aion_arch::types::Delay;
use aion_arch::Architecture;
use aion_timing::graph::{TimingEdgeType, TimingGraph, TimingNodeType};
use aion_timing::ids::TimingNodeId;
use std::collections::HashMap;

/// Builds a [`TimingGraph`] from a placed-and-routed netlist and architecture model.
///
/// Creates timing nodes for each cell pin and primary I/O port, and timing
/// edges for cell delays, net delays, and setup/hold checks. The resulting
/// graph can be analyzed by `aion_timing::analyze_timing()`.
pub fn build_timing_graph(netlist: &PnrNetlist, arch: &dyn Architecture) -> TimingGraph {
    let mut graph = TimingGraph::new();
    let mut cell_output_nodes: HashMap<(u32, String), TimingNodeId> = HashMap::new();
    let mut cell_input_nodes: HashMap<(u32, String), TimingNodeId> = HashMap::new();

    // 1. Create timing nodes for each cell
    for cell in &netlist.cells {
        if cell.removed {
            continue;
        }
        let cell_idx = cell.id.as_raw();

        match &cell.cell_type {
            PnrCellType::Iobuf { direction, .. } => {
                let node_type = match direction {
                    PortDirection::Input => TimingNodeType::PrimaryInput,
                    PortDirection::Output => TimingNodeType::PrimaryOutput,
                    PortDirection::InOut => TimingNodeType::PrimaryInput,
                };
                let node = graph.add_node(cell.name.clone(), node_type);
                // IO cell has one pin — map as both input and output for connectivity
                match direction {
                    PortDirection::Input => {
                        cell_output_nodes.insert((cell_idx, "O".into()), node);
                    }
                    PortDirection::Output => {
                        cell_input_nodes.insert((cell_idx, "I".into()), node);
                    }
                    PortDirection::InOut => {
                        cell_output_nodes.insert((cell_idx, "O".into()), node);
                        cell_input_nodes.insert((cell_idx, "I".into()), node);
                    }
                }
            }
            PnrCellType::Lut { .. } | PnrCellType::Carry => {
                // LUT: inputs → cell delay → output
                let out_node = graph.add_node(format!("{}/O", cell.name), TimingNodeType::CellPin);
                cell_output_nodes.insert((cell_idx, "O".into()), out_node);

                // Create input nodes and cell delay edges
                let cell_delay = arch.cell_delay("LUT");
                for i in 0..6 {
                    let pin_name = format!("I{i}");
                    let in_node = graph
                        .add_node(format!("{}/{pin_name}", cell.name), TimingNodeType::CellPin);
                    cell_input_nodes.insert((cell_idx, pin_name), in_node);
                    graph.add_edge(in_node, out_node, cell_delay, TimingEdgeType::CellDelay);
                }
            }
            PnrCellType::Dff => {
                // FF: D input, CLK input, Q output
                let d_node = graph.add_node(format!("{}/D", cell.name), TimingNodeType::CellPin);
                let q_node = graph.add_node(format!("{}/Q", cell.name), TimingNodeType::CellPin);
                let clk_node =
                    graph.add_node(format!("{}/CLK", cell.name), TimingNodeType::CellPin);

                cell_input_nodes.insert((cell_idx, "D".into()), d_node);
                cell_input_nodes.insert((cell_idx, "CLK".into()), clk_node);
                cell_output_nodes.insert((cell_idx, "Q".into()), q_node);

                // Clock-to-Q delay
                let clk_to_q = arch.clock_to_out("DFF");
                graph.add_edge(clk_node, q_node, clk_to_q, TimingEdgeType::ClockToQ);

                // Setup check
                let setup = arch.setup_time("DFF");
                graph.add_edge(clk_node, d_node, setup, TimingEdgeType::SetupCheck);

                // Hold check
                let hold = arch.hold_time("DFF");
                graph.add_edge(clk_node, d_node, hold, TimingEdgeType::HoldCheck);
            }
            _ => {
                // Generic: single input → single output with cell delay
                let in_node = graph.add_node(format!("{}/I", cell.name), TimingNodeType::CellPin);
                let out_node = graph.add_node(format!("{}/O", cell.name), TimingNodeType::CellPin);
                cell_input_nodes.insert((cell_idx, "I".into()), in_node);
                cell_output_nodes.insert((cell_idx, "O".into()), out_node);
                let delay = arch.cell_delay(&format!("{:?}", cell.cell_type));
                graph.add_edge(in_node, out_node, delay, TimingEdgeType::CellDelay);
            }
        }
    }

    // 2. Create net delay edges
    for net in &netlist.nets {
        if net.removed || net.sinks.is_empty() {
            continue;
        }
        let driver_pin = netlist.pin(net.driver);
        let driver_cell_idx = driver_pin.cell.as_raw();

        // Find the output node for the driver
        let driver_node = cell_output_nodes
            .get(&(driver_cell_idx, driver_pin.name.clone()))
            .or_else(|| {
                // Try generic output pin name
                cell_output_nodes.get(&(driver_cell_idx, "O".into()))
            });

        let Some(&src_node) = driver_node else {
            continue;
        };

        // Estimate net delay from routing
        let net_delay = estimate_net_delay(netlist, net, arch);

        for &sink_pin_id in &net.sinks {
            let sink_pin = netlist.pin(sink_pin_id);
            let sink_cell_idx = sink_pin.cell.as_raw();

            let sink_node = cell_input_nodes
                .get(&(sink_cell_idx, sink_pin.name.clone()))
                .or_else(|| {
                    // Try generic input pin names
                    cell_input_nodes
                        .get(&(sink_cell_idx, "I".into()))
                        .or_else(|| cell_input_nodes.get(&(sink_cell_idx, "I0".into())))
                        .or_else(|| cell_input_nodes.get(&(sink_cell_idx, "D".into())))
                });

            if let Some(&dst_node) = sink_node {
                graph.add_edge(src_node, dst_node, net_delay, TimingEdgeType::NetDelay);
            }
        }
    }

    graph
}

/// Estimates the net delay based on placement distance and routing resources.
fn estimate_net_delay(
    netlist: &PnrNetlist,
    net: &crate::data::PnrNet,
    _arch: &dyn Architecture,
) -> Delay {
    // Estimate delay from placement distance (Manhattan distance heuristic)
    let driver_pin = netlist.pin(net.driver);
    let driver_cell = netlist.cell(driver_pin.cell);

    let Some(driver_site) = driver_cell.placement else {
        return Delay::ZERO;
    };

    let mut max_distance: u32 = 0;
    let grid_width = 100;

    for &sink_pin_id in &net.sinks {
        let sink_pin = netlist.pin(sink_pin_id);
        let sink_cell = netlist.cell(sink_pin.cell);
        if let Some(sink_site) = sink_cell.placement {
            let dx = (driver_site.as_raw() % grid_width).abs_diff(sink_site.as_raw() % grid_width);
            let dy = (driver_site.as_raw() / grid_width).abs_diff(sink_site.as_raw() / grid_width);
            max_distance = max_distance.max(dx + dy);
        }
    }

    // Rough estimate: 0.1 ns per unit distance
    let delay_ns = max_distance as f64 * 0.1;
    Delay::new(delay_ns * 0.5, delay_ns, delay_ns * 1.5)
}
