//! Router configuration.
//!
//! All tunables for the negotiated-congestion router live in one
//! `serde`-deserializable struct so a run can be driven from a checkpoint
//! sidecar file (TOML) or constructed directly in Rust for embedding.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the negotiated-congestion router.
///
/// Field names and defaults mirror RapidWright's `RWRoute` configuration
/// knobs; see the router loop in `routing::router` for how each one is
/// consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum number of rip-up-and-reroute iterations before giving up.
    pub max_iterations: u32,
    /// Initial value of the present-congestion cost factor.
    pub initial_present_factor: f64,
    /// Multiplier applied to the present-congestion factor each iteration.
    pub present_multiplier: f64,
    /// Weight applied to a node's accumulated historical congestion cost.
    pub historical_factor: f64,
    /// Weight of estimated wirelength in the node cost function.
    pub wl_weight: f64,
    /// Weight of timing criticality in the node cost function.
    pub timing_weight: f64,
    /// Exponent applied to timing criticality before blending into cost.
    pub criticality_exponent: f64,
    /// Criticality floor above which an already-routed, uncongested
    /// connection is still eligible for an optional reroute probe (gated
    /// further by `reroute_percentage`), to search for a cheaper path once
    /// a net turns out to be timing-critical.
    pub min_reroute_criticality: f64,
    /// Fraction of a net's connections rerouted per iteration once the net
    /// has converged once, to probe for cheaper alternate paths.
    pub reroute_percentage: f64,
    /// Exponent applied to the node's sharing factor (number of nets
    /// already using the node) in the present-cost term.
    pub share_exponent: f64,
    /// Extra tiles added to a connection's bounding box beyond the driver/
    /// sink span, to allow detours around congestion.
    pub bounding_box_extension: i32,
    /// Additional horizontal bounding-box extension for connections on
    /// highly congested nets.
    pub enlarge_bbox_horizontal: i32,
    /// Additional vertical bounding-box extension for connections on
    /// highly congested nets.
    pub enlarge_bbox_vertical: i32,
    /// Whether to gate node expansion by the connection's bounding box at all.
    pub use_bounding_box: bool,
    /// Whether to mask nodes that cross the RCLK row out of expansion.
    pub mask_cross_rclk: bool,
    /// Whether U-turn nodes (which double back into the same switchbox)
    /// are permitted during expansion.
    pub use_u_turn_nodes: bool,
    /// Whether per-connection criticality is computed from static timing
    /// analysis (`true`) or left at zero (`false`, pure congestion routing).
    pub timing_driven: bool,
    /// Whether clock nets are routed with left/right symmetry enforced.
    pub symmetric_clk_routing: bool,
    /// Whether existing routes for unmodified nets are preserved rather
    /// than ripped up at the start of a reroute.
    pub soft_preserve: bool,
    /// Cell instance-name prefix that downgrades a shared-site-pin
    /// conflict from a hard `EcoError` to a `Diagnostic::warning` — the
    /// ECO equivalent of a "trust me" override for generated scratch cells.
    pub warn_if_cell_inst_starts_with: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            initial_present_factor: 0.5,
            present_multiplier: 2.0,
            historical_factor: 1.0,
            wl_weight: 1.0,
            timing_weight: 1.0,
            criticality_exponent: 3.0,
            min_reroute_criticality: 0.85,
            reroute_percentage: 0.05,
            share_exponent: 2.0,
            bounding_box_extension: 3,
            enlarge_bbox_horizontal: 1,
            enlarge_bbox_vertical: 1,
            use_bounding_box: true,
            mask_cross_rclk: true,
            use_u_turn_nodes: false,
            timing_driven: true,
            symmetric_clk_routing: true,
            soft_preserve: false,
            warn_if_cell_inst_starts_with: None,
        }
    }
}

impl RouterConfig {
    /// Returns whether `inst_name` is covered by the shared-site-pin
    /// conflict escape hatch.
    pub fn allows_shared_site_pin(&self, inst_name: &str) -> bool {
        self.warn_if_cell_inst_starts_with
            .as_deref()
            .is_some_and(|prefix| inst_name.starts_with(prefix))
    }
}
