//! Site pins and deferred physical removals.
//!
//! ECO operators mutate the logical netlist and physical routing in lock
//! step, but a physical resource freed by one step of a multi-step ECO
//! (e.g. `disconnect` followed by `connect` to the same site pin) should
//! not be torn down and rebuilt if the next step reclaims it. Removals are
//! recorded in a [`DeferredRemovals`] map and only actually applied once
//! the whole operator has finished deciding what the netlist's final shape
//! is.

use aion_arch::ids::SiteId;
use crate::data::PortDirection;
use std::collections::HashSet;
use std::fmt;

/// A physical pin instance: a named pin on a placed site.
///
/// Displays the way RapidWright-style tooling logs them, e.g.
/// `"IN SLICE_X13Y237.E_I"` or `"OUT SLICE_X16Y239.EQ"` — direction, the
/// synthesized site name, and the pin name. Identity (`Eq`/`Hash`) is
/// `(site, pin_name)` only: `site_col`/`site_row` are display metadata that
/// may be filled with a placeholder by callers without `Architecture`
/// access, and must not affect whether two `SitePinInst`s refer to the same
/// physical resource.
#[derive(Debug, Clone)]
pub struct SitePinInst {
    /// Direction of this pin instance relative to the net.
    pub direction: PortDirection,
    /// The site the pin lives on.
    pub site: SiteId,
    /// Column of the site's tile (used to synthesize a display name).
    pub site_col: u32,
    /// Row of the site's tile (used to synthesize a display name).
    pub site_row: u32,
    /// The BEL pin name (e.g. `"E_I"`, `"EQ"`).
    pub pin_name: String,
}

impl PartialEq for SitePinInst {
    fn eq(&self, other: &Self) -> bool {
        self.site == other.site && self.pin_name == other.pin_name
    }
}

impl Eq for SitePinInst {}

impl std::hash::Hash for SitePinInst {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.site.hash(state);
        self.pin_name.hash(state);
    }
}

impl SitePinInst {
    /// Creates a site pin instance from placement coordinates.
    pub fn new(
        direction: PortDirection,
        site: SiteId,
        site_col: u32,
        site_row: u32,
        pin_name: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            site,
            site_col,
            site_row,
            pin_name: pin_name.into(),
        }
    }

    /// The synthesized site name, e.g. `"SLICE_X13Y237"`.
    pub fn site_name(&self) -> String {
        format!("SLICE_X{}Y{}", self.site_col, self.site_row)
    }
}

impl fmt::Display for SitePinInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            PortDirection::Input | PortDirection::InOut => "IN",
            PortDirection::Output => "OUT",
        };
        write!(f, "{dir} {}.{}", self.site_name(), self.pin_name)
    }
}

/// Physical resources an in-progress ECO operation has decided to tear
/// down, applied only once the operator completes successfully.
///
/// Deferring removal lets `disconnect` followed by `connect` to the same
/// site pin within one ECO call avoid a spurious unroute/reroute of a
/// resource that ends up unchanged.
#[derive(Debug, Clone, Default)]
pub struct DeferredRemovals {
    site_pins: HashSet<SitePinInst>,
    nets_to_unroute: HashSet<crate::ids::PnrNetId>,
}

impl DeferredRemovals {
    /// Creates an empty deferred-removals set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a site pin as a removal candidate.
    pub fn mark_site_pin(&mut self, pin: SitePinInst) {
        self.site_pins.insert(pin);
    }

    /// Cancels a previously marked site-pin removal (e.g. a later `connect`
    /// in the same operation reclaimed it).
    pub fn unmark_site_pin(&mut self, pin: &SitePinInst) {
        self.site_pins.remove(pin);
    }

    /// Marks a net's route as needing to be torn down.
    pub fn mark_net_unroute(&mut self, net: crate::ids::PnrNetId) {
        self.nets_to_unroute.insert(net);
    }

    /// Returns every site pin still marked for removal.
    pub fn pending_site_pins(&self) -> impl Iterator<Item = &SitePinInst> {
        self.site_pins.iter()
    }

    /// Returns every net still marked for unroute.
    pub fn pending_unroutes(&self) -> impl Iterator<Item = &crate::ids::PnrNetId> {
        self.nets_to_unroute.iter()
    }

    /// Returns whether anything is still pending removal.
    pub fn is_empty(&self) -> bool {
        self.site_pins.is_empty() && self.nets_to_unroute.is_empty()
    }
}
