//! Preservation map for soft-preserve rip-up-and-reroute.
//!
//! When `RouterConfig::soft_preserve` is set, nets whose route is already
//! legal and not part of this iteration's rip-up set keep their existing
//! wires claimed rather than being ripped up and rerouted from scratch.
//! [`PreservationMap`] records which net owns which node so the router can
//! decide, node by node, whether an expansion would collide with a
//! preserved net.

use crate::ids::PnrNetId;
use aion_arch::ids::WireId;
use std::collections::HashMap;

/// Tracks which net currently preserves each node (wire).
///
/// A node with no entry is free for any net to claim. A node present here
/// is reserved for its owning net; another net's connection must either
/// avoid it or trigger a rip-up of the preserving net (which removes its
/// entries from this map).
#[derive(Debug, Clone, Default)]
pub struct PreservationMap {
    owner: HashMap<WireId, PnrNetId>,
}

impl PreservationMap {
    /// Creates an empty preservation map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every wire in `wires` as preserved by `net`.
    pub fn preserve(&mut self, net: PnrNetId, wires: impl IntoIterator<Item = WireId>) {
        for wire in wires {
            self.owner.insert(wire, net);
        }
    }

    /// Returns the net preserving `wire`, if any.
    pub fn owner(&self, wire: WireId) -> Option<PnrNetId> {
        self.owner.get(&wire).copied()
    }

    /// Returns whether `wire` is preserved by a net other than `net`.
    pub fn blocks(&self, wire: WireId, net: PnrNetId) -> bool {
        matches!(self.owner(wire), Some(owner) if owner != net)
    }

    /// Releases every wire preserved by `net` (the net is being ripped up).
    pub fn rip_up(&mut self, net: PnrNetId) {
        self.owner.retain(|_, &mut owner| owner != net);
    }

    /// Number of preserved nodes.
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Returns whether no node is preserved.
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Iterates over every `(wire, owning net)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (WireId, PnrNetId)> + '_ {
        self.owner.iter().map(|(&wire, &net)| (wire, net))
    }

    /// Returns every wire currently preserved by `net`.
    pub fn wires_of(&self, net: PnrNetId) -> Vec<WireId> {
        self.owner
            .iter()
            .filter(|&(_, &owner)| owner == net)
            .map(|(&wire, _)| wire)
            .collect()
    }
}
