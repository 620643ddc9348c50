//! Route legalization.
//!
//! Negotiated-congestion search runs one connection at a time, so a net's
//! connections can end up sharing wires in a way that forms a cycle or
//! gives a node two drivers within the same net. [`legalize_net`] rebuilds
//! a clean source-rooted DAG per net via Dijkstra over the net's own used
//! wires, discarding redundant edges so the emitted [`RouteTree`] has
//! exactly one parent per node and no cycles.

use crate::route_tree::{RouteNode, RouteResource, RouteTree};
use aion_arch::ids::WireId;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::cmp::Ordering;

#[derive(PartialEq)]
struct DistEntry {
    dist: f64,
    wire: WireId,
}
impl Eq for DistEntry {}
impl Ord for DistEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal)
    }
}
impl PartialOrd for DistEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rebuilds a legal, acyclic, single-parent-per-node route tree for a net
/// from the set of wires its connections actually used.
///
/// `edges` maps a wire to the `(wire, weight)` pairs immediately downhill of
/// it that are part of this net's used-wire set (the induced subgraph),
/// with `weight` the estimated delay (plus any cross-long-wire penalty) of
/// that hop — so Dijkstra here picks the lowest-delay route, not merely the
/// fewest-hop one. Returns `None` if `source` cannot reach every wire in
/// `used_wires` (a real bug in the upstream search, not a legalization
/// failure — callers should treat this as an internal invariant violation).
pub fn legalize_net(
    source: WireId,
    used_wires: &HashSet<WireId>,
    edges: &HashMap<WireId, Vec<(WireId, f64)>>,
) -> Option<RouteTree> {
    let mut dist: HashMap<WireId, f64> = HashMap::new();
    let mut parent: HashMap<WireId, WireId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0.0);
    heap.push(DistEntry { dist: 0.0, wire: source });

    while let Some(DistEntry { dist: d, wire }) = heap.pop() {
        if d > *dist.get(&wire).unwrap_or(&f64::INFINITY) {
            continue;
        }
        if let Some(children) = edges.get(&wire) {
            for &(child, weight) in children {
                if !used_wires.contains(&child) {
                    continue;
                }
                let nd = d + weight;
                if nd < *dist.get(&child).unwrap_or(&f64::INFINITY) {
                    dist.insert(child, nd);
                    parent.insert(child, wire);
                    heap.push(DistEntry { dist: nd, wire: child });
                }
            }
        }
    }

    if used_wires.iter().any(|w| *w != source && !dist.contains_key(w)) {
        return None;
    }

    Some(build_tree(source, used_wires, &parent))
}

fn build_tree(
    source: WireId,
    used_wires: &HashSet<WireId>,
    parent: &HashMap<WireId, WireId>,
) -> RouteTree {
    let mut children_of: HashMap<WireId, Vec<WireId>> = HashMap::new();
    for (&child, &p) in parent {
        children_of.entry(p).or_default().push(child);
    }

    fn build(wire: WireId, children_of: &HashMap<WireId, Vec<WireId>>) -> RouteNode {
        let children = children_of
            .get(&wire)
            .map(|kids| kids.iter().map(|&k| build(k, children_of)).collect())
            .unwrap_or_default();
        RouteNode {
            resource: RouteResource::Wire(wire),
            children,
        }
    }

    let _ = used_wires;
    RouteTree::new(build(source, &children_of))
}
