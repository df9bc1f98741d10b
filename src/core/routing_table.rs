// This file implements the per-router routing table: one entry per destination slot,
// rebuilt wholesale by the engine after every topology change.

use log::debug;
use serde::Serialize;
use crate::types::{Cost, RouteState, RouterId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub destination: RouterId,
    pub cost: RouteState,
    pub next_hop: Option<RouterId>,
    pub path: Vec<RouterId>,
}

impl RouteEntry {
    pub fn unreachable(destination: RouterId) -> Self {
        RouteEntry {
            destination,
            cost: RouteState::Unreachable,
            next_hop: None,
            path: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutingTable {
    source: RouterId,
    routes: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new(source: RouterId) -> Self {
        RoutingTable {
            source,
            routes: Vec::new(),
        }
    }

    pub fn source(&self) -> RouterId {
        self.source
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resets the table to `slots` unreachable entries.
    pub fn ensure_size(&mut self, slots: usize) {
        self.routes = (1..=slots).map(RouteEntry::unreachable).collect();
    }

    /// Ignored when `destination` is outside the sized range.
    pub fn set_entry(&mut self, destination: RouterId, cost: Cost, next_hop: RouterId, path: Vec<RouterId>) {
        match destination.checked_sub(1).and_then(|index| self.routes.get_mut(index)) {
            Some(route) => {
                route.cost = RouteState::Active(cost);
                route.next_hop = Some(next_hop);
                route.path = path;
            }
            None => debug!(
                "Table R{}: destination R{} hors plage ({} slots), entrée ignorée",
                self.source, destination, self.routes.len()
            ),
        }
    }

    pub fn get_entry(&self, destination: RouterId) -> Option<&RouteEntry> {
        destination.checked_sub(1).and_then(|index| self.routes.get(index))
    }

    pub fn get_cost(&self, destination: RouterId) -> RouteState {
        self.get_entry(destination)
            .map_or(RouteState::Unreachable, |route| route.cost)
    }

    pub fn get_path(&self, destination: RouterId) -> &[RouterId] {
        self.get_entry(destination)
            .map_or(&[][..], |route| route.path.as_slice())
    }

    /// Empties the table of a removed router.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Reachable routes only, ordered by destination.
    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().filter(|route| route.cost.is_reachable())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.routes
    }
}
