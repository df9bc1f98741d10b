// Stockage du graphe : routeurs et liens pondérés non orientés.
// Les routeurs sont rangés dans une arène indexée par identifiant (slot = id - 1),
// jamais par pointeur ; un routeur supprimé garde son slot, marqué mort,
// sauf en fin d'arène où les slots morts sont libérés.

use std::collections::BTreeMap;
use log::debug;
use crate::types::{Cost, Link, RouterId, Topology};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slot {
    live: bool,
    neighbors: BTreeMap<RouterId, Cost>,
}

/// Topologie courante du réseau, seule source de vérité
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkGraph {
    slots: Vec<Slot>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Crée un graphe de `count` routeurs (R1..Rcount) sans liens
    pub fn with_nodes(count: usize) -> Self {
        let slots = (0..count)
            .map(|_| Slot { live: true, neighbors: BTreeMap::new() })
            .collect();
        Self { slots }
    }

    /// Construit le graphe d'une photo de topologie ; les liens invalides sont ignorés
    pub fn from_topology(topology: &Topology) -> Self {
        let mut graph = Self::with_nodes(topology.router_count);
        for link in &topology.links {
            graph.set_edge(link.from, link.to, link.cost);
        }
        graph
    }

    /// Ajoute un routeur et retourne son identifiant : le plus grand identifiant vivant + 1
    pub fn add_node(&mut self) -> RouterId {
        let id = self.live_ids().last().map_or(1, |highest| highest + 1);
        let slot = Slot { live: true, neighbors: BTreeMap::new() };
        if id <= self.slots.len() {
            self.slots[id - 1] = slot;
        } else {
            self.slots.push(slot);
        }
        debug!("Slot R{} alloué", id);
        id
    }

    /// Supprime un routeur et tous ses liens. Sans effet si le routeur n'existe pas.
    pub fn remove_node(&mut self, id: RouterId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let neighbors = std::mem::take(&mut self.slots[id - 1].neighbors);
        for neighbor in neighbors.keys() {
            self.slots[neighbor - 1].neighbors.remove(&id);
        }
        self.slots[id - 1].live = false;
        // Les slots morts en fin d'arène sont libérés ; ceux du milieu restent pour garder les identifiants stables
        while self.slots.last().map_or(false, |slot| !slot.live) {
            self.slots.pop();
        }
        true
    }

    /// Crée ou remplace le lien symétrique `u <-> v`.
    /// Sans effet si `u == v` ou si une extrémité n'existe pas.
    pub fn set_edge(&mut self, u: RouterId, v: RouterId, cost: Cost) -> bool {
        if u == v || !self.is_live(u) || !self.is_live(v) {
            return false;
        }
        self.slots[u - 1].neighbors.insert(v, cost);
        self.slots[v - 1].neighbors.insert(u, cost);
        true
    }

    /// Supprime le lien `u <-> v` s'il existe
    pub fn remove_edge(&mut self, u: RouterId, v: RouterId) -> bool {
        if !self.is_live(u) || !self.is_live(v) {
            return false;
        }
        let removed = self.slots[u - 1].neighbors.remove(&v).is_some();
        self.slots[v - 1].neighbors.remove(&u);
        removed
    }

    /// Voisins d'un routeur vivant, triés par identifiant
    pub fn neighbors(&self, id: RouterId) -> Option<&BTreeMap<RouterId, Cost>> {
        if self.is_live(id) {
            Some(&self.slots[id - 1].neighbors)
        } else {
            None
        }
    }

    pub fn cost(&self, u: RouterId, v: RouterId) -> Option<Cost> {
        self.neighbors(u)?.get(&v).copied()
    }

    pub fn is_live(&self, id: RouterId) -> bool {
        id >= 1 && id <= self.slots.len() && self.slots[id - 1].live
    }

    /// Nombre de slots connus, routeurs supprimés compris
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.live).count()
    }

    pub fn live_ids(&self) -> Vec<RouterId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.live)
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Chaque lien une seule fois, `from < to`, trié par `(from, to)`
    pub fn edges(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for u in self.live_ids() {
            for (&v, &cost) in &self.slots[u - 1].neighbors {
                if u < v {
                    links.push(Link { from: u, to: v, cost });
                }
            }
        }
        links
    }

    /// Renumérote les routeurs vivants en 1..N dans l'ordre croissant.
    /// Retourne la correspondance ancien identifiant -> nouveau (index = ancien - 1).
    pub fn renumber(&mut self) -> Vec<Option<RouterId>> {
        let mut mapping = vec![None; self.slots.len()];
        let mut next = 1;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.live {
                mapping[index] = Some(next);
                next += 1;
            }
        }
        let slots = std::mem::take(&mut self.slots);
        self.slots = slots
            .into_iter()
            .filter(|slot| slot.live)
            .map(|slot| Slot {
                live: true,
                neighbors: slot
                    .neighbors
                    .into_iter()
                    .filter_map(|(old, cost)| mapping[old - 1].map(|new| (new, cost)))
                    .collect(),
            })
            .collect();
        mapping
    }

    /// Photo compacte des routeurs vivants (renumérotés 1..N) et de leurs liens
    pub fn snapshot(&self) -> Topology {
        let mut compact = self.clone();
        compact.renumber();
        Topology {
            router_count: compact.slot_count(),
            links: compact.edges(),
        }
    }
}
