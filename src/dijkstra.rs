// Module d'implémentation de l'algorithme de Dijkstra
// Calcul des plus courts chemins depuis un routeur source sur des coûts positifs ou nuls

use std::collections::BinaryHeap;
use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use crate::core::graph::NetworkGraph;
use crate::error::{AppError, Result};
use crate::types::{Cost, RouterId};

/// Stratégie de sélection du prochain nœud à visiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverStrategy {
    /// File de priorité, O((V+E) log V)
    #[default]
    #[serde(rename = "heap")]
    BinaryHeap,
    /// Parcours de tous les nœuds non visités à chaque itération, O(V²)
    #[serde(rename = "dense")]
    Dense,
}

/// Nœud utilisé dans l'algorithme de Dijkstra
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct DijkstraNode {
    router_id: RouterId,
    total_cost: Cost,
}

impl Ord for DijkstraNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Tas min : coût total minimum, puis plus petit identifiant
        other.total_cost.cmp(&self.total_cost)
            .then_with(|| other.router_id.cmp(&self.router_id))
    }
}

impl PartialOrd for DijkstraNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Résultat de Dijkstra pour une source : distances et prédécesseurs, indexés par slot (id - 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source: RouterId,
    pub distance: Vec<Option<Cost>>,
    pub predecessor: Vec<Option<RouterId>>,
}

impl ShortestPaths {
    fn unreached(source: RouterId, slots: usize) -> Self {
        Self {
            source,
            distance: vec![None; slots],
            predecessor: vec![None; slots],
        }
    }

    pub fn distance_to(&self, dest: RouterId) -> Option<Cost> {
        dest.checked_sub(1)
            .and_then(|index| self.distance.get(index).copied())
            .flatten()
    }

    /// Reconstruit le chemin source -> destination en remontant les prédécesseurs.
    /// Vide si la destination est inaccessible.
    pub fn path_to(&self, dest: RouterId) -> Result<Vec<RouterId>> {
        if self.distance_to(dest).is_none() {
            return Ok(Vec::new());
        }

        let mut path = vec![dest];
        let mut current = dest;
        while current != self.source {
            let previous = self.predecessor
                .get(current - 1)
                .copied()
                .flatten()
                .ok_or_else(|| AppError::InvariantViolation(format!(
                    "R{} has a distance from R{} but no predecessor chain (stuck at R{})",
                    dest, self.source, current
                )))?;
            path.push(previous);
            if path.len() > self.distance.len() {
                return Err(AppError::InvariantViolation(format!(
                    "predecessor cycle while rebuilding path R{} -> R{}",
                    self.source, dest
                )));
            }
            current = previous;
        }
        path.reverse();
        Ok(path)
    }
}

/// Calcule les plus courts chemins depuis `source`. Les routeurs supprimés sont absents du graphe.
pub fn shortest_paths(graph: &NetworkGraph, source: RouterId, strategy: SolverStrategy) -> ShortestPaths {
    match strategy {
        SolverStrategy::BinaryHeap => heap_dijkstra(graph, source),
        SolverStrategy::Dense => dense_dijkstra(graph, source),
    }
}

/// Relâche tous les liens sortants de `current`, en ne retenant que les chemins strictement plus courts
fn relax<F>(graph: &NetworkGraph, current: RouterId, current_cost: Cost, visited: &[bool], result: &mut ShortestPaths, mut on_update: F)
where
    F: FnMut(RouterId, Cost),
{
    let neighbors = match graph.neighbors(current) {
        Some(neighbors) => neighbors,
        None => return,
    };
    for (&next, &link_cost) in neighbors {
        if visited[next - 1] {
            continue;
        }
        let candidate = match current_cost.checked_add(link_cost) {
            Some(cost) => cost,
            None => continue,
        };
        let improves = result.distance[next - 1].map_or(true, |best| candidate < best);
        if improves {
            result.distance[next - 1] = Some(candidate);
            result.predecessor[next - 1] = Some(current);
            on_update(next, candidate);
        }
    }
}

fn heap_dijkstra(graph: &NetworkGraph, source: RouterId) -> ShortestPaths {
    let slots = graph.slot_count();
    let mut result = ShortestPaths::unreached(source, slots);
    if !graph.is_live(source) {
        return result;
    }

    let mut visited = vec![false; slots];
    let mut heap = BinaryHeap::new();
    result.distance[source - 1] = Some(0);
    heap.push(DijkstraNode { router_id: source, total_cost: 0 });

    while let Some(current) = heap.pop() {
        if visited[current.router_id - 1] {
            continue;
        }
        visited[current.router_id - 1] = true;

        relax(graph, current.router_id, current.total_cost, &visited, &mut result, |router_id, total_cost| {
            heap.push(DijkstraNode { router_id, total_cost });
        });
    }

    result
}

fn dense_dijkstra(graph: &NetworkGraph, source: RouterId) -> ShortestPaths {
    let slots = graph.slot_count();
    let mut result = ShortestPaths::unreached(source, slots);
    if !graph.is_live(source) {
        return result;
    }

    let mut visited = vec![false; slots];
    result.distance[source - 1] = Some(0);

    loop {
        // Sélection du nœud non visité le plus proche ; à égalité, le plus petit identifiant
        let mut best: Option<(Cost, RouterId)> = None;
        for id in 1..=slots {
            if visited[id - 1] || !graph.is_live(id) {
                continue;
            }
            if let Some(distance) = result.distance[id - 1] {
                if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                    best = Some((distance, id));
                }
            }
        }

        let (current_cost, current) = match best {
            Some(best) => best,
            None => break,
        };
        visited[current - 1] = true;
        relax(graph, current, current_cost, &visited, &mut result, |_, _| {});
    }

    result
}
