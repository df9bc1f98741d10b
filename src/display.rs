// Mise en forme texte du réseau et des tables de routage pour la console

use crate::core::RoutingEngine;
use crate::core::routing_table::RoutingTable;
use crate::error::Result;
use crate::types::{router_name, RouteState, RouterId};

pub fn format_path(path: &[RouterId]) -> String {
    path.iter()
        .map(|&id| router_name(id))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Matrice des coûts minimaux (Dijkstra) entre tous les routeurs
pub fn format_cost_matrix(engine: &RoutingEngine) -> String {
    let ids = engine.routers();
    if ids.is_empty() {
        return String::from("Aucun routeur dans le réseau.\n");
    }

    let mut response = String::from("=== Matrice des coûts (plus courts chemins) ===\n");
    response.push_str(&format!("{:>5}", ""));
    for &id in &ids {
        response.push_str(&format!("{:>6}", router_name(id)));
    }
    response.push('\n');

    for (&source, row) in ids.iter().zip(engine.cost_matrix()) {
        response.push_str(&format!("{:>5}", router_name(source)));
        for cost in row {
            response.push_str(&format!("{:>6}", cost.to_string()));
        }
        response.push('\n');
    }
    response
}

/// Liens du réseau, un par ligne
pub fn format_links(engine: &RoutingEngine) -> String {
    let mut response = String::new();
    for id in engine.routers() {
        let neighbors = engine.graph().neighbors(id).map(|n| {
            n.iter()
                .map(|(&neighbor, cost)| format!("{}({})", router_name(neighbor), cost))
                .collect::<Vec<_>>()
                .join(", ")
        });
        let neighbors = match neighbors {
            Some(list) if !list.is_empty() => list,
            _ => String::from("sans connexions"),
        };
        response.push_str(&format!("{} -> {}\n", router_name(id), neighbors));
    }
    response
}

/// Table d'un routeur, restreinte aux destinations données (les routeurs vivants)
pub fn format_routing_table(table: &RoutingTable, destinations: &[RouterId]) -> String {
    let mut response = format!("=== Table de routage de {} ===\n", router_name(table.source()));
    response.push_str("Destination | Coût | Next Hop | Chemin\n");
    response.push_str("------------|------|----------|-------\n");

    for &destination in destinations {
        let entry = match table.get_entry(destination) {
            Some(entry) => entry,
            None => continue,
        };
        let (next_hop, path) = match entry.next_hop {
            Some(hop) => (router_name(hop), format_path(&entry.path)),
            None => ("-".to_string(), "Sans connexion".to_string()),
        };
        response.push_str(&format!(
            "{:<11} | {:<4} | {:<8} | {}\n",
            router_name(destination),
            entry.cost.to_string(),
            next_hop,
            path
        ));
    }
    response
}

pub fn format_routing_tables(engine: &RoutingEngine) -> String {
    let destinations = engine.routers();
    let mut response = String::new();
    for table in engine.tables() {
        response.push_str(&format_routing_table(table, &destinations));
        response.push('\n');
    }
    if response.is_empty() {
        response.push_str("Aucun routeur.\n");
    }
    response
}

/// Plus court chemin entre deux routeurs, ou erreur si un identifiant est invalide
pub fn format_route(engine: &RoutingEngine, source: RouterId, destination: RouterId) -> Result<String> {
    let route = engine.route(source, destination)?;
    Ok(match route.cost {
        RouteState::Active(cost) => format!(
            "Route la plus courte: {} | Coût total: {}\n",
            format_path(&route.path),
            cost
        ),
        RouteState::Unreachable => format!(
            "Aucune route entre {} et {}.\n",
            router_name(source),
            router_name(destination)
        ),
    })
}

/// Toutes les tables de routage des routeurs vivants, en JSON
pub fn format_tables_json(engine: &RoutingEngine) -> Result<String> {
    let tables: Vec<&RoutingTable> = engine.tables().collect();
    let mut json = serde_json::to_string_pretty(&tables)?;
    json.push('\n');
    Ok(json)
}
