// Définitions des structures et enums partagées

use serde::{Serialize, Deserialize};
use std::fmt;

/// Identifiant d'un routeur, à partir de 1
pub type RouterId = usize;

/// Coût d'un lien ou d'une route (toujours positif ou nul)
pub type Cost = u32;

/// État d'une route dans la table de routage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteState {
    /// Route active avec son coût total
    Active(Cost),
    /// Aucun chemin vers la destination
    Unreachable,
}

impl RouteState {
    pub fn is_reachable(&self) -> bool {
        matches!(self, RouteState::Active(_))
    }

    pub fn cost(&self) -> Option<Cost> {
        match self {
            RouteState::Active(cost) => Some(*cost),
            RouteState::Unreachable => None,
        }
    }
}

impl fmt::Display for RouteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteState::Active(cost) => write!(f, "{}", cost),
            RouteState::Unreachable => write!(f, "-"),
        }
    }
}

/// Lien non orienté entre deux routeurs, avec `from < to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    pub from: RouterId,
    pub to: RouterId,
    pub cost: Cost,
}

impl Link {
    /// Normalise l'ordre des extrémités
    pub fn new(a: RouterId, b: RouterId, cost: Cost) -> Self {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        Link { from, to, cost }
    }
}

/// Photo de la topologie : nombre de routeurs (identifiants 1..=router_count) et liens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub router_count: usize,
    pub links: Vec<Link>,
}

/// Nom affiché d'un routeur ("R3")
pub fn router_name(id: RouterId) -> String {
    format!("R{}", id)
}
