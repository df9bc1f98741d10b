// Moteur de routage : possède le graphe et une table de routage par slot de routeur.
// Toute mutation de la topologie est suivie d'un recalcul complet de toutes les tables
// avant de rendre la main : l'appelant n'observe jamais de table périmée.

use std::ops::RangeInclusive;
use log::{info, debug};
use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::core::graph::NetworkGraph;
use crate::core::routing_table::{RouteEntry, RoutingTable};
use crate::dijkstra::{shortest_paths, SolverStrategy};
use crate::error::{AppError, Result};
use crate::types::{Cost, Link, RouteState, RouterId, Topology};

/// Plage de coûts utilisée par défaut pour la génération aléatoire
pub const DEFAULT_COST_RANGE: RangeInclusive<Cost> = 1..=20;

/// Politique d'identifiants après la suppression d'un routeur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Les identifiants restent fixes pendant toute la vie du routeur
    #[default]
    Stable,
    /// Les routeurs restants sont renumérotés 1..N ; les anciens identifiants deviennent invalides
    Renumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub strategy: SolverStrategy,
    pub id_policy: IdPolicy,
}

#[derive(Debug, Clone)]
pub struct RoutingEngine {
    graph: NetworkGraph,
    tables: Vec<RoutingTable>,
    options: EngineOptions,
}

impl RoutingEngine {
    /// Réseau vide
    pub fn new(options: EngineOptions) -> Self {
        Self {
            graph: NetworkGraph::new(),
            tables: Vec::new(),
            options,
        }
    }

    /// Réseau de `count` routeurs sans liens
    pub fn with_routers(count: usize, options: EngineOptions) -> Result<Self> {
        let mut engine = Self::new(options);
        engine.graph = NetworkGraph::with_nodes(count);
        engine.recompute_all()?;
        Ok(engine)
    }

    pub fn from_topology(topology: &Topology, options: EngineOptions) -> Result<Self> {
        let mut engine = Self::new(options);
        engine.replace_topology(topology)?;
        Ok(engine)
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// Remplace toute la topologie (chargement d'un fichier)
    pub fn replace_topology(&mut self, topology: &Topology) -> Result<()> {
        self.graph = NetworkGraph::from_topology(topology);
        self.recompute_all()?;
        info!("Topologie chargée: {} routeurs, {} liens", self.graph.live_count(), self.graph.edges().len());
        Ok(())
    }

    /// Ajoute un routeur isolé et retourne son identifiant
    pub fn add_router(&mut self) -> Result<RouterId> {
        let id = self.graph.add_node();
        self.recompute_all()?;
        info!("Routeur R{} ajouté", id);
        Ok(id)
    }

    /// Supprime un routeur et ses liens. Avec `IdPolicy::Renumber`, les routeurs restants
    /// sont renumérotés 1..N.
    pub fn remove_router(&mut self, id: RouterId) -> Result<()> {
        self.ensure_live(id)?;
        self.graph.remove_node(id);
        if let Some(table) = self.tables.get_mut(id - 1) {
            table.clear();
        }
        if self.options.id_policy == IdPolicy::Renumber {
            self.graph.renumber();
            info!("Routeur R{} supprimé, identifiants réajustés", id);
        } else {
            info!("Routeur R{} supprimé", id);
        }
        self.recompute_all()
    }

    /// Crée le lien `u <-> v` ou met à jour son coût
    pub fn add_or_update_link(&mut self, u: RouterId, v: RouterId, cost: Cost) -> Result<()> {
        self.ensure_live(u)?;
        self.ensure_live(v)?;
        if u == v {
            return Err(AppError::SelfLink(u));
        }
        self.graph.set_edge(u, v, cost);
        info!("Lien R{} <-> R{} (coût {})", u, v, cost);
        self.recompute_all()
    }

    /// Supprime le lien `u <-> v` ; retourne `false` s'il n'existait pas
    pub fn remove_link(&mut self, u: RouterId, v: RouterId) -> Result<bool> {
        self.ensure_live(u)?;
        self.ensure_live(v)?;
        let removed = self.graph.remove_edge(u, v);
        if removed {
            info!("Lien R{} <-> R{} supprimé", u, v);
        } else {
            debug!("Aucun lien R{} <-> R{} à supprimer", u, v);
        }
        self.recompute_all()?;
        Ok(removed)
    }

    /// Relie toutes les paires de routeurs vivants avec un coût aléatoire uniforme dans `costs`
    pub fn generate_random_topology<R: Rng + ?Sized>(&mut self, rng: &mut R, costs: RangeInclusive<Cost>) -> Result<()> {
        if costs.is_empty() {
            return Err(AppError::ConfigError(format!(
                "empty cost range {}..={}", costs.start(), costs.end()
            )));
        }
        let ids = self.graph.live_ids();
        for (index, &u) in ids.iter().enumerate() {
            for &v in &ids[index + 1..] {
                let cost = rng.gen_range(costs.clone());
                self.graph.set_edge(u, v, cost);
            }
        }
        info!("Réseau aléatoire (complètement connecté) généré: {} routeurs", ids.len());
        self.recompute_all()
    }

    /// Recalcule toutes les tables depuis la topologie courante.
    /// Les nouvelles tables ne remplacent les anciennes qu'en cas de succès.
    pub fn recompute_all(&mut self) -> Result<()> {
        let slots = self.graph.slot_count();
        let live = self.graph.live_ids();
        let mut tables = Vec::with_capacity(slots);

        for source in 1..=slots {
            let mut table = RoutingTable::new(source);
            if self.graph.is_live(source) {
                table.ensure_size(slots);
                let paths = shortest_paths(&self.graph, source, self.options.strategy);
                for &dest in &live {
                    if let Some(cost) = paths.distance_to(dest) {
                        let path = paths.path_to(dest)?;
                        let next_hop = path.get(1).copied().unwrap_or(source);
                        table.set_entry(dest, cost, next_hop, path);
                    }
                }
            }
            tables.push(table);
        }

        self.tables = tables;
        debug!("Tables recalculées: {} sources, stratégie {:?}", live.len(), self.options.strategy);
        Ok(())
    }

    fn ensure_live(&self, id: RouterId) -> Result<()> {
        if self.graph.is_live(id) {
            Ok(())
        } else {
            Err(AppError::InvalidId(id))
        }
    }

    pub fn routers(&self) -> Vec<RouterId> {
        self.graph.live_ids()
    }

    pub fn router_count(&self) -> usize {
        self.graph.live_count()
    }

    pub fn links(&self) -> Vec<Link> {
        self.graph.edges()
    }

    pub fn snapshot(&self) -> Topology {
        self.graph.snapshot()
    }

    pub fn table(&self, id: RouterId) -> Result<&RoutingTable> {
        self.ensure_live(id)?;
        self.tables.get(id - 1).ok_or(AppError::InvalidId(id))
    }

    /// Tables des routeurs vivants, dans l'ordre des identifiants
    pub fn tables(&self) -> impl Iterator<Item = &RoutingTable> + '_ {
        self.tables.iter().filter(move |table| self.graph.is_live(table.source()))
    }

    pub fn route(&self, source: RouterId, destination: RouterId) -> Result<&RouteEntry> {
        self.ensure_live(destination)?;
        self.table(source)?
            .get_entry(destination)
            .ok_or(AppError::InvalidId(destination))
    }

    pub fn cost(&self, source: RouterId, destination: RouterId) -> Result<RouteState> {
        Ok(self.route(source, destination)?.cost)
    }

    /// Chemin complet, vide si la destination est inaccessible
    pub fn path(&self, source: RouterId, destination: RouterId) -> Result<Vec<RouterId>> {
        Ok(self.route(source, destination)?.path.clone())
    }

    pub fn next_hop(&self, source: RouterId, destination: RouterId) -> Result<Option<RouterId>> {
        Ok(self.route(source, destination)?.next_hop)
    }

    /// Matrice des coûts minimaux entre routeurs vivants, alignée sur `routers()`
    pub fn cost_matrix(&self) -> Vec<Vec<RouteState>> {
        let ids = self.routers();
        ids.iter()
            .map(|&source| {
                ids.iter()
                    .map(|&dest| self.cost(source, dest).unwrap_or(RouteState::Unreachable))
                    .collect()
            })
            .collect()
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
