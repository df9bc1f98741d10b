// This file contains integration tests for the routing engine: reference scenarios and the
// properties every set of routing tables must satisfy after any topology change.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use routing_simulator::core::engine::DEFAULT_COST_RANGE;
    use routing_simulator::display::format_route;
    use routing_simulator::{AppError, EngineOptions, IdPolicy, RouteState, RoutingEngine, SolverStrategy};

    fn scenario_one(options: EngineOptions) -> RoutingEngine {
        let mut engine = RoutingEngine::with_routers(3, options).unwrap();
        engine.add_or_update_link(1, 2, 5).unwrap();
        engine.add_or_update_link(2, 3, 5).unwrap();
        engine.add_or_update_link(1, 3, 20).unwrap();
        engine
    }

    /// Réseau aléatoire reproductible, volontairement incomplet
    fn sparse_network(seed: u64, routers: usize, strategy: SolverStrategy) -> RoutingEngine {
        let options = EngineOptions { strategy, id_policy: IdPolicy::Stable };
        let mut engine = RoutingEngine::with_routers(routers, options).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        engine.generate_random_topology(&mut rng, DEFAULT_COST_RANGE).unwrap();
        for link in engine.links() {
            if rng.gen_bool(0.7) {
                engine.remove_link(link.from, link.to).unwrap();
            }
        }
        engine
    }

    fn assert_tables_consistent(engine: &RoutingEngine) {
        let ids = engine.routers();
        for &u in &ids {
            assert_eq!(engine.cost(u, u).unwrap(), RouteState::Active(0));
            assert_eq!(engine.path(u, u).unwrap(), vec![u]);
            assert_eq!(engine.next_hop(u, u).unwrap(), Some(u));

            for &v in &ids {
                let cost = engine.cost(u, v).unwrap();
                assert_eq!(cost, engine.cost(v, u).unwrap(), "asymmetric cost R{} R{}", u, v);

                let path = engine.path(u, v).unwrap();
                match cost {
                    RouteState::Unreachable => {
                        assert!(path.is_empty());
                        assert_eq!(engine.next_hop(u, v).unwrap(), None);
                    }
                    RouteState::Active(total) => {
                        assert_eq!(path.first(), Some(&u));
                        assert_eq!(path.last(), Some(&v));
                        let mut sum = 0;
                        for hop in path.windows(2) {
                            sum += engine.graph().cost(hop[0], hop[1]).expect("path uses a missing link");
                        }
                        assert_eq!(sum, total);
                        assert_eq!(engine.next_hop(u, v).unwrap(), Some(*path.get(1).unwrap_or(&u)));
                    }
                }

                for &w in &ids {
                    if let (Some(uv), Some(vw)) = (cost.cost(), engine.cost(v, w).unwrap().cost()) {
                        let uw = engine.cost(u, w).unwrap().cost().expect("u-w must be reachable");
                        assert!(uw <= uv + vw);
                    }
                }
            }
        }
    }

    #[test]
    fn test_scenario_cheaper_two_hop_route() {
        let engine = scenario_one(EngineOptions::default());
        assert_eq!(engine.cost(1, 3).unwrap(), RouteState::Active(10));
        assert_eq!(engine.path(1, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(engine.next_hop(1, 3).unwrap(), Some(2));
        assert_tables_consistent(&engine);
    }

    #[test]
    fn test_scenario_remove_middle_router() {
        let mut engine = scenario_one(EngineOptions::default());
        engine.remove_router(2).unwrap();

        assert_eq!(engine.cost(1, 3).unwrap(), RouteState::Active(20));
        assert_eq!(engine.path(1, 3).unwrap(), vec![1, 3]);
        assert!(matches!(engine.cost(1, 2), Err(AppError::InvalidId(2))));
        assert!(matches!(engine.remove_router(2), Err(AppError::InvalidId(2))));
        assert_tables_consistent(&engine);
    }

    #[test]
    fn test_scenario_remove_middle_router_with_renumbering() {
        let options = EngineOptions { id_policy: IdPolicy::Renumber, ..EngineOptions::default() };
        let mut engine = scenario_one(options);
        engine.remove_router(2).unwrap();

        assert_eq!(engine.routers(), vec![1, 2]);
        assert_eq!(engine.cost(1, 2).unwrap(), RouteState::Active(20));
        assert_eq!(engine.path(1, 2).unwrap(), vec![1, 2]);
        assert!(matches!(engine.cost(1, 3), Err(AppError::InvalidId(3))));
        assert_eq!(engine.add_router().unwrap(), 3);
        assert_tables_consistent(&engine);
    }

    #[test]
    fn test_scenario_two_routers_from_empty_network() {
        let mut engine = RoutingEngine::default();
        assert_eq!(engine.add_router().unwrap(), 1);
        assert_eq!(engine.add_router().unwrap(), 2);
        assert_eq!(engine.cost(1, 2).unwrap(), RouteState::Unreachable);

        engine.add_or_update_link(1, 2, 7).unwrap();
        assert_eq!(engine.cost(1, 2).unwrap(), RouteState::Active(7));
        assert_eq!(engine.cost(2, 1).unwrap(), RouteState::Active(7));
    }

    #[test]
    fn test_scenario_out_of_range_id() {
        let engine = scenario_one(EngineOptions::default());
        assert!(matches!(engine.cost(1, 4), Err(AppError::InvalidId(4))));
        assert!(matches!(engine.cost(0, 1), Err(AppError::InvalidId(0))));
        assert!(matches!(engine.path(9, 1), Err(AppError::InvalidId(9))));
        assert!(format_route(&engine, 1, 42).is_err());
    }

    #[test]
    fn test_invalid_link_operations_leave_topology_unchanged() {
        let mut engine = scenario_one(EngineOptions::default());
        let before = engine.links();

        assert!(matches!(engine.add_or_update_link(1, 1, 3), Err(AppError::SelfLink(1))));
        assert!(matches!(engine.add_or_update_link(1, 5, 3), Err(AppError::InvalidId(5))));
        assert!(matches!(engine.remove_link(4, 1), Err(AppError::InvalidId(4))));
        assert_eq!(engine.links(), before);
    }

    #[test]
    fn test_link_update_and_removal_recompute_tables() {
        let mut engine = scenario_one(EngineOptions::default());

        engine.add_or_update_link(1, 3, 2).unwrap();
        assert_eq!(engine.path(1, 3).unwrap(), vec![1, 3]);
        assert_eq!(engine.cost(2, 3).unwrap(), RouteState::Active(5));

        assert!(engine.remove_link(2, 3).unwrap());
        assert!(!engine.remove_link(2, 3).unwrap());
        assert_eq!(engine.path(2, 3).unwrap(), vec![2, 1, 3]);
        assert_eq!(engine.cost(2, 3).unwrap(), RouteState::Active(7));

        assert!(engine.remove_link(1, 2).unwrap());
        assert_eq!(engine.cost(2, 3).unwrap(), RouteState::Unreachable);
        assert!(engine.path(2, 3).unwrap().is_empty());
        assert_tables_consistent(&engine);
    }

    #[test]
    fn test_random_networks_satisfy_routing_properties() {
        for seed in 0..10 {
            let mut engine = sparse_network(seed, 7, SolverStrategy::BinaryHeap);
            assert_tables_consistent(&engine);

            engine.remove_router(3).unwrap();
            assert_tables_consistent(&engine);

            let id = engine.add_router().unwrap();
            engine.add_or_update_link(id, 1, 4).unwrap();
            assert_tables_consistent(&engine);
        }
    }

    #[test]
    fn test_strategies_produce_identical_tables() {
        for seed in 0..10 {
            let heap = sparse_network(seed, 9, SolverStrategy::BinaryHeap);
            let dense = sparse_network(seed, 9, SolverStrategy::Dense);
            assert_eq!(heap.links(), dense.links());

            let heap_tables: Vec<_> = heap.tables().cloned().collect();
            let dense_tables: Vec<_> = dense.tables().cloned().collect();
            assert_eq!(heap_tables, dense_tables);
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut engine = sparse_network(3, 8, SolverStrategy::Dense);
        let before: Vec<_> = engine.tables().cloned().collect();
        engine.recompute_all().unwrap();
        engine.recompute_all().unwrap();
        let after: Vec<_> = engine.tables().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_fully_connected_random_network() {
        let mut engine = RoutingEngine::with_routers(6, EngineOptions::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        engine.generate_random_topology(&mut rng, 1..=20).unwrap();

        assert_eq!(engine.links().len(), 15);
        for row in engine.cost_matrix() {
            assert!(row.iter().all(|cost| cost.is_reachable()));
        }
        assert_tables_consistent(&engine);
    }
}
