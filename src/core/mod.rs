// This file serves as the core module: the topology store, the per-router routing tables
// and the engine keeping them consistent.

pub mod graph;
pub mod routing_table;
pub mod engine;

pub use engine::{EngineOptions, IdPolicy, RoutingEngine};
