// This file defines the library interface of the router network simulator: the routing engine
// and the file, configuration and display helpers used by the `routing` and `cli` binaries.

pub mod core;
pub mod dijkstra;
pub mod display;
pub mod error;
pub mod init;
pub mod read_config;
pub mod storage;
pub mod topology_file;
pub mod types;

pub use crate::core::{EngineOptions, IdPolicy, RoutingEngine};
pub use dijkstra::SolverStrategy;
pub use error::{AppError, Result};
pub use types::{Cost, Link, RouteState, RouterId, Topology};
