//! Graph resolution domain - package graph model, version policies and the
//! services that grow, prune and filter the graph.
pub mod domain;
pub mod policies;
pub mod services;
