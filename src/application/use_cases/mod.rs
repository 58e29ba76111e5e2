/// Use cases module containing application business logic orchestration
mod explore_graph;
mod model_coordinator;

pub use explore_graph::ExploreGraphUseCase;
pub use model_coordinator::ModelCoordinator;
