use wayfare::{
    graph::{GraphConfig, TransitGraph},
    store::StoreGateway,
};

pub struct AppState {
    /// Immutable after startup; shared by reference across request tasks.
    pub graph: TransitGraph,
    pub store: StoreGateway,
    pub config: GraphConfig,
}
