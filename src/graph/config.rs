/// Tunables for graph construction and nearest-stop resolution.
#[derive(Debug, Clone, Copy)]
pub struct GraphConfig {
    /// Synthesized travel time between consecutive stops of a route, until
    /// measured per-leg durations land in the store.
    pub inter_stop_seconds: u32,
    /// Straight-line threshold for generating foot transfers.
    pub transfer_radius_m: f64,
    /// Walking speed used to turn transfer distances into durations.
    pub walk_speed_mps: f64,
    /// Half-width in degrees of the box used to resolve a coordinate to
    /// nearby stops.
    pub nearby_box_degrees: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            inter_stop_seconds: 180,
            transfer_radius_m: 300.0,
            walk_speed_mps: 1.0,
            nearby_box_degrees: 0.01,
        }
    }
}
