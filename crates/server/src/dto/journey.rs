use serde::Serialize;
use wayfare::{
    graph::{Stop, TransitGraph},
    journey::{Journey, Leg, LegKind},
};

/// One stop as it appears inside a journey leg.
#[derive(Debug, Clone, Serialize)]
pub struct StopRefDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Stop> for StopRefDto {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id,
            code: stop.code.to_string(),
            name: stop.name.to_string(),
            lat: stop.coordinate.latitude,
            lon: stop.coordinate.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    #[serde(rename = "type")]
    pub leg_type: String,
    pub from_stop: StopRefDto,
    pub to_stop: StopRefDto,
    pub start_time: String,
    pub end_time: String,
    /// Whole seconds spent on this leg.
    pub duration: u32,
    /// Empty for walks.
    pub route_code: String,
    /// Empty for walks.
    pub route_color: String,
    pub wait_time: u32,
    pub stops: Vec<StopRefDto>,
    /// One `[lon, lat]` pair per entry of `stops`.
    pub geometry: Vec<[f64; 2]>,
}

impl LegDto {
    fn from(leg: &Leg, graph: &TransitGraph) -> Self {
        let (leg_type, route_code, route_color) = match leg.kind {
            LegKind::Ride { route_idx, .. } => {
                let route = graph.route(route_idx);
                ("transit", route.code.to_string(), route.color.to_string())
            }
            LegKind::Walk => ("walk", String::new(), String::new()),
        };

        let stops: Vec<StopRefDto> = leg
            .stops
            .iter()
            .map(|&stop_idx| graph.stop(stop_idx).into())
            .collect();
        let geometry = stops.iter().map(|stop| [stop.lon, stop.lat]).collect();

        Self {
            leg_type: leg_type.to_string(),
            from_stop: graph.stop(leg.from_stop).into(),
            to_stop: graph.stop(leg.to_stop).into(),
            start_time: leg.start.to_hms_string(),
            end_time: leg.end.to_hms_string(),
            duration: (leg.end - leg.start).as_seconds(),
            route_code,
            route_color,
            wait_time: 0,
            stops,
            geometry,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyDto {
    pub legs: Vec<LegDto>,
}

impl JourneyDto {
    pub fn from(journey: &Journey, graph: &TransitGraph) -> Self {
        Self {
            legs: journey
                .legs
                .iter()
                .map(|leg| LegDto::from(leg, graph))
                .collect(),
        }
    }
}
