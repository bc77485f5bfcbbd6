use crate::error::ApiError;
use std::collections::HashMap;
use wayfare::{
    graph::ServiceDay,
    shared::{geo::Coordinate, time::Time},
};

/// Departure used when the rider gives no time or an unusable one.
pub const DEFAULT_DEPARTURE: Time = Time::from_seconds(8 * 3600 + 30 * 60);

/// The rider's day-type choice. `Weekend` is purely a boundary alias; the
/// engine only ever sees concrete service days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayParam {
    Weekday,
    Saturday,
    Sunday,
    Weekend,
}

impl DayParam {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "weekday" => Some(Self::Weekday),
            "saturday" => Some(Self::Saturday),
            "sunday" => Some(Self::Sunday),
            "weekend" => Some(Self::Weekend),
            _ => None,
        }
    }

    /// Concrete service days to try, in order; the first that yields a
    /// journey wins.
    pub fn services(&self) -> &'static [ServiceDay] {
        match self {
            Self::Weekday => &[ServiceDay::Weekday],
            Self::Saturday => &[ServiceDay::Saturday],
            Self::Sunday => &[ServiceDay::Sunday],
            Self::Weekend => &[ServiceDay::Saturday, ServiceDay::Sunday],
        }
    }
}

/// A fully parsed `/api/v1/route` query.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlan {
    pub from: Coordinate,
    pub to: Coordinate,
    pub departure: Time,
    pub day: DayParam,
}

pub fn parse_route_query(params: &HashMap<String, String>) -> Result<RoutePlan, ApiError> {
    let from = Coordinate::new(
        required_float(params, "from_lat")?,
        required_float(params, "from_lon")?,
    );
    let to = Coordinate::new(
        required_float(params, "to_lat")?,
        required_float(params, "to_lon")?,
    );

    let departure = departure_time(params.get("time").map(String::as_str));
    let day = match params.get("day") {
        None => DayParam::Weekday,
        Some(raw) => DayParam::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown day: {raw}")))?,
    };

    Ok(RoutePlan {
        from,
        to,
        departure,
        day,
    })
}

pub fn required_float(params: &HashMap<String, String>, key: &str) -> Result<f64, ApiError> {
    let raw = params
        .get(key)
        .ok_or_else(|| ApiError::BadRequest(format!("missing parameter: {key}")))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid number for {key}: {raw}")))?;
    if !value.is_finite() {
        return Err(ApiError::BadRequest(format!(
            "invalid number for {key}: {raw}"
        )));
    }
    Ok(value)
}

/// Seconds since midnight. Non-integers fall back to the default; integers
/// outside the day clamp to its bounds.
fn departure_time(raw: Option<&str>) -> Time {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(seconds) => Time::from_seconds(seconds.clamp(0, 86_399) as u32),
        None => DEFAULT_DEPARTURE,
    }
}

#[cfg(test)]
fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn defaults_when_time_and_day_missing() {
    let params = query(&[
        ("from_lat", "33.59"),
        ("from_lon", "-7.60"),
        ("to_lat", "33.60"),
        ("to_lon", "-7.61"),
    ]);
    let plan = parse_route_query(&params).unwrap();
    assert_eq!(plan.departure, DEFAULT_DEPARTURE);
    assert_eq!(plan.day, DayParam::Weekday);
}

#[test]
fn time_clamps_into_the_day() {
    let params = query(&[
        ("from_lat", "0"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
        ("time", "100000"),
    ]);
    let plan = parse_route_query(&params).unwrap();
    assert_eq!(plan.departure.as_seconds(), 86_399);

    let params = query(&[
        ("from_lat", "0"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
        ("time", "-5"),
    ]);
    let plan = parse_route_query(&params).unwrap();
    assert_eq!(plan.departure.as_seconds(), 0);
}

#[test]
fn garbage_time_falls_back_to_default() {
    let params = query(&[
        ("from_lat", "0"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
        ("time", "08:30:00"),
    ]);
    let plan = parse_route_query(&params).unwrap();
    assert_eq!(plan.departure, DEFAULT_DEPARTURE);
}

#[test]
fn day_is_case_insensitive_and_weekend_fans_out() {
    let params = query(&[
        ("from_lat", "0"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
        ("day", "WeekEnd"),
    ]);
    let plan = parse_route_query(&params).unwrap();
    assert_eq!(plan.day, DayParam::Weekend);
    assert_eq!(
        plan.day.services(),
        &[ServiceDay::Saturday, ServiceDay::Sunday]
    );
}

#[test]
fn unknown_day_is_rejected() {
    let params = query(&[
        ("from_lat", "0"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
        ("day", "holiday"),
    ]);
    assert!(parse_route_query(&params).is_err());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let params = query(&[
        ("from_lat", "NaN"),
        ("from_lon", "0"),
        ("to_lat", "1"),
        ("to_lon", "1"),
    ]);
    assert!(parse_route_query(&params).is_err());
}

#[test]
fn missing_coordinate_is_rejected() {
    let params = query(&[("from_lat", "0"), ("from_lon", "0"), ("to_lat", "1")]);
    assert!(parse_route_query(&params).is_err());
}
