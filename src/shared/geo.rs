use crate::shared::time::Duration;
use serde::{Deserialize, Serialize};
use std::{cmp, fmt::Display, ops::Add};

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    /// Time needed to cover this distance on foot at the given speed.
    pub fn walk_time(&self, speed_mps: f64) -> Duration {
        Duration::from_seconds((self.0 / speed_mps).round() as u32)
    }
}

/// A position in decimal degrees, as the store hands it back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance between two positions.
    pub fn distance(&self, coord: &Self) -> Distance {
        const R: f64 = 6371.0;
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(R * c)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

#[test]
fn distance_between_known_points() {
    let paris = Coordinate::new(48.858_01, 2.351_435);
    let london = Coordinate::new(51.505_238, -0.124_954);
    let d = paris.distance(&london);
    assert!((d.as_meters() - 343_000.0).abs() < 2_000.0);
}

#[test]
fn distance_to_self_is_zero() {
    let coord = Coordinate::new(33.589_886, -7.603_869);
    assert!(coord.distance(&coord).as_meters() < 1e-6);
}

#[test]
fn walk_time_rounds_to_whole_seconds() {
    let d = Distance::from_meters(120.4);
    assert_eq!(d.walk_time(1.0).as_seconds(), 120);
}

#[test]
fn distance_cmp() {
    let near = Distance::from_meters(500.0);
    let far = Distance::from_kilometers(1.0);
    assert!(far > near)
}
