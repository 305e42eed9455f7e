use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

/// Mean earth radius used by every distance in the planner.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
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

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, value| acc + value)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:.2} km", self.as_kilometers()))
    }
}

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
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

    pub fn great_circle_distance(&self, coord: &Self) -> Distance {
        Distance::from_kilometers(great_circle_km(
            self.latitude,
            self.longitude,
            coord.latitude,
            coord.longitude,
        ))
    }
}

/// Haversine distance between two points given in degrees.
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dist_lat = f64::to_radians(lat2 - lat1);
    let dist_lon = f64::to_radians(lon2 - lon1);
    let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
        + f64::cos(f64::to_radians(lat1))
            * f64::cos(f64::to_radians(lat2))
            * f64::powi(f64::sin(dist_lon / 2.0), 2);
    let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
    EARTH_RADIUS_KM * c
}

#[test]
fn distance_test() {
    // Majestic to Shivajinagar, roughly 3.8 km apart.
    let coord_a = Coordinate::new(12.9767, 77.5713);
    let coord_b = Coordinate::new(12.9857, 77.6050);
    let d = coord_a.great_circle_distance(&coord_b);
    assert!((d.as_kilometers() - 3.8).abs() < 0.2);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn distance_sum_test() {
    let total: Distance = [0.5, 1.5, 2.0]
        .into_iter()
        .map(Distance::from_kilometers)
        .sum();
    assert_eq!(total, Distance::from_kilometers(4.0));
}
